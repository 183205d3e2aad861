use serde::{Deserialize, Serialize};

use super::ResultType;
use crate::codec;

/// Value with its unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Numeric value
    pub value: f64,

    /// Unit of the value
    pub unit: String,
}

impl Quantity {
    /// Create a quantity
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// Whether a sequence of samples was reconstructed or recorded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceType {
    /// Values programmed in the device (e.g., an intended voltage command)
    Reconstructed,
    /// Values recorded by the device
    #[default]
    Recorded,
}

/// Location of waveform samples held in an external delimited file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncapsulatedSource {
    /// Waveform file, optionally qualified with an `archive:inner` or `book:sheet` locator
    pub filename: String,

    /// Byte offset of the item in binary files
    pub item_offset: u64,

    /// Record size (bytes for binary files, columns for delimited files)
    pub record_size: usize,

    /// Bytes per sample in binary files
    pub item_size: usize,

    /// Rows to read (all rows when `None`)
    pub num_rows: Option<usize>,

    /// Zero-based column holding the samples
    pub item_col: usize,

    /// Header rows to skip
    pub header_size: usize,
}

impl EncapsulatedSource {
    /// Source pointing at a named file with a single header row
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            header_size: 1,
            ..Default::default()
        }
    }
}

/// Uniformly-sampled scalar time series
///
/// Samples are stored as digits; physical values are obtained on demand
/// as `digit * scale + origin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    /// Start time
    pub head: Quantity,

    /// Sampling period
    pub increment: Quantity,

    /// Offset of the affine decoding
    pub origin: Quantity,

    /// Scale factor of the affine decoding
    pub scale: Quantity,

    /// Raw samples
    pub digits: Vec<f64>,

    /// Kind of signal
    pub result_type: ResultType,

    /// Reconstructed or recorded
    pub sequence_type: SequenceType,

    /// Display name for reports and figures
    pub display_name: String,

    /// Trace number (None for protocol waveforms)
    pub trace_number: Option<u32>,

    /// Signal name (e.g., voltage, current)
    pub signal_name: String,

    /// External file holding the digits when they are not in memory
    pub source: Option<EncapsulatedSource>,
}

impl Default for Waveform {
    fn default() -> Self {
        Self {
            head: Quantity::new(0.0, "ms"),
            increment: Quantity::new(0.0, "ms"),
            origin: Quantity::new(0.0, ""),
            scale: Quantity::new(1.0, ""),
            digits: Vec::new(),
            result_type: ResultType::Unknown,
            sequence_type: SequenceType::Recorded,
            display_name: String::new(),
            trace_number: None,
            signal_name: String::new(),
            source: None,
        }
    }
}

impl Waveform {
    /// Waveform holding physical values directly (scale 1, origin 0)
    pub fn from_physical(
        values: Vec<f64>,
        unit: &str,
        head: Quantity,
        increment: Quantity,
        result_type: ResultType,
    ) -> Self {
        Self {
            head,
            increment,
            origin: Quantity::new(0.0, unit),
            scale: Quantity::new(1.0, unit),
            digits: values,
            result_type,
            ..Default::default()
        }
    }

    /// Number of samples held in memory
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// True when no samples are held in memory
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Physical unit of the decoded samples
    pub fn unit(&self) -> &str {
        &self.scale.unit
    }

    /// Decoded physical values (`digit * scale + origin`)
    pub fn physical_values(&self) -> Vec<f64> {
        if self.scale.unit != self.origin.unit {
            log::warn!(
                "Signal's scale unit is {} but origin unit is {}",
                self.scale.unit,
                self.origin.unit
            );
        }
        codec::decode_affine(&self.digits, self.scale.value, self.origin.value)
    }

    /// Time of every sample in `increment.unit`, starting at `head`
    pub fn time_values(&self) -> Vec<f64> {
        (0..self.digits.len())
            .map(|i| self.head.value + i as f64 * self.increment.value)
            .collect()
    }

    /// Name of the column holding this waveform in an encapsulated data file
    ///
    /// Traces use `Trace_#<n>_<KIND>_<unit>`; protocol waveforms use `<signal>_<unit>`.
    pub fn column_name(&self) -> String {
        match self.trace_number {
            Some(n) => format!(
                "Trace_#{}_{}_{}",
                n,
                self.result_type.signal_kind(),
                self.unit()
            ),
            None => {
                let signal = if self.signal_name.is_empty() {
                    self.result_type.signal_kind().to_lowercase()
                } else {
                    self.signal_name.clone()
                };
                format!("{}_{}", signal, self.unit())
            }
        }
    }
}
