use crate::error::TedError;
use crate::model::{ResultType, Waveform};
use crate::schema::{TIME_COLUMN_LABEL, TRACE_COLUMN_PREFIX};
use crate::table::{Sheet, TableValue};
use crate::units::TimeAxis;

/// Column of a frame matched to a trace number
#[derive(Debug, Clone, PartialEq)]
pub struct TraceColumn<'a> {
    /// Zero-based column index in the frame
    pub index: usize,

    /// Full column header
    pub name: &'a str,

    /// Signal kind parsed from the header (`CURRENT`, `SERIES_RESISTANCE`, ...)
    pub kind: String,

    /// Result type mapped from `kind`
    pub result_type: ResultType,

    /// Unit parsed from the header (after the signal kind)
    pub unit: String,

    /// Physical samples
    pub values: &'a [f64],
}

/// Waveforms sharing one time axis, laid out column-wise
///
/// Column 0 is the time axis; every other column holds one waveform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveformFrame {
    headers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl WaveformFrame {
    /// Build a frame from waveforms sampled on the same axis
    ///
    /// The first waveform provides the time column; every waveform must have
    /// the same number of samples.
    pub fn from_waveforms<'a, I>(waveforms: I) -> Result<Self, TedError>
    where
        I: IntoIterator<Item = &'a Waveform>,
    {
        let mut frame = WaveformFrame::default();

        for waveform in waveforms {
            if frame.columns.is_empty() {
                frame.headers.push(format!(
                    "{}_{}",
                    TIME_COLUMN_LABEL, waveform.increment.unit
                ));
                frame.columns.push(waveform.time_values());
            }

            let name = waveform.column_name();
            if waveform.len() != frame.len() {
                return Err(TedError::encapsulated(
                    name,
                    format!(
                        "waveform has {} samples but the shared time axis has {}",
                        waveform.len(),
                        frame.len()
                    ),
                ));
            }
            frame.headers.push(name);
            frame.columns.push(waveform.physical_values());
        }

        if frame.columns.is_empty() {
            return Err(TedError::encapsulated(
                "waveforms",
                "no waveforms to store",
            ));
        }
        Ok(frame)
    }

    /// Read a frame from a sheet whose first column is the time axis
    pub fn from_sheet(sheet: &Sheet) -> Result<Self, TedError> {
        if sheet.headers.is_empty() {
            return Err(TedError::parse_file(
                sheet.name.as_str(),
                "waveform file has no columns",
            ));
        }

        let columns = (0..sheet.headers.len())
            .map(|col| {
                sheet
                    .column_values(col)
                    .iter()
                    .map(TableValue::as_f64_or_nan)
                    .collect()
            })
            .collect();

        Ok(Self {
            headers: sheet.headers.clone(),
            columns,
        })
    }

    /// Lay the frame out as a sheet
    pub fn to_sheet(&self, name: impl Into<String>) -> Sheet {
        let mut sheet = Sheet::new(name, self.headers.clone());
        for row in 0..self.len() {
            sheet.push_row(
                self.columns
                    .iter()
                    .map(|c| TableValue::from(c[row]))
                    .collect(),
            );
        }
        sheet
    }

    /// Number of samples per column
    pub fn len(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    /// True when the frame holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column headers, time column first
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Time column as stored
    pub fn time(&self) -> &[f64] {
        self.columns.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Unit of the time column (`t_ms` → `ms`)
    pub fn time_unit(&self) -> String {
        self.headers
            .first()
            .and_then(|h| h.rsplit('_').next())
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Time axis normalised to milliseconds
    pub fn time_axis(&self) -> TimeAxis {
        let time = self.time();
        let head = time.first().copied().unwrap_or(0.0);
        let step = match time {
            [t0, t1, ..] => t1 - t0,
            _ => 0.0,
        };
        TimeAxis::normalize(head, step, &self.time_unit())
    }

    /// Samples of the column with exactly this header
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.headers
            .iter()
            .position(|h| h == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Samples of a column by zero-based index (0 is the time column)
    pub fn column_at(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Columns recorded for a trace (`Trace_#<n>_...`, case-insensitive)
    pub fn trace_columns(&self, trace_number: u32) -> Vec<TraceColumn<'_>> {
        let prefix = format!("{}{}_", TRACE_COLUMN_PREFIX, trace_number).to_lowercase();

        self.headers
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, h)| h.to_lowercase().starts_with(&prefix))
            .map(|(i, h)| {
                let rest = h.get(prefix.len()..).unwrap_or_default();
                let (result_type, kind, unit) = match ResultType::strip_signal_kind(rest) {
                    Some((result_type, unit)) => {
                        (result_type, result_type.signal_kind().to_string(), unit)
                    }
                    None => {
                        let (kind, unit) = rest.rsplit_once('_').unwrap_or(("", rest));
                        (ResultType::from_signal_kind(kind), kind.to_uppercase(), unit)
                    }
                };
                TraceColumn {
                    index: i,
                    name: h.as_str(),
                    result_type,
                    kind,
                    unit: unit.replace('\'', ""),
                    values: self.columns[i].as_slice(),
                }
            })
            .collect()
    }
}
