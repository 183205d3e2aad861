use serde::{Deserialize, Serialize};

use super::{Cursor, Id, LiquidJunctionPotential, Property, Waveform};

/// Types of patch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatchType {
    /// Single-cell patch
    Single,
    /// Population patch
    Population,
    /// Unknown
    #[default]
    Unknown,
}

/// Leak correction method applied to the recorded traces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeakMethod {
    /// No leak correction
    None,
    /// Small-pulse (P/N) subtraction
    SmallPulse,
    /// Fast leak subtraction
    FastLeak,
    /// Sweep subtraction
    Sweep,
    /// Zero-cursor subtraction
    ZeroCursor,
    /// Unknown
    #[default]
    Unknown,
}

impl LeakMethod {
    const ALL: [LeakMethod; 6] = [
        LeakMethod::None,
        LeakMethod::SmallPulse,
        LeakMethod::FastLeak,
        LeakMethod::Sweep,
        LeakMethod::ZeroCursor,
        LeakMethod::Unknown,
    ];

    /// Name used in the LEAKMTH column
    pub fn as_ted_str(&self) -> &'static str {
        match self {
            LeakMethod::None => "CIPA_LEAK_METHOD_NONE",
            LeakMethod::SmallPulse => "CIPA_LEAK_METHOD_SMALL_PULSE",
            LeakMethod::FastLeak => "CIPA_LEAK_METHOD_FAST_LEAK",
            LeakMethod::Sweep => "CIPA_LEAK_METHOD_SWEEP",
            LeakMethod::ZeroCursor => "CIPA_LEAK_METHOD_ZERO_CURSOR",
            LeakMethod::Unknown => "CIPA_LEAK_METHOD_UNKNOWN",
        }
    }

    /// Parse a LEAKMTH value; accepts the full name or its suffix (`SWEEP`)
    pub fn from_ted_str(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        Self::ALL.into_iter().find(|m| {
            let full = m.as_ted_str();
            full == s || full.trim_start_matches("CIPA_LEAK_METHOD_") == s
        })
    }
}

/// Types of recorded results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultType {
    /// Voltage trace
    Voltage,
    /// Current trace
    Current,
    /// Temperature trace
    Temperature,
    /// Series resistance
    SeriesResistance,
    /// Series resistance compensation
    SeriesResistanceCompensation,
    /// Seal resistance
    SealResistance,
    /// Membrane capacitance
    MembraneCapacitance,
    /// Input resistance
    InputResistance,
    /// Unknown
    Unknown,
}

impl ResultType {
    const ALL: [ResultType; 9] = [
        ResultType::Voltage,
        ResultType::Current,
        ResultType::Temperature,
        ResultType::SeriesResistance,
        ResultType::SeriesResistanceCompensation,
        ResultType::SealResistance,
        ResultType::MembraneCapacitance,
        ResultType::InputResistance,
        ResultType::Unknown,
    ];

    /// Signal kind used in waveform column names (`CURRENT`, `VOLTAGE`, ...)
    pub fn signal_kind(&self) -> &'static str {
        match self {
            ResultType::Voltage => "VOLTAGE",
            ResultType::Current => "CURRENT",
            ResultType::Temperature => "TEMPERATURE",
            ResultType::SeriesResistance => "SERIES_RESISTANCE",
            ResultType::SeriesResistanceCompensation => "SERIES_RESISTANCE_COMPENSATION",
            ResultType::SealResistance => "SEAL_RESISTANCE",
            ResultType::MembraneCapacitance => "MEMBRANE_CAPACITANCE",
            ResultType::InputResistance => "INPUT_RESISTANCE",
            ResultType::Unknown => "UNKNOWN",
        }
    }

    /// Name used in the RESTYPE column
    pub fn as_ted_str(&self) -> String {
        format!("CIPA_RESULT_TYPE_{}", self.signal_kind())
    }

    /// Parse a RESTYPE value; accepts the full name or the signal kind
    pub fn from_ted_str(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        let kind = s.strip_prefix("CIPA_RESULT_TYPE_").unwrap_or(&s);
        Self::ALL.into_iter().find(|t| t.signal_kind() == kind)
    }

    /// Map the signal kind of a waveform column; unrecognized kinds are `Unknown`
    pub fn from_signal_kind(kind: &str) -> Self {
        let kind = kind.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.signal_kind().eq_ignore_ascii_case(kind))
            .unwrap_or(ResultType::Unknown)
    }

    /// Split `<KIND>_<rest>` on the longest known signal kind, ignoring case
    pub fn strip_signal_kind(text: &str) -> Option<(Self, &str)> {
        Self::ALL
            .into_iter()
            .filter(|t| {
                let kind = t.signal_kind();
                text.get(..kind.len()).is_some_and(|p| p.eq_ignore_ascii_case(kind))
                    && text.as_bytes().get(kind.len()) == Some(&b'_')
            })
            .max_by_key(|t| t.signal_kind().len())
            .and_then(|t| text.get(t.signal_kind().len() + 1..).map(|rest| (t, rest)))
    }
}

/// Cell used in the experiment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell identifier
    pub id: Id,

    /// Cell properties
    pub properties: Vec<Property>,
}

impl Cell {
    /// Create a cell
    pub fn new(id: Id, properties: Vec<Property>) -> Self {
        Self { id, properties }
    }
}

/// One recorded signal trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceResult {
    /// Trace number (1-based, sequential across the experiment)
    pub trace_number: u32,

    /// Whether the trace is used in subsequent analyses
    pub valid: bool,

    /// Kind of signal
    pub result_type: ResultType,

    /// Elapsed time from the beginning of the experiment
    pub elapsed_time: f64,

    /// Unit of `elapsed_time`
    pub elapsed_time_unit: String,

    /// Recorded waveform
    pub waveform: Waveform,

    /// Cursors evaluated on this trace
    pub cursors: Vec<Cursor>,
}

impl TraceResult {
    /// Create a result without cursors
    pub fn new(
        trace_number: u32,
        valid: bool,
        result_type: ResultType,
        elapsed_time: f64,
        elapsed_time_unit: impl Into<String>,
        waveform: Waveform,
    ) -> Self {
        Self {
            trace_number,
            valid,
            result_type,
            elapsed_time,
            elapsed_time_unit: elapsed_time_unit.into(),
            waveform,
            cursors: Vec::new(),
        }
    }

    /// Evaluated value of the named cursor
    pub fn cursor_value(&self, name: &str) -> Option<f64> {
        self.cursors
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| c.result.as_ref())
            .map(|r| r.value)
    }
}

/// One analysis pass over an experiment's cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    /// Laboratory conducting the assessment
    pub lab: String,

    /// Evaluation method
    pub method: String,

    /// Cell the results come from
    pub cell: Cell,

    /// Type of patch
    pub patch_type: PatchType,

    /// Plate identifier (automated systems)
    pub plate_id: String,

    /// Well identifier (automated systems)
    pub well_id: String,

    /// Leak correction method
    pub leak_method: LeakMethod,

    /// Per-cell junction potential overriding the trial default
    pub ljp: Option<LiquidJunctionPotential>,

    /// Cursor definitions shared by every trace
    pub cursors: Vec<Cursor>,

    /// One entry per recorded trace/signal
    pub results: Vec<TraceResult>,
}

impl Results {
    /// Create an empty results set for a cell
    pub fn new(cell: Cell, patch_type: PatchType, leak_method: LeakMethod) -> Self {
        Self {
            cell,
            patch_type,
            leak_method,
            ..Default::default()
        }
    }
}
