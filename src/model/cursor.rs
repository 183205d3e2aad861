use serde::{Deserialize, Serialize};

/// Operation applied to the signal within the cursor window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorType {
    /// Mean value within the window
    Average,
    /// Maximum value within the window
    Maximum,
    /// Minimum value within the window
    Minimum,
    /// Any other assessment (see [`Cursor::custom_type`])
    Custom,
}

impl CursorType {
    /// Name used in the CURSORT column
    pub fn as_ted_str(&self) -> &'static str {
        match self {
            CursorType::Average => "AVERAGE",
            CursorType::Maximum => "MAXIMUM",
            CursorType::Minimum => "MINIMUM",
            CursorType::Custom => "CUSTOM",
        }
    }

    /// Parse a CURSORT value (case-insensitive)
    pub fn from_ted_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "AVERAGE" => Some(CursorType::Average),
            "MAXIMUM" => Some(CursorType::Maximum),
            "MINIMUM" => Some(CursorType::Minimum),
            "CUSTOM" => Some(CursorType::Custom),
            _ => None,
        }
    }
}

/// Scalar value obtained by evaluating a cursor on one trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorResult {
    /// Evaluated value
    pub value: f64,

    /// Unit of the value (e.g., pA)
    pub unit: String,
}

impl CursorResult {
    /// Create a cursor result
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// Named time window used to derive one scalar measurement from a waveform
///
/// Definitions live in [`Results::cursors`](super::Results::cursors); the
/// cursors attached to each [`TraceResult`](super::TraceResult) carry the
/// per-trace [`CursorResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    /// Cursor name, also the ResultsWide column name
    pub name: String,

    /// Window start time
    pub start: f64,

    /// Window end time
    pub end: f64,

    /// Unit of `start` and `end`
    pub time_unit: String,

    /// Evaluation mode (None when only the result is known)
    pub cursor_type: Option<CursorType>,

    /// Free-text label for [`CursorType::Custom`] cursors
    pub custom_type: String,

    /// Evaluated result for one trace
    pub result: Option<CursorResult>,
}

impl Cursor {
    /// Create a cursor definition
    pub fn new(
        name: impl Into<String>,
        start: f64,
        end: f64,
        time_unit: impl Into<String>,
        cursor_type: CursorType,
    ) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            time_unit: time_unit.into(),
            cursor_type: Some(cursor_type),
            custom_type: String::new(),
            result: None,
        }
    }

    /// Create a bare cursor that only carries a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: f64::NAN,
            end: f64::NAN,
            time_unit: String::new(),
            cursor_type: None,
            custom_type: String::new(),
            result: None,
        }
    }

    /// Copy of this cursor bound to an evaluated result
    pub fn evaluated(&self, result: CursorResult) -> Self {
        Self {
            result: Some(result),
            ..self.clone()
        }
    }
}
