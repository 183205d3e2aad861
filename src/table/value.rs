use std::fmt;

/// A single table cell
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TableValue {
    /// Empty cell
    #[default]
    Empty,
    /// Numeric cell
    Number(f64),
    /// Text cell
    Text(String),
    /// Boolean cell
    Bool(bool),
}

impl TableValue {
    /// Parse a delimited-text field: empty, number, or text
    pub fn parse(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            TableValue::Empty
        } else if let Ok(v) = trimmed.parse::<f64>() {
            TableValue::Number(v)
        } else {
            TableValue::Text(field.to_string())
        }
    }

    /// True for empty cells and blank text
    pub fn is_empty(&self) -> bool {
        match self {
            TableValue::Empty => true,
            TableValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Cell rendered as text; integral numbers lose their fractional part
    pub fn as_text(&self) -> String {
        match self {
            TableValue::Empty => String::new(),
            TableValue::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                format!("{}", *v as i64)
            }
            TableValue::Number(v) => v.to_string(),
            TableValue::Text(s) => s.clone(),
            TableValue::Bool(b) => b.to_string(),
        }
    }

    /// Numeric value; text is parsed, empty cells yield `None`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TableValue::Number(v) => Some(*v),
            TableValue::Text(s) => s.trim().parse().ok(),
            TableValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            TableValue::Empty => None,
        }
    }

    /// Numeric value or NaN
    pub fn as_f64_or_nan(&self) -> f64 {
        self.as_f64().unwrap_or(f64::NAN)
    }

    /// Non-negative integral value (trace numbers)
    pub fn as_u32(&self) -> Option<u32> {
        self.as_f64()
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX))
            .map(|v| v as u32)
    }
}

impl fmt::Display for TableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<f64> for TableValue {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            TableValue::Empty
        } else {
            TableValue::Number(v)
        }
    }
}

impl From<u32> for TableValue {
    fn from(v: u32) -> Self {
        TableValue::Number(f64::from(v))
    }
}

impl From<&str> for TableValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            TableValue::Empty
        } else {
            TableValue::Text(s.to_string())
        }
    }
}

impl From<String> for TableValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            TableValue::Empty
        } else {
            TableValue::Text(s)
        }
    }
}

impl From<&String> for TableValue {
    fn from(s: &String) -> Self {
        TableValue::from(s.as_str())
    }
}
