//! Time-unit handling for waveform time axes and elapsed times.
//!
//! Everything is normalised to milliseconds: seconds are scaled by 1e3,
//! microseconds by 1e-3. Unrecognised units are read as milliseconds unless
//! the sampling step is below [`SECONDS_STEP_THRESHOLD`], in which case the
//! values are assumed to be seconds. That inference is a heuristic and is
//! reported through [`TimeAxis::inferred`].

use std::fmt;

/// Step size under which an axis with an unrecognised unit is read as seconds
pub const SECONDS_STEP_THRESHOLD: f64 = 0.001;

/// Recognised time units
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeUnit {
    /// Seconds
    Seconds,
    /// Milliseconds
    Milliseconds,
    /// Microseconds
    Microseconds,
    /// Anything else, kept verbatim
    Unknown(String),
}

impl TimeUnit {
    /// Parse a unit label (case-insensitive, `µs` accepted)
    pub fn parse(unit: &str) -> Self {
        match unit.trim().to_lowercase().as_str() {
            "s" | "sec" | "second" | "seconds" => TimeUnit::Seconds,
            "ms" | "msec" | "millisecond" | "milliseconds" => TimeUnit::Milliseconds,
            "us" | "µs" | "usec" | "microsecond" | "microseconds" => TimeUnit::Microseconds,
            other => TimeUnit::Unknown(other.to_string()),
        }
    }

    /// Factor converting a value in this unit to milliseconds, if known
    pub fn to_ms_factor(&self) -> Option<f64> {
        match self {
            TimeUnit::Seconds => Some(1e3),
            TimeUnit::Milliseconds => Some(1.0),
            TimeUnit::Microseconds => Some(1e-3),
            TimeUnit::Unknown(_) => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Seconds => f.write_str("s"),
            TimeUnit::Milliseconds => f.write_str("ms"),
            TimeUnit::Microseconds => f.write_str("us"),
            TimeUnit::Unknown(u) => f.write_str(u),
        }
    }
}

/// Convert a single time value to milliseconds; unknown units are taken as milliseconds
pub fn to_milliseconds(value: f64, unit: &str) -> f64 {
    value * TimeUnit::parse(unit).to_ms_factor().unwrap_or(1.0)
}

/// Time axis normalised to milliseconds
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    /// First time value in ms
    pub head_ms: f64,

    /// Sampling period in ms
    pub step_ms: f64,

    /// Unit the raw values were read in
    pub unit: TimeUnit,

    /// True when the unit was not recognised and the scale was guessed
    pub inferred: bool,
}

impl TimeAxis {
    /// Normalise a head/step pair given in `unit`
    pub fn normalize(head: f64, step: f64, unit: &str) -> Self {
        let parsed = TimeUnit::parse(unit);
        let (unit, inferred) = match parsed {
            TimeUnit::Unknown(_) if step < SECONDS_STEP_THRESHOLD => (TimeUnit::Seconds, true),
            TimeUnit::Unknown(_) => (TimeUnit::Milliseconds, true),
            known => (known, false),
        };
        let factor = unit.to_ms_factor().unwrap_or(1.0);
        Self {
            head_ms: head * factor,
            step_ms: step * factor,
            unit,
            inferred,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_units() {
        assert_eq!(to_milliseconds(2.0, "s"), 2000.0);
        assert_eq!(to_milliseconds(2.0, "ms"), 2.0);
        assert_eq!(to_milliseconds(2000.0, "us"), 2.0);
        assert_eq!(to_milliseconds(2.0, "S"), 2000.0);
    }

    #[test]
    fn test_unknown_unit_with_small_step_reads_as_seconds() {
        let axis = TimeAxis::normalize(0.0, 0.0001, "t");
        assert!(axis.inferred);
        assert_eq!(axis.unit, TimeUnit::Seconds);
        assert!((axis.step_ms - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_unit_with_regular_step_reads_as_ms() {
        let axis = TimeAxis::normalize(1.0, 0.2, "");
        assert!(axis.inferred);
        assert_eq!(axis.unit, TimeUnit::Milliseconds);
        assert_eq!(axis.head_ms, 1.0);
        assert_eq!(axis.step_ms, 0.2);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = TimeAxis::normalize(0.5, 0.01, "s");
        let twice = TimeAxis::normalize(once.head_ms, once.step_ms, "ms");
        assert_eq!(once.head_ms, twice.head_ms);
        assert_eq!(once.step_ms, twice.step_ms);
    }
}
