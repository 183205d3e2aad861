//! Fixed-point sample encoding.
//!
//! Waveform digits decode to physical quantities with the affine rule
//! `physical = digit * scale + origin`. This module provides that decoding and
//! the inverse 16-bit quantisation used when samples are stored as integers.

use serde::{Deserialize, Serialize};

/// Samples quantised to 16-bit integers with their decoding parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Int16Samples {
    /// Quantised samples
    pub digits: Vec<i16>,

    /// Physical value of a zero digit
    pub origin: f64,

    /// Physical value of one digit step
    pub scale: f64,
}

impl Int16Samples {
    /// Decode back to physical values
    pub fn to_physical(&self) -> Vec<f64> {
        sampled_to_physical(&self.digits, self.origin, self.scale)
    }
}

/// Decode raw digits to physical values
pub fn decode_affine(digits: &[f64], scale: f64, origin: f64) -> Vec<f64> {
    digits.iter().map(|d| d * scale + origin).collect()
}

/// Encode a physical value as the nearest digit for the given scale and origin
///
/// Returns the digit as `i64`; callers narrow it to their storage width.
pub fn value_to_int(value: f64, scale: f64, origin: f64) -> i64 {
    if scale == 0.0 {
        return 0;
    }
    ((value - origin) / scale).round() as i64
}

/// Quantise physical values to 16-bit digits spanning the full `i16` range
///
/// The origin is placed at the midpoint of the value range so that the
/// minimum and maximum map to `i16::MIN + 1` and `i16::MAX`. A constant
/// signal uses a unit scale. Non-finite values are encoded as zero digits.
pub fn physical_to_int16(values: &[f64]) -> Int16Samples {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !min.is_finite() {
        return Int16Samples {
            digits: vec![0; values.len()],
            origin: 0.0,
            scale: 1.0,
        };
    }

    let origin = (max + min) / 2.0;
    let amplitude = max - min;
    let scale = if amplitude > 0.0 {
        amplitude / (2.0 * f64::from(i16::MAX))
    } else {
        1.0
    };

    let digits = values
        .iter()
        .map(|v| {
            if v.is_finite() {
                value_to_int(*v, scale, origin).clamp(i64::from(i16::MIN), i64::from(i16::MAX))
                    as i16
            } else {
                0
            }
        })
        .collect();

    Int16Samples {
        digits,
        origin,
        scale,
    }
}

/// Convert 16-bit digits to physical values
pub fn sampled_to_physical(digits: &[i16], origin: f64, scale: f64) -> Vec<f64> {
    digits
        .iter()
        .map(|d| f64::from(*d) * scale + origin)
        .collect()
}
