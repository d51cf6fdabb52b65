//! # Normalize Module
//!
//! Maps raw, possibly missing metadata values to canonical keys that can
//! be used for counting.
//!
//! ## Keys
//! - [`FocalKey`] - focal length rounded to whole millimetres
//! - [`ApertureKey`] - F-number as a fixed-point value (x10), so f/1.8,
//!   f/2 and f/2.8 are exact map keys instead of floats
//!
//! Both keys have an explicit `Unknown` variant. The integer sentinels
//! ([`UNKNOWN`], [`OTHERS`]) only appear at the display boundary through
//! the `encoded()` methods.

use crate::core::metadata::Rational;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Encoded value for a missing or implausible aperture
pub const UNKNOWN: i32 = -1;

/// Encoded value reserved for the threshold "other" bucket.
///
/// Also used as the display key for an unknown focal length, since a focal
/// length of 0 mm is never a real measurement.
pub const OTHERS: i32 = 0;

/// Fixed-point scale applied to F-numbers
pub const APERTURE_SCALE: u64 = 10;

/// Normalized aperture
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ApertureKey {
    /// Missing, zero or below f/0.5
    Unknown,
    /// F-number multiplied by [`APERTURE_SCALE`] and rounded
    Tenths(u32),
}

impl ApertureKey {
    /// Integer encoding used by the original table layout
    pub fn encoded(self) -> i32 {
        match self {
            ApertureKey::Unknown => UNKNOWN,
            ApertureKey::Tenths(t) => i32::try_from(t).unwrap_or(i32::MAX),
        }
    }

    /// The F-number this key stands for
    pub fn f_number(self) -> Option<f64> {
        match self {
            ApertureKey::Unknown => None,
            ApertureKey::Tenths(t) => Some(t as f64 / APERTURE_SCALE as f64),
        }
    }
}

impl fmt::Display for ApertureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApertureKey::Unknown => write!(f, "unknown"),
            ApertureKey::Tenths(t) => {
                let scale = APERTURE_SCALE as u32;
                if t % scale == 0 {
                    write!(f, "f/{}", t / scale)
                } else {
                    write!(f, "f/{}.{}", t / scale, t % scale)
                }
            }
        }
    }
}

/// Normalized focal length
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FocalKey {
    /// Missing or non-positive focal length
    Unknown,
    /// Focal length in whole millimetres
    Millimetres(u32),
}

impl FocalKey {
    /// Integer encoding, with 0 standing for "unknown"
    pub fn encoded(self) -> i32 {
        match self {
            FocalKey::Unknown => OTHERS,
            FocalKey::Millimetres(mm) => i32::try_from(mm).unwrap_or(i32::MAX),
        }
    }
}

impl fmt::Display for FocalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocalKey::Unknown => write!(f, "unknown"),
            FocalKey::Millimetres(mm) => write!(f, "{} mm", mm),
        }
    }
}

/// Normalize an F-number.
///
/// The rational is converted without going through a float: the result is
/// `round(num * 10 / denom)`. Values below f/0.5 are treated as garbage.
pub fn normalize_aperture(raw: Option<Rational>) -> ApertureKey {
    let Some(Rational { num, denom }) = raw else {
        return ApertureKey::Unknown;
    };

    let (num, denom) = (num as u64, denom as u64);

    // value < 0.5  <=>  2 * num < denom (also catches denom == 0 with num == 0)
    if denom == 0 || 2 * num < denom {
        return ApertureKey::Unknown;
    }

    let tenths = (2 * num * APERTURE_SCALE + denom) / (2 * denom);
    match u32::try_from(tenths) {
        Ok(0) | Err(_) => ApertureKey::Unknown,
        Ok(t) => ApertureKey::Tenths(t),
    }
}

/// Normalize a focal length in millimetres, rounding to the nearest mm.
pub fn normalize_focal_length(raw: Option<f64>) -> FocalKey {
    match raw.filter(|v| v.is_finite()).map(f64::round) {
        Some(mm) if mm > 0.0 && mm <= u32::MAX as f64 => FocalKey::Millimetres(mm as u32),
        _ => FocalKey::Unknown,
    }
}
