//! # Metadata Module
//!
//! The values the statistics engine consumes from each photo, and the
//! [`MetadataReader`] seam that produces them.
//!
//! ## Consumed Fields
//! - Focal length in millimetres (may be fractional)
//! - F-number as an exact rational
//! - ISO speed (0 or absent means unknown)
//! - Capture date, taken from the first of several date/time fields that
//!   parses as `YYYY:MM:DD HH:MM:SS`
//!
//! Reading the file format is up to the reader. [`ExifReader`] is the
//! EXIF implementation; tests plug in closures.

mod exif_reader;

pub use exif_reader::ExifReader;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Textual date/time layout used by EXIF
pub const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// An unsigned rational, as stored in EXIF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    pub fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }

    /// Value as a float, `None` for a zero denominator
    pub fn to_f64(self) -> Option<f64> {
        if self.denom == 0 {
            None
        } else {
            Some(self.num as f64 / self.denom as f64)
        }
    }
}

/// Year and month a photo was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CaptureDate {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

/// Decoded metadata of one photo
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    /// Focal length in millimetres
    pub focal_length_mm: Option<f64>,
    /// Aperture F-number
    pub f_number: Option<Rational>,
    /// ISO speed
    pub iso_speed: Option<u32>,
    /// Raw date/time strings in preference order
    pub date_candidates: Vec<String>,
}

impl MetadataRecord {
    /// Capture date from the first candidate that parses
    pub fn capture_date(&self) -> Option<CaptureDate> {
        self.date_candidates
            .iter()
            .find_map(|candidate| parse_capture_date(candidate))
    }
}

/// Parse an EXIF date/time string into a capture date
pub fn parse_capture_date(value: &str) -> Option<CaptureDate> {
    let trimmed = value.trim_end_matches('\0').trim();
    NaiveDateTime::parse_from_str(trimmed, EXIF_DATE_FORMAT)
        .ok()
        .map(|dt| CaptureDate {
            year: dt.year(),
            month: dt.month(),
        })
}

/// Produces metadata for a file.
///
/// `None` means "not a photo": the file could not be opened, carries no
/// metadata, or failed to parse. The caller never learns which.
pub trait MetadataReader: Send + Sync {
    fn read(&self, path: &Path) -> Option<MetadataRecord>;
}

impl<F> MetadataReader for F
where
    F: Fn(&Path) -> Option<MetadataRecord> + Send + Sync,
{
    fn read(&self, path: &Path) -> Option<MetadataRecord> {
        self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exif_date() {
        assert_eq!(
            parse_capture_date("2019:07:14 18:03:22"),
            Some(CaptureDate {
                year: 2019,
                month: 7
            })
        );
    }

    #[test]
    fn strips_nul_padding() {
        assert_eq!(
            parse_capture_date("2021:12:01 09:00:00\0\0").map(|d| d.month),
            Some(12)
        );
    }

    #[test]
    fn rejects_other_layouts() {
        assert_eq!(parse_capture_date("2019-07-14 18:03:22"), None);
        assert_eq!(parse_capture_date("0000:00:00 00:00:00"), None);
        assert_eq!(parse_capture_date(""), None);
    }

    #[test]
    fn first_parseable_candidate_wins() {
        let record = MetadataRecord {
            date_candidates: vec![
                "    :  :     :  :  ".to_string(),
                "2015:03:02 10:00:00".to_string(),
                "2016:04:02 10:00:00".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(
            record.capture_date(),
            Some(CaptureDate {
                year: 2015,
                month: 3
            })
        );
    }

    #[test]
    fn no_candidates_means_no_date() {
        assert_eq!(MetadataRecord::default().capture_date(), None);
    }

    #[test]
    fn rational_conversion() {
        assert_eq!(Rational::new(1, 2).to_f64(), Some(0.5));
        assert_eq!(Rational::new(1, 0).to_f64(), None);
    }

    #[test]
    fn closures_are_readers() {
        let reader = |path: &Path| {
            (path.extension()? == "nef").then(|| MetadataRecord {
                iso_speed: Some(200),
                ..Default::default()
            })
        };
        assert!(reader.read(Path::new("a.nef")).is_some());
        assert!(reader.read(Path::new("a.txt")).is_none());
    }
}
