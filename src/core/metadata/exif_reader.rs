//! EXIF metadata reader backed by kamadak-exif.

use super::{MetadataReader, MetadataRecord, Rational};
use exif::{Context, Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// `DateTimeOriginal` written into IFD0 instead of the EXIF IFD
const TIFF_DATE_TIME_ORIGINAL: Tag = Tag(Context::Tiff, 0x9003);

/// `FNumber` written into IFD0 instead of the EXIF IFD
const TIFF_F_NUMBER: Tag = Tag(Context::Tiff, 0x829d);

/// Date/time tags in order of preference
const DATE_TAGS: [Tag; 4] = [
    Tag::DateTimeDigitized,
    TIFF_DATE_TIME_ORIGINAL,
    Tag::DateTimeOriginal,
    Tag::DateTime,
];

/// Reads focal length, F-number, ISO and dates from EXIF
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifReader;

impl ExifReader {
    pub fn new() -> Self {
        Self
    }

    fn decode(exif: &Exif) -> MetadataRecord {
        let focal_length_mm = exif
            .get_field(Tag::FocalLength, In::PRIMARY)
            .and_then(|field| get_f64_value(&field.value));

        let f_number = [Tag::FNumber, TIFF_F_NUMBER]
            .into_iter()
            .filter_map(|tag| exif.get_field(tag, In::PRIMARY))
            .find_map(|field| get_rational_value(&field.value));

        let iso_speed = exif
            .get_field(Tag::PhotographicSensitivity, In::PRIMARY)
            .and_then(|field| get_u32_value(&field.value));

        let date_candidates = DATE_TAGS
            .iter()
            .filter_map(|tag| exif.get_field(*tag, In::PRIMARY))
            .filter_map(|field| get_string_value(&field.value))
            .collect();

        MetadataRecord {
            focal_length_mm,
            f_number,
            iso_speed,
            date_candidates,
        }
    }
}

impl MetadataReader for ExifReader {
    fn read(&self, path: &Path) -> Option<MetadataRecord> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cannot open file");
                return None;
            }
        };

        let mut bufreader = BufReader::new(&file);
        match Reader::new().read_from_container(&mut bufreader) {
            Ok(exif) => Some(Self::decode(&exif)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no usable EXIF");
                None
            }
        }
    }
}

/// Helper to extract an exact rational from an EXIF value
fn get_rational_value(value: &Value) -> Option<Rational> {
    match value {
        Value::Rational(vec) => vec.first().map(|r| Rational::new(r.num, r.denom)),
        Value::SRational(vec) => vec.first().and_then(|r| {
            Some(Rational::new(u32::try_from(r.num).ok()?, u32::try_from(r.denom).ok()?))
        }),
        _ => None,
    }
}

/// Helper to extract a float from rational or integer EXIF values
fn get_f64_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Rational(vec) => vec.first().map(|r| r.to_f64()),
        Value::SRational(vec) => vec.first().map(|r| r.to_f64()),
        _ => get_u32_value(value).map(f64::from),
    };
    number.filter(|v| v.is_finite())
}

/// Helper to extract u32 from various EXIF value types
fn get_u32_value(value: &Value) -> Option<u32> {
    match value {
        Value::Long(vec) => vec.first().copied(),
        Value::Short(vec) => vec.first().map(|v| *v as u32),
        _ => None,
    }
}

/// Helper to extract string from EXIF ASCII value
fn get_string_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                let trimmed = s.trim_end_matches('\0').trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}
