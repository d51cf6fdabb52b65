//! # Stats Module
//!
//! The aggregation engine: [`PhotoStatistics`] owns every counter and the
//! scan that fills them.
//!
//! ## Lifecycle
//! 1. Create an instance (or call [`PhotoStatistics::clear`] on an old one).
//! 2. Call [`PhotoStatistics::gather_statistics`].
//! 3. Build tables from the finished statistics.
//!
//! Counters are only mutated while a scan runs. Dimensions are independent:
//! a photo without a capture date still counts towards focal length,
//! aperture and ISO.

mod counters;
mod gather;

pub use counters::{ApertureStat, DateStats, FocalLengthStat, IsoStat, YearStat};

use crate::core::metadata::MetadataRecord;
use crate::core::normalize::{normalize_aperture, normalize_focal_length, ApertureKey, FocalKey};
use std::collections::BTreeMap;

/// Accumulated statistics of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoStatistics {
    focals: BTreeMap<FocalKey, FocalLengthStat>,
    apertures: BTreeMap<ApertureKey, ApertureStat>,
    dates: DateStats,
    iso: IsoStat,
    /// Every regular file seen, matched or not
    total_files: u64,
    /// Files that yielded metadata
    total_photos: u64,
    /// Photos counted in the focal length dimension
    known_focals: u64,
}

impl PhotoStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all counters before reusing the instance for another scan
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Count one photo's metadata in every dimension it carries
    pub fn record_photo(&mut self, record: &MetadataRecord) {
        self.total_photos += 1;

        let focal = normalize_focal_length(record.focal_length_mm);
        let aperture = normalize_aperture(record.f_number);

        self.focals
            .entry(focal)
            .or_insert_with(|| FocalLengthStat::new(focal))
            .add_photo(aperture);
        self.apertures
            .entry(aperture)
            .or_insert_with(|| ApertureStat::new(aperture))
            .photos += 1;
        self.known_focals += 1;

        if let Some(iso) = record.iso_speed.filter(|iso| *iso > 0) {
            self.iso.add_photo(iso);
        }

        if let Some(date) = record.capture_date() {
            self.dates.add_photo(date);
        }
    }

    pub(crate) fn record_file_examined(&mut self) {
        self.total_files += 1;
    }

    pub fn total_files(&self) -> u64 {
        self.total_files
    }

    pub fn total_photos(&self) -> u64 {
        self.total_photos
    }

    pub fn known_focals(&self) -> u64 {
        self.known_focals
    }

    /// Photos with a usable capture date
    pub fn dated_photos(&self) -> u64 {
        self.dates.total
    }

    /// Photos with a known ISO speed
    pub fn iso_photos(&self) -> u64 {
        self.iso.total
    }

    pub fn focals(&self) -> &BTreeMap<FocalKey, FocalLengthStat> {
        &self.focals
    }

    pub fn apertures(&self) -> &BTreeMap<ApertureKey, ApertureStat> {
        &self.apertures
    }

    pub fn years(&self) -> &BTreeMap<i32, YearStat> {
        &self.dates.years
    }

    pub fn iso(&self) -> &IsoStat {
        &self.iso
    }
}
