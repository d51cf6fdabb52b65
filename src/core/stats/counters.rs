//! Incremental tallies keyed by normalized values.

use crate::core::metadata::CaptureDate;
use crate::core::normalize::{ApertureKey, FocalKey};
use std::collections::BTreeMap;

/// Photos taken at one focal length, broken down by aperture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocalLengthStat {
    pub focal: FocalKey,
    /// Photos at this focal length, any aperture
    pub total_photos: u64,
    /// Photos per aperture at this focal length
    pub apertures: BTreeMap<ApertureKey, u64>,
}

impl FocalLengthStat {
    pub fn new(focal: FocalKey) -> Self {
        Self {
            focal,
            total_photos: 0,
            apertures: BTreeMap::new(),
        }
    }

    pub fn add_photo(&mut self, aperture: ApertureKey) {
        *self.apertures.entry(aperture).or_insert(0) += 1;
        self.total_photos += 1;
    }

    pub fn count(&self, aperture: ApertureKey) -> u64 {
        self.apertures.get(&aperture).copied().unwrap_or(0)
    }
}

/// Photos taken at one aperture, any focal length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApertureStat {
    pub aperture: ApertureKey,
    pub photos: u64,
}

impl ApertureStat {
    pub fn new(aperture: ApertureKey) -> Self {
        Self {
            aperture,
            photos: 0,
        }
    }
}

/// Photos per month of one year.
///
/// Only months that actually have photos are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearStat {
    pub year: i32,
    /// Sum over all months
    pub total: u64,
    /// Month (1-12) -> photos
    pub months: BTreeMap<u32, u64>,
}

impl YearStat {
    /// Synthetic month key standing for the whole year
    pub const YEAR_TOTAL: u32 = 0;

    pub fn new(year: i32) -> Self {
        Self {
            year,
            total: 0,
            months: BTreeMap::new(),
        }
    }

    pub fn add_photo(&mut self, month: u32) {
        *self.months.entry(month).or_insert(0) += 1;
        self.total += 1;
    }

    /// Photos in `month`, where [`YearStat::YEAR_TOTAL`] gives the year total
    pub fn count(&self, month: u32) -> u64 {
        if month == Self::YEAR_TOTAL {
            self.total
        } else {
            self.months.get(&month).copied().unwrap_or(0)
        }
    }
}

/// Photos per capture year and month
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateStats {
    pub years: BTreeMap<i32, YearStat>,
    /// Photos with a usable capture date
    pub total: u64,
}

impl DateStats {
    pub fn add_photo(&mut self, date: CaptureDate) {
        self.years
            .entry(date.year)
            .or_insert_with(|| YearStat::new(date.year))
            .add_photo(date.month);
        self.total += 1;
    }
}

/// Photos per ISO speed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsoStat {
    pub counts: BTreeMap<u32, u64>,
    /// Photos with a known ISO speed
    pub total: u64,
}

impl IsoStat {
    pub fn add_photo(&mut self, iso: u32) {
        *self.counts.entry(iso).or_insert(0) += 1;
        self.total += 1;
    }
}
