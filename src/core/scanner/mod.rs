//! # Scanner Module
//!
//! Finds candidate photo files under a root directory and describes how
//! a scan is going.
//!
//! ## Pieces
//! - [`ExtensionFilter`] - case-insensitive, dot-stripped extension matching
//! - [`walk_files`] - deterministic recursive enumeration of regular files
//! - [`ScanStage`], [`Progress`], [`ScanStatus`] - what the aggregator
//!   reports to its host
//!
//! ## Example
//! ```rust,ignore
//! use photo_stat::core::scanner::{walk_files, ExtensionFilter};
//!
//! let filter = ExtensionFilter::new(["nef", "cr2"]);
//! let raws: Vec<_> = walk_files(root).filter(|p| filter.matches(p)).collect();
//! ```

mod filter;
mod walker;

pub use filter::{normalize_extension, ExtensionFilter};
pub use walker::{validate_root, walk_files};

use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two coarse phases of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStage {
    /// Walking the directory tree
    SearchingFiles,
    /// Reading metadata of matched files
    ProcessingMetadata,
}

impl fmt::Display for ScanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanStage::SearchingFiles => write!(f, "Searching files"),
            ScanStage::ProcessingMetadata => write!(f, "Processing metadata"),
        }
    }
}

/// How far along the current stage is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Progress {
    /// Total unknown, show a pulsing indicator
    Indeterminate,
    /// Fraction of work done, in `[0, 1]`
    Fraction(f64),
}

impl Progress {
    /// Single-float encoding where a negative value means indeterminate
    pub fn as_fraction(self) -> f64 {
        match self {
            Progress::Indeterminate => -1.0,
            Progress::Fraction(f) => f,
        }
    }
}

/// Outcome of `gather_statistics`
#[derive(Debug)]
pub enum ScanStatus {
    /// Every matched file was processed
    Finished,
    /// The host asked to stop
    Cancelled,
    /// The root directory could not be scanned; counts as completed
    Failed(ScanError),
}

impl ScanStatus {
    /// `false` only when the host cancelled the scan
    pub fn completed(&self) -> bool {
        !matches!(self, ScanStatus::Cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ScanStatus::Cancelled)
    }

    pub fn error(&self) -> Option<&ScanError> {
        match self {
            ScanStatus::Failed(e) => Some(e),
            _ => None,
        }
    }
}
