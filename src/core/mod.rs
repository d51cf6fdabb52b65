//! # Core Module
//!
//! The GUI-agnostic photo statistics engine.
//!
//! ## Modules
//! - `scanner` - Finds candidate files under a root directory
//! - `metadata` - Reads focal length, aperture, ISO and capture date
//! - `normalize` - Turns raw metadata into counting keys
//! - `stats` - Accumulates counters during a scan
//! - `table` - Builds and renders pivot tables from the counters
//! - `pipeline` - Runs a scan on a worker with events and cancellation

pub mod metadata;
pub mod normalize;
pub mod pipeline;
pub mod scanner;
pub mod stats;
pub mod table;

// Re-export commonly used types
pub use metadata::{ExifReader, MetadataReader, MetadataRecord};
pub use normalize::{ApertureKey, FocalKey};
pub use scanner::{ExtensionFilter, Progress, ScanStage, ScanStatus};
pub use stats::PhotoStatistics;
pub use table::{StatTable, TableBuilder};
