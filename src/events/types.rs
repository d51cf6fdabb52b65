//! Event type definitions for progress reporting.

use crate::core::scanner::{Progress, ScanStage};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by a statistics scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Scan phase events
    Scan(ScanEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events while the aggregator runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Moving to a new stage
    StageChanged { stage: ScanStage },
    /// Progress update
    Progress(ScanProgress),
}

/// Progress information during a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanProgress {
    /// Stage this update belongs to
    pub stage: ScanStage,
    /// How far along the stage is
    pub progress: Progress,
    /// Files examined so far
    pub files_examined: u64,
    /// Photos with metadata so far
    pub photos_found: u64,
    /// Human-readable detail, e.g. "File 3 of 120"
    pub message: String,
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Scan has started
    Started { root: PathBuf },
    /// Scan finished normally
    Completed { summary: PipelineSummary },
    /// Scan was cancelled
    Cancelled,
    /// Scan could not run
    Error { message: String },
}

/// Summary of a finished scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Regular files examined
    pub total_files: u64,
    /// Files with usable metadata
    pub total_photos: u64,
    /// Photos with a capture date
    pub dated_photos: u64,
    /// Photos with an ISO speed
    pub iso_photos: u64,
    /// Duration in milliseconds
    pub duration_ms: u64,
}
