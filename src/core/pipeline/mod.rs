//! # Pipeline Module
//!
//! Runs a statistics scan for a host that wants events instead of callbacks.
//!
//! ## Flow
//! 1. **Started** - root announced
//! 2. **Scan** - stage changes and throttled progress from the aggregator
//! 3. **Completed** / **Cancelled** / **Error**
//!
//! ## Threading
//! [`Pipeline::spawn`] moves the scan onto a dedicated worker thread. The
//! statistics are owned by that thread until the join handle hands them
//! back, so the host never reads counters that are still being written.

mod executor;
mod state;

pub use executor::{
    CancellationToken, Pipeline, PipelineBuilder, PipelineConfig, PipelineResult,
    DEFAULT_EVENT_INTERVAL,
};
pub use state::ScanState;
