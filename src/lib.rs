//! # PhotoStat
//!
//! Walks a photo collection and counts how it was shot: which focal
//! lengths and apertures, in which years and months, at which ISO speeds.
//!
//! ## Core Philosophy
//! - **Read only** - photos are never modified
//! - **Skip, don't fail** - a file without metadata is simply not a photo
//! - **Deterministic** - the same tree always gives the same tables
//!
//! ## Architecture
//! The library is split into a core engine (GUI-agnostic) and presentation layers:
//! - `core` - Scanning, metadata, counting and tables
//! - `events` - Event-driven progress reporting
//! - `config` - User settings
//! - `error` - User-friendly error types

pub mod config;
pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{PhotoStatError, Result};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the library
///
/// This should be called by the application entry point. `RUST_LOG` wins
/// when set; otherwise only warnings are shown, or debug output for this
/// crate when `verbose` is on. Logs go to stderr so tables on stdout stay
/// clean. Calling it twice is harmless.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,photo_stat=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
