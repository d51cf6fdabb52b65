//! Host-side view of where a scan is.

use crate::core::scanner::ScanStatus;
use serde::{Deserialize, Serialize};

/// What a host should be showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScanState {
    /// Waiting for the user to start a scan
    #[default]
    Idle,
    /// A worker is scanning
    Scanning,
    /// Tables are ready to show
    Results,
}

impl ScanState {
    /// A new scan starts from any state
    pub fn start(self) -> Self {
        ScanState::Scanning
    }

    /// Where a finished worker leaves the host.
    ///
    /// A cancelled scan has nothing to show. A failed one still shows its
    /// (empty) results next to the error.
    pub fn finish(self, status: &ScanStatus) -> Self {
        match (self, status) {
            (ScanState::Scanning, ScanStatus::Cancelled) => ScanState::Idle,
            (ScanState::Scanning, _) => ScanState::Results,
            (other, _) => other,
        }
    }

    /// Leave the results view
    pub fn reset(self) -> Self {
        ScanState::Idle
    }

    pub fn is_scanning(self) -> bool {
        self == ScanState::Scanning
    }
}
