//! The scan loop: enumerate, filter, read, count.

use super::PhotoStatistics;
use crate::core::metadata::MetadataReader;
use crate::core::scanner::{validate_root, walk_files, ExtensionFilter, Progress, ScanStage, ScanStatus};
use std::path::Path;
use tracing::{debug, info, warn};

impl PhotoStatistics {
    /// Find photo files under `root` and count their metadata.
    ///
    /// `on_stage` is called when the search and processing stages start.
    /// `on_progress` is called after every enumerated file (with
    /// [`Progress::Indeterminate`]) and after every processed file (with the
    /// fraction done). Returning `false` from it stops the scan; those two
    /// calls are the only cancellation points, so a file is either fully
    /// counted or not at all.
    ///
    /// A missing or unreadable root is the only reported failure. Files whose
    /// metadata cannot be read are skipped without a trace in the counters.
    ///
    /// Counters accumulate on top of whatever is already there; call
    /// [`PhotoStatistics::clear`] first when reusing an instance.
    pub fn gather_statistics<R, S, P>(
        &mut self,
        root: &Path,
        extensions: &ExtensionFilter,
        reader: &R,
        mut on_stage: S,
        mut on_progress: P,
    ) -> ScanStatus
    where
        R: MetadataReader + ?Sized,
        S: FnMut(ScanStage),
        P: FnMut(&PhotoStatistics, Progress, &str) -> bool,
    {
        if let Err(e) = validate_root(root) {
            warn!(error = %e, "cannot scan");
            return ScanStatus::Failed(e);
        }

        info!(root = %root.display(), "{}", ScanStage::SearchingFiles);
        on_stage(ScanStage::SearchingFiles);

        let mut matched = Vec::new();
        for path in walk_files(root) {
            self.record_file_examined();
            if extensions.matches(&path) {
                matched.push(path);
            }

            let message = format!(
                "Files found: {}, to process: {}",
                self.total_files,
                matched.len()
            );
            if !on_progress(&*self, Progress::Indeterminate, &message) {
                info!(files = self.total_files, "scan cancelled while searching");
                return ScanStatus::Cancelled;
            }
        }

        let total = matched.len();
        if total == 0 {
            info!(files = self.total_files, "no matching files");
            return ScanStatus::Finished;
        }

        info!(files = total, "{}", ScanStage::ProcessingMetadata);
        on_stage(ScanStage::ProcessingMetadata);

        for (index, path) in matched.iter().enumerate() {
            match reader.read(path) {
                Some(record) => self.record_photo(&record),
                None => debug!(path = %path.display(), "no metadata, skipped"),
            }

            let done = index + 1;
            let message = format!("File {} of {}", done, total);
            let fraction = done as f64 / total as f64;
            if !on_progress(&*self, Progress::Fraction(fraction), &message) {
                info!(processed = done, total, "scan cancelled while processing");
                return ScanStatus::Cancelled;
            }
        }

        info!(
            files = self.total_files,
            photos = self.total_photos,
            "scan finished"
        );
        ScanStatus::Finished
    }
}
