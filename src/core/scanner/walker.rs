//! Directory walking implementation using walkdir.

use crate::error::ScanError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Check that `root` is an existing, readable directory
pub fn validate_root(root: &Path) -> Result<(), ScanError> {
    let metadata = match fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            })
        }
        Err(e) => {
            return Err(ScanError::Inaccessible {
                path: root.to_path_buf(),
                source: e,
            })
        }
    };

    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    fs::read_dir(root).map_err(|e| ScanError::Inaccessible {
        path: root.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Every regular file under `root`, recursively.
///
/// Entries are sorted by file name inside each directory so repeated runs
/// over an unchanged tree visit files in the same order. Symbolic links are
/// not followed. Unreadable subdirectories are logged and skipped.
pub fn walk_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry_result| match entry_result {
            Ok(entry) => Some(entry),
            Err(e) => {
                let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                warn!(path = %path, error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}
