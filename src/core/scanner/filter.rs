//! Extension filtering for the scanner.

use std::collections::BTreeSet;
use std::path::Path;

/// Decides which files are worth reading metadata from
#[derive(Debug, Clone, Default)]
pub struct ExtensionFilter {
    /// Lowercase extensions without the leading dot
    extensions: BTreeSet<String>,
}

impl ExtensionFilter {
    /// Create a filter from extensions such as `"nef"`, `".CR2"` or `"jpg"`
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .filter_map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
        }
    }

    /// Check if a file's extension is in the allowed set
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(normalize_extension)
            .is_some_and(|ext| self.extensions.contains(&ext))
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn extensions(&self) -> &BTreeSet<String> {
        &self.extensions
    }
}

/// Lowercase an extension and strip leading dots; empty input yields `None`
pub fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim().trim_start_matches('.');
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}
