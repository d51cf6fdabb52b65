//! # Config Module
//!
//! User settings, kept as JSON in the platform configuration directory
//! (`~/.config/photostat/settings.json` on Linux).
//!
//! Every field is optional in the file; whatever is missing falls back to
//! its default, and a missing file means "all defaults".

use crate::core::scanner::normalize_extension;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Subdirectory of the platform config dir
pub const CONFIG_SUBDIR: &str = "photostat";
/// Settings file name inside [`CONFIG_SUBDIR`]
pub const SETTINGS_FILE_NAME: &str = "settings.json";
/// Default name of the saved statistics, in the home directory
pub const DEFAULT_STAT_FILE_NAME: &str = "photo-statistics.txt";

/// RAW formats scanned by default
pub const RAW_FILE_EXTENSIONS: &[&str] = &[
    "3fr", "ari", "arw", "srf", "sr2", "bay", "braw", "cri", "crw", "cr2", "cr3", "cap", "iiq",
    "eip", "dcs", "dcr", "drf", "k25", "kdc", "dng", "erf", "fff", "gpr", "mef", "mdc", "mos",
    "mrw", "nef", "nrw", "orf", "pef", "ptx", "pxn", "r3d", "raf", "raw", "rw2", "rwl", "rwz",
    "srw", "x3f",
];

/// Processed image formats, off by default
pub const IMAGE_FILE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "tif", "tiff", "png"];

/// Where settings live unless overridden
pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_SUBDIR).join(SETTINGS_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory scanned by default
    pub photo_root_dir: PathBuf,
    /// Where "save statistics" writes to
    pub stat_save_file: PathBuf,
    pub scan_raw_files: bool,
    pub scan_image_files: bool,
    /// Lowercase, without the leading dot
    pub raw_file_extensions: BTreeSet<String>,
    /// Lowercase, without the leading dot
    pub image_file_extensions: BTreeSet<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        Self {
            stat_save_file: home.join(DEFAULT_STAT_FILE_NAME),
            photo_root_dir: home,
            scan_raw_files: true,
            scan_image_files: false,
            raw_file_extensions: RAW_FILE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            image_file_extensions: IMAGE_FILE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Load settings from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.normalize();

        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Write settings to `path`, creating its directory when needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, json + "\n").map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Check the settings are good enough to start a scan
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_root()?;
        if self.file_types().is_empty() {
            return Err(ConfigError::NoFileTypes);
        }
        Ok(())
    }

    /// Check only the photo directory
    pub fn validate_root(&self) -> Result<(), ConfigError> {
        if self.photo_root_dir.as_os_str().is_empty() || !self.photo_root_dir.is_dir() {
            return Err(ConfigError::InvalidRoot {
                path: self.photo_root_dir.clone(),
            });
        }
        Ok(())
    }

    /// Extensions of every enabled file kind
    pub fn file_types(&self) -> BTreeSet<String> {
        let mut types = BTreeSet::new();
        if self.scan_raw_files {
            types.extend(self.raw_file_extensions.iter().cloned());
        }
        if self.scan_image_files {
            types.extend(self.image_file_extensions.iter().cloned());
        }
        types
    }

    /// Lowercase extensions, strip dots, drop blanks
    pub fn normalize(&mut self) {
        self.raw_file_extensions = normalized(&self.raw_file_extensions);
        self.image_file_extensions = normalized(&self.image_file_extensions);
    }
}

fn normalized(extensions: &BTreeSet<String>) -> BTreeSet<String> {
    extensions
        .iter()
        .filter_map(|ext| normalize_extension(ext))
        .collect()
}
