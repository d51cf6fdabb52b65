//! Saving statistics as plain text.

use crate::core::stats::PhotoStatistics;
use crate::error::ExportError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write all tables followed by the number of files examined
pub fn export_text<W: Write>(stats: &PhotoStatistics, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "{}", stats.format_all_tables())?;
    writeln!(writer)?;
    writeln!(writer, "Total files: {}", stats.total_files())?;
    writer.flush()
}

/// Write the text export to `path`, replacing any existing file
pub fn save_to_file(stats: &PhotoStatistics, path: &Path) -> Result<(), ExportError> {
    let to_error = |source: std::io::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    export_text(stats, BufWriter::new(file)).map_err(to_error)?;

    info!(path = %path.display(), "statistics saved");
    Ok(())
}
