//! # Table Module
//!
//! Presentation-ready pivot tables built from [`PhotoStatistics`].
//!
//! ## Tables
//! - Focal length x aperture, with rare focal lengths folded into "other"
//! - Photos per year, with per-month breakdown
//! - Photos per ISO speed
//!
//! Tables are built on demand and never cached. Building one never touches
//! the statistics it reads from.
//!
//! [`PhotoStatistics`]: crate::core::stats::PhotoStatistics

mod builder;
mod export;

pub use builder::{TableBuilder, DEFAULT_ROW_THRESHOLD_PERCENT, MONTH_NAMES};
pub use export::{export_text, save_to_file};

use std::fmt;

/// Column separator in the text rendering
pub const COLUMN_SEPARATOR: &str = "  ";

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Labels, headers
    Text(String),
    /// Photo counts
    Count(u64),
    /// Share of some total, in percent
    Percent(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn as_count(&self) -> Option<u64> {
        match self {
            Cell::Count(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Count(n) => write!(f, "{}", n),
            Cell::Percent(p) => write!(f, "{:.1}%", p),
        }
    }
}

/// A titled table of rows, first cell of each row being its label
#[derive(Debug, Clone, PartialEq)]
pub struct StatTable {
    pub title: String,
    /// Column headings, if the table has any
    pub header: Option<Vec<Cell>>,
    pub rows: Vec<Vec<Cell>>,
}

impl StatTable {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            header: None,
            rows: Vec::new(),
        }
    }

    pub fn with_header(mut self, header: Vec<Cell>) -> Self {
        self.header = Some(header);
        self
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Row whose label cell reads `label`
    pub fn row(&self, label: &str) -> Option<&[Cell]> {
        self.rows
            .iter()
            .find(|row| matches!(row.first(), Some(Cell::Text(s)) if s.trim() == label))
            .map(Vec::as_slice)
    }
}

/// Title on the first line, then one line per row. The label column is
/// left-aligned, every other column right-aligned to its widest value.
impl fmt::Display for StatTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;

        let lines: Vec<Vec<String>> = self
            .header
            .iter()
            .chain(self.rows.iter())
            .map(|row| row.iter().map(Cell::to_string).collect())
            .collect();

        let columns = lines.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];
        for line in &lines {
            for (ix, value) in line.iter().enumerate() {
                widths[ix] = widths[ix].max(value.chars().count());
            }
        }

        for line in &lines {
            writeln!(f)?;
            for (ix, width) in widths.iter().enumerate() {
                let value = line.get(ix).map(String::as_str).unwrap_or("");
                if ix == 0 {
                    write!(f, "{:<width$}", value, width = width)?;
                } else {
                    write!(f, "{}{:>width$}", COLUMN_SEPARATOR, value, width = width)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_render() {
        assert_eq!(Cell::text("50 mm").to_string(), "50 mm");
        assert_eq!(Cell::Count(0).to_string(), "0");
        assert_eq!(Cell::Percent(12.345).to_string(), "12.3%");
    }

    #[test]
    fn empty_table_renders_title_only() {
        let table = StatTable::new("Photos by ISO speed");
        assert_eq!(table.to_string(), "Photos by ISO speed");
    }

    #[test]
    fn columns_are_aligned() {
        let mut table = StatTable::new("T")
            .with_header(vec![Cell::text("FL"), Cell::text("f/2"), Cell::text("Total")]);
        table.push_row(vec![Cell::text("50 mm"), Cell::Count(120), Cell::Count(120)]);
        table.push_row(vec![Cell::text("other"), Cell::Count(3), Cell::Count(3)]);

        let rendered = table.to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "T");
        assert_eq!(lines[1], "FL     f/2  Total");
        assert_eq!(lines[2], "50 mm  120    120");
        assert_eq!(lines[3], "other    3      3");
    }

    #[test]
    fn row_lookup_ignores_indent() {
        let mut table = StatTable::new("T");
        table.push_row(vec![Cell::text("  March"), Cell::Count(4)]);
        assert_eq!(table.row("March").unwrap()[1], Cell::Count(4));
        assert!(table.row("April").is_none());
    }
}
