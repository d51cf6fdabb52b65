//! Turns accumulated counters into pivot tables.

use super::{Cell, StatTable};
use crate::core::normalize::ApertureKey;
use crate::core::stats::{FocalLengthStat, PhotoStatistics};

/// Focal lengths with fewer than this share of all photos (in percent)
/// are folded into the "other" row
pub const DEFAULT_ROW_THRESHOLD_PERCENT: u64 = 2;

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const TOTAL_LABEL: &str = "Total";
const OTHER_LABEL: &str = "other";
const CORNER_LABEL: &str = "FL / A";
const MONTH_INDENT: &str = "  ";

/// Builds tables from a finished [`PhotoStatistics`]
#[derive(Debug, Clone, Copy)]
pub struct TableBuilder<'a> {
    stats: &'a PhotoStatistics,
    row_threshold_percent: u64,
}

impl<'a> TableBuilder<'a> {
    pub fn new(stats: &'a PhotoStatistics) -> Self {
        Self {
            stats,
            row_threshold_percent: DEFAULT_ROW_THRESHOLD_PERCENT,
        }
    }

    /// Override the percentage below which focal length rows are folded
    pub fn with_row_threshold(mut self, percent: u64) -> Self {
        self.row_threshold_percent = percent;
        self
    }

    /// Minimum photo count for a focal length to get its own row
    pub fn row_threshold(&self) -> u64 {
        self.stats.total_photos() * self.row_threshold_percent / 100
    }

    /// Focal lengths in rows, apertures in columns.
    ///
    /// Only rows are folded into "other"; every aperture keeps its column.
    /// Column totals and the grand total add up the rows actually emitted.
    pub fn focal_aperture_table(&self) -> StatTable {
        let columns: Vec<ApertureKey> = self.stats.apertures().keys().copied().collect();

        let mut header = vec![Cell::text(CORNER_LABEL)];
        header.extend(columns.iter().map(|a| Cell::text(a.to_string())));
        header.push(Cell::text(TOTAL_LABEL));

        let mut table =
            StatTable::new("Photos by focal length and aperture").with_header(header);

        let threshold = self.row_threshold();
        let (kept, folded): (Vec<&FocalLengthStat>, Vec<&FocalLengthStat>) = self
            .stats
            .focals()
            .values()
            .partition(|focal| focal.total_photos >= threshold);

        let mut column_totals = vec![0u64; columns.len()];

        for focal in kept {
            let mut row = vec![Cell::text(focal.focal.to_string())];
            for (ix, aperture) in columns.iter().enumerate() {
                let count = focal.count(*aperture);
                column_totals[ix] += count;
                row.push(Cell::Count(count));
            }
            row.push(Cell::Count(focal.total_photos));
            table.push_row(row);
        }

        if !folded.is_empty() {
            let mut row = vec![Cell::text(OTHER_LABEL)];
            for (ix, aperture) in columns.iter().enumerate() {
                let count: u64 = folded.iter().map(|focal| focal.count(*aperture)).sum();
                column_totals[ix] += count;
                row.push(Cell::Count(count));
            }
            row.push(Cell::Count(folded.iter().map(|f| f.total_photos).sum()));
            table.push_row(row);
        }

        let grand_total: u64 = column_totals.iter().sum();
        let mut total_row = vec![Cell::text(TOTAL_LABEL)];
        total_row.extend(column_totals.into_iter().map(Cell::Count));
        total_row.push(Cell::Count(grand_total));
        table.push_row(total_row);

        table
    }

    /// One row per year, followed by an indented row per month of that year
    pub fn year_month_table(&self) -> StatTable {
        let mut table = StatTable::new("Photos by year and month");
        let dated = self.stats.dated_photos();

        for (year, stat) in self.stats.years() {
            if stat.total == 0 {
                continue;
            }

            table.push_row(vec![
                Cell::text(year.to_string()),
                Cell::Count(stat.total),
                Cell::Percent(percent(stat.total, dated)),
            ]);

            for (month, count) in &stat.months {
                let name = month_name(*month);
                table.push_row(vec![
                    Cell::text(format!("{}{}", MONTH_INDENT, name)),
                    Cell::Count(*count),
                    Cell::Percent(percent(*count, stat.total)),
                ]);
            }
        }

        table
    }

    /// One row per ISO speed
    pub fn iso_table(&self) -> StatTable {
        let mut table = StatTable::new("Photos by ISO speed");
        let iso = self.stats.iso();

        for (speed, count) in &iso.counts {
            table.push_row(vec![
                Cell::text(speed.to_string()),
                Cell::Count(*count),
                Cell::Percent(percent(*count, iso.total)),
            ]);
        }

        table
    }

    pub fn all_tables(&self) -> [StatTable; 3] {
        [
            self.focal_aperture_table(),
            self.year_month_table(),
            self.iso_table(),
        ]
    }

    /// All three tables as text, separated by blank lines
    pub fn format_all(&self) -> String {
        self.all_tables()
            .iter()
            .map(StatTable::to_string)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl PhotoStatistics {
    pub fn build_focal_aperture_table(&self) -> StatTable {
        TableBuilder::new(self).focal_aperture_table()
    }

    pub fn build_year_month_table(&self) -> StatTable {
        TableBuilder::new(self).year_month_table()
    }

    pub fn build_iso_table(&self) -> StatTable {
        TableBuilder::new(self).iso_table()
    }

    pub fn format_all_tables(&self) -> String {
        TableBuilder::new(self).format_all()
    }
}

fn month_name(month: u32) -> String {
    month
        .checked_sub(1)
        .and_then(|ix| MONTH_NAMES.get(ix as usize))
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("month {}", month))
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
