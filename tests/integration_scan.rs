//! Integration tests for scanning and table building.
//!
//! These tests drive `gather_statistics` with a fake metadata reader
//! keyed by file name, then check counters, tables and the text export.

use assert_fs::prelude::*;
use photo_stat::config::Settings;
use photo_stat::core::metadata::{MetadataRecord, Rational};
use photo_stat::core::scanner::{ExtensionFilter, ScanStage};
use photo_stat::core::stats::PhotoStatistics;
use photo_stat::core::table::{save_to_file, Cell, TableBuilder};
use predicates::prelude::*;
use std::path::Path;

fn photo(focal: f64, num: u32, denom: u32) -> MetadataRecord {
    MetadataRecord {
        focal_length_mm: Some(focal),
        f_number: Some(Rational::new(num, denom)),
        iso_speed: Some(100),
        date_candidates: vec!["2022:08:15 09:30:00".to_string()],
    }
}

/// Files whose stem starts with "blank" carry no metadata; "f18" and "f20"
/// are 50 mm shots at f/1.8 and f/2.0; anything else is a 35 mm f/4 shot.
fn fake_reader(path: &Path) -> Option<MetadataRecord> {
    let stem = path.file_stem()?.to_str()?;
    if stem.starts_with("blank") {
        None
    } else if stem.starts_with("f18") {
        Some(photo(50.0, 18, 10))
    } else if stem.starts_with("f20") {
        Some(photo(50.0, 2, 1))
    } else {
        Some(photo(35.0, 4, 1))
    }
}

fn scan(root: &Path, extensions: &[&str]) -> PhotoStatistics {
    let mut stats = PhotoStatistics::new();
    let status = stats.gather_statistics(
        root,
        &ExtensionFilter::new(extensions),
        &fake_reader,
        |_| {},
        |_, _, _| true,
    );
    assert!(status.completed());
    assert!(status.error().is_none());
    stats
}

fn counts(row: &[Cell]) -> Vec<u64> {
    row.iter().filter_map(Cell::as_count).collect()
}

#[test]
fn empty_directory_has_only_a_total_row() {
    let temp = assert_fs::TempDir::new().unwrap();
    let stats = scan(temp.path(), &["jpg"]);

    assert_eq!(stats.total_files(), 0);
    let table = stats.build_focal_aperture_table();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(counts(table.row("Total").unwrap()), vec![0]);
}

#[test]
fn only_matching_files_with_metadata_are_photos() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("holiday.jpg").touch().unwrap();
    temp.child("blank.jpg").touch().unwrap();
    temp.child("readme.txt").touch().unwrap();

    let stats = scan(temp.path(), &["jpg"]);

    assert_eq!(stats.total_files(), 3);
    assert_eq!(stats.total_photos(), 1);
}

#[test]
fn two_apertures_share_one_focal_row() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("f18.nef").touch().unwrap();
    temp.child("f20.nef").touch().unwrap();

    let stats = scan(temp.path(), &["nef"]);
    let table = stats.build_focal_aperture_table();

    let header = table.header.as_ref().unwrap();
    assert_eq!(header[1], Cell::text("f/1.8"));
    assert_eq!(header[2], Cell::text("f/2"));
    assert_eq!(counts(table.row("50 mm").unwrap()), vec![1, 1, 2]);
    assert_eq!(counts(table.row("Total").unwrap()), vec![1, 1, 2]);
}

#[test]
fn missing_root_reports_path() {
    let temp = assert_fs::TempDir::new().unwrap();
    let missing = temp.path().join("not-there");
    let mut stages = Vec::new();

    let mut stats = PhotoStatistics::new();
    let status = stats.gather_statistics(
        &missing,
        &ExtensionFilter::new(["nef"]),
        &fake_reader,
        |stage| stages.push(stage),
        |_, _, _| true,
    );

    assert!(status.completed());
    assert!(status.error().unwrap().to_string().contains("not-there"));
    assert!(stages.is_empty());
}

#[test]
fn nested_directories_are_scanned_and_case_ignored() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("2022/08/f18.NEF").touch().unwrap();
    temp.child("2022/09/f20.Nef").touch().unwrap();
    temp.child("2022/09/blank.nef").touch().unwrap();

    let mut stages = Vec::new();
    let mut stats = PhotoStatistics::new();
    stats.gather_statistics(
        temp.path(),
        &ExtensionFilter::new([".nef"]),
        &fake_reader,
        |stage| stages.push(stage),
        |_, _, _| true,
    );

    assert_eq!(
        stages,
        vec![ScanStage::SearchingFiles, ScanStage::ProcessingMetadata]
    );
    assert_eq!(stats.total_files(), 3);
    assert_eq!(stats.total_photos(), 2);
    assert_eq!(stats.dated_photos(), 2);
}

#[test]
fn repeated_scans_give_identical_tables() {
    let temp = assert_fs::TempDir::new().unwrap();
    for name in ["a/f18.nef", "b/f20.nef", "c/x.nef", "c/y.nef", "d/blank.nef"] {
        temp.child(name).touch().unwrap();
    }

    let first = scan(temp.path(), &["nef"]).format_all_tables();
    let second = scan(temp.path(), &["nef"]).format_all_tables();
    assert_eq!(first, second);
}

#[test]
fn rare_focal_lengths_fold_into_other() {
    let temp = assert_fs::TempDir::new().unwrap();
    for ix in 0..60 {
        temp.child(format!("wide/{:02}.nef", ix)).touch().unwrap();
    }
    temp.child("portrait/f18.nef").touch().unwrap();

    let stats = scan(temp.path(), &["nef"]);
    let table = TableBuilder::new(&stats).focal_aperture_table();

    // 61 photos: threshold floor(61 * 2 / 100) = 1, the single 50 mm shot stays
    assert!(table.row("50 mm").is_some());
    assert!(table.row("other").is_none());

    let strict = TableBuilder::new(&stats)
        .with_row_threshold(5)
        .focal_aperture_table();
    assert!(strict.row("50 mm").is_none());
    assert_eq!(counts(strict.row("other").unwrap()), vec![1, 0, 1]);
    assert_eq!(counts(strict.row("Total").unwrap()), vec![1, 60, 61]);
}

#[test]
fn year_and_iso_tables_show_percentages() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("f18.nef").touch().unwrap();
    temp.child("f20.nef").touch().unwrap();

    let stats = scan(temp.path(), &["nef"]);

    let years = stats.build_year_month_table();
    assert_eq!(years.row("2022").unwrap()[2].to_string(), "100.0%");
    assert_eq!(years.row("August").unwrap()[1], Cell::Count(2));

    let iso = stats.build_iso_table();
    assert_eq!(iso.row("100").unwrap()[1], Cell::Count(2));
}

#[test]
fn saved_statistics_match_printed_tables() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("photos/f18.nef").touch().unwrap();
    let output = temp.child("out/photo-statistics.txt");
    std::fs::create_dir_all(temp.path().join("out")).unwrap();

    let stats = scan(&temp.path().join("photos"), &["nef"]);
    save_to_file(&stats, output.path()).unwrap();

    output.assert(predicate::str::starts_with(stats.format_all_tables()));
    output.assert(predicate::str::ends_with("Total files: 1\n"));
}

#[test]
fn settings_drive_the_extension_filter() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("raw.nef").touch().unwrap();
    temp.child("f18.jpg").touch().unwrap();

    let mut settings = Settings::default();
    settings.photo_root_dir = temp.path().to_path_buf();
    settings.validate().unwrap();

    let raw_only: Vec<_> = settings.file_types().into_iter().collect();
    let raw_stats = scan(&settings.photo_root_dir, &raw_only.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(raw_stats.total_photos(), 1);

    settings.scan_image_files = true;
    let all: Vec<_> = settings.file_types().into_iter().collect();
    let all_stats = scan(&settings.photo_root_dir, &all.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(all_stats.total_photos(), 2);
}
