//! Integration tests for the pipeline module.
//!
//! These tests verify end-to-end pipeline behavior including:
//! - Empty directories
//! - Nonexistent paths
//! - Files without metadata
//! - Real EXIF read through the default reader

use photo_stat::core::normalize::{ApertureKey, FocalKey};
use photo_stat::core::pipeline::{CancellationToken, Pipeline, ScanState};
use photo_stat::core::scanner::ScanStatus;
use photo_stat::error::ScanError;
use photo_stat::events::{null_sender, Event, EventChannel, PipelineEvent};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_entry(buf: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    push_u16(buf, tag);
    push_u16(buf, kind);
    push_u32(buf, count);
    push_u32(buf, value);
}

/// Minimal little-endian TIFF: IFD0 points at an EXIF IFD holding
/// FNumber 18/10, ISO 400, DateTimeOriginal and FocalLength 50/1.
fn tiff_with_exif() -> Vec<u8> {
    const RATIONAL: u16 = 5;
    const SHORT: u16 = 3;
    const ASCII: u16 = 2;
    const LONG: u16 = 4;
    const EXIF_IFD: u32 = 26;
    const F_NUMBER_AT: u32 = 80;
    const FOCAL_AT: u32 = 88;
    const DATE_AT: u32 = 96;
    let date = b"2021:03:04 10:00:00\0";

    let mut buf = b"II*\0".to_vec();
    push_u32(&mut buf, 8);

    // IFD0
    push_u16(&mut buf, 1);
    push_entry(&mut buf, 0x8769, LONG, 1, EXIF_IFD);
    push_u32(&mut buf, 0);
    assert_eq!(buf.len() as u32, EXIF_IFD);

    // EXIF IFD, tags ascending
    push_u16(&mut buf, 4);
    push_entry(&mut buf, 0x829d, RATIONAL, 1, F_NUMBER_AT);
    push_entry(&mut buf, 0x8827, SHORT, 1, 400);
    push_entry(&mut buf, 0x9003, ASCII, date.len() as u32, DATE_AT);
    push_entry(&mut buf, 0x920a, RATIONAL, 1, FOCAL_AT);
    push_u32(&mut buf, 0);
    assert_eq!(buf.len() as u32, F_NUMBER_AT);

    push_u32(&mut buf, 18);
    push_u32(&mut buf, 10);
    push_u32(&mut buf, 50);
    push_u32(&mut buf, 1);
    assert_eq!(buf.len() as u32, DATE_AT);
    buf.extend_from_slice(date);

    buf
}

fn write_file(path: &Path, content: &[u8]) {
    let mut file = File::create(path).unwrap();
    file.write_all(content).unwrap();
}

#[test]
fn pipeline_handles_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    let result = Pipeline::builder()
        .root(temp_dir.path())
        .extensions(["nef"])
        .build()
        .run();

    assert!(matches!(result.status, ScanStatus::Finished));
    assert_eq!(result.stats.total_files(), 0);
    assert_eq!(result.stats.total_photos(), 0);
}

#[test]
fn pipeline_handles_corrupt_file_gracefully() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir.path().join("corrupt.nef"), b"this is not a raw file");

    // Should not panic - unreadable files are skipped
    let result = Pipeline::builder()
        .root(temp_dir.path())
        .extensions(["nef"])
        .build()
        .run();

    assert!(matches!(result.status, ScanStatus::Finished));
    assert_eq!(result.stats.total_files(), 1);
    assert_eq!(result.stats.total_photos(), 0);
}

#[test]
fn pipeline_handles_nonexistent_path() {
    let result = Pipeline::builder()
        .root("/nonexistent/path/that/does/not/exist")
        .extensions(["nef"])
        .build()
        .run();

    assert!(result.status.completed());
    assert!(matches!(
        result.status.error(),
        Some(ScanError::DirectoryNotFound { .. })
    ));
    assert_eq!(result.stats.total_files(), 0);
}

#[test]
fn pipeline_reads_exif_with_default_reader() {
    let temp_dir = TempDir::new().unwrap();
    let sub = temp_dir.path().join("2021");
    fs::create_dir(&sub).unwrap();
    write_file(&sub.join("DSC_0001.NEF"), &tiff_with_exif());
    write_file(&sub.join("DSC_0001.xmp"), b"<x:xmpmeta/>");

    let result = Pipeline::builder()
        .root(temp_dir.path())
        .extensions(["nef"])
        .build()
        .run();
    let stats = &result.stats;

    assert_eq!(stats.total_files(), 2);
    assert_eq!(stats.total_photos(), 1);
    assert_eq!(
        stats.focals()[&FocalKey::Millimetres(50)].count(ApertureKey::Tenths(18)),
        1
    );
    assert_eq!(stats.iso().counts.get(&400), Some(&1));
    assert_eq!(stats.years()[&2021].count(3), 1);

    let tables = stats.format_all_tables();
    assert!(tables.contains("f/1.8"));
    assert!(tables.contains("50 mm"));
    assert!(tables.contains("  March"));
}

#[test]
fn spawned_pipeline_can_be_cancelled() {
    let temp_dir = TempDir::new().unwrap();
    for ix in 0..20 {
        write_file(&temp_dir.path().join(format!("{:02}.nef", ix)), b"");
    }

    let token = CancellationToken::new();
    token.cancel();

    let (sender, receiver) = EventChannel::new();
    let handle = Pipeline::builder()
        .root(temp_dir.path())
        .extensions(["nef"])
        .build()
        .spawn(sender, token.clone());

    let result = handle.join().unwrap();
    assert!(result.status.is_cancelled());
    assert!(result.stats.total_files() < 20);
    assert!(receiver
        .iter()
        .any(|event| matches!(event, Event::Pipeline(PipelineEvent::Cancelled))));

    let state = ScanState::Idle.start().finish(&result.status);
    assert_eq!(state, ScanState::Idle);
}

#[test]
fn worker_hands_back_statistics() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir.path().join("a.nef"), &tiff_with_exif());
    write_file(&temp_dir.path().join("b.nef"), &tiff_with_exif());

    let mut state = ScanState::default().start();
    let handle = Pipeline::builder()
        .root(PathBuf::from(temp_dir.path()))
        .extensions(["nef"])
        .build()
        .spawn(null_sender(), CancellationToken::new());
    assert!(state.is_scanning());

    let result = handle.join().unwrap();
    state = state.finish(&result.status);

    assert_eq!(state, ScanState::Results);
    assert_eq!(result.stats.total_photos(), 2);
    assert_eq!(result.summary().dated_photos, 2);
}
