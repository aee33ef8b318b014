//! Tests for snapshot parsing and availability sources

use super::*;
use crate::app::models::AvailabilityRecord;
use crate::app::services::availability::{
    AvailabilityBatch, AvailabilitySource, LiveBatch, SnapshotFile,
};
use crate::error::CarparkError;
use tempfile::TempDir;

#[test]
fn test_parse_snapshot_splits_timestamp() {
    let batch = AvailabilityBatch::parse_snapshot(&sample_snapshot_text()).unwrap();

    assert_eq!(batch.timestamp, "Timestamp: 2023-07-31T10:00:00");
    assert_eq!(batch.len(), 4);
    assert_eq!(batch.records[0], AvailabilityRecord::new("ACB", 100, 45));
    assert_eq!(batch.records[2], AvailabilityRecord::new("ACM", 0, 0));
}

#[test]
fn test_parse_snapshot_extra_columns_ignored() {
    let text = "Timestamp: 2023-08-01T09:00:00\n\
                Carpark Number,Total Lots,Lots Available,Lot Type\n\
                ACB,100,45,C\n";
    let batch = AvailabilityBatch::parse_snapshot(text).unwrap();

    assert_eq!(batch.records, vec![AvailabilityRecord::new("ACB", 100, 45)]);
}

#[test]
fn test_parse_snapshot_header_only() {
    let text = format!("Timestamp: 2023-08-01T09:00:00\n{}\n", SNAPSHOT_HEADER);
    let batch = AvailabilityBatch::parse_snapshot(&text).unwrap();

    assert!(batch.is_empty());
    assert_eq!(batch.timestamp, "Timestamp: 2023-08-01T09:00:00");
}

#[test]
fn test_parse_snapshot_reports_original_line_numbers() {
    let text = format!("Timestamp: x\n{}\nACB,100,45\nACM,12\n", SNAPSHOT_HEADER);

    match AvailabilityBatch::parse_snapshot(&text) {
        Err(CarparkError::MalformedRow { line, .. }) => assert_eq!(line, 4),
        other => panic!("expected MalformedRow, got {:?}", other),
    }
}

#[test]
fn test_parse_snapshot_rejects_non_numeric_lots() {
    let text = format!("Timestamp: x\n{}\nACB,many,45\n", SNAPSHOT_HEADER);

    match AvailabilityBatch::parse_snapshot(&text) {
        Err(CarparkError::InvalidField { line, column, value }) => {
            assert_eq!(line, 3);
            assert_eq!(column, "Total Lots");
            assert_eq!(value, "many");
        }
        other => panic!("expected InvalidField, got {:?}", other),
    }
}

#[test]
fn test_parse_snapshot_with_byte_order_mark() {
    let text = format!("\u{feff}Timestamp: x\n{}\nACB,100,45\n", SNAPSHOT_HEADER);
    let batch = AvailabilityBatch::parse_snapshot(&text).unwrap();

    assert_eq!(batch.timestamp, "Timestamp: x");
    assert_eq!(batch.records, vec![AvailabilityRecord::new("ACB", 100, 45)]);
}

#[test]
fn test_parse_snapshot_empty_text() {
    assert!(matches!(
        AvailabilityBatch::parse_snapshot(""),
        Err(CarparkError::EmptyInput { .. })
    ));
}

#[test]
fn test_parse_snapshot_missing_header_column() {
    let text = "Timestamp: x\nCarpark Number,Total Lots\nACB,100\n";

    assert!(matches!(
        AvailabilityBatch::parse_snapshot(text),
        Err(CarparkError::MissingColumn { .. })
    ));
}

#[test]
fn test_snapshot_file_fetch() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("carpark-availability-v1.csv");
    std::fs::write(&path, sample_snapshot_text()).unwrap();

    let source = SnapshotFile::new(&path);
    let batch = source.fetch().unwrap();

    assert_eq!(batch.len(), 4);
    assert_eq!(source.describe(), path.display().to_string());
}

#[test]
fn test_snapshot_file_missing_is_source_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let source = SnapshotFile::new(temp_dir.path().join("nope.csv"));

    assert!(matches!(
        source.fetch(),
        Err(CarparkError::SourceUnavailable { .. })
    ));
}

#[test]
fn test_live_batch_uses_supplied_timestamp() {
    let source = LiveBatch::new(vec![AvailabilityRecord::new("ACB", 100, 45)])
        .with_timestamp("Timestamp: 2023-08-03T12:00:00");
    let batch = source.fetch().unwrap();

    assert_eq!(batch.timestamp, "Timestamp: 2023-08-03T12:00:00");
    assert_eq!(batch.len(), 1);
}

#[test]
fn test_live_batch_synthesises_timestamp() {
    let source = LiveBatch::new(vec![AvailabilityRecord::new("ACB", 100, 45)]);
    let batch = source.fetch().unwrap();

    assert!(batch.timestamp.starts_with("Timestamp: "));
    let stamp = batch.timestamp.trim_start_matches("Timestamp: ");
    assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S").is_ok());
}
