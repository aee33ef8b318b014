//! Availability sources
//!
//! [`AvailabilitySource`] is the seam between the pipeline and wherever lot
//! counts come from. [`SnapshotFile`] reads the CSV exports; [`LiveBatch`]
//! wraps records fetched by an external adapter (the transport-authority API
//! client lives outside this crate).

use crate::app::models::AvailabilityRecord;
use crate::app::services::csv_table::CsvTable;
use crate::constants::{BYTE_ORDER_MARK, SYNTHETIC_TIMESTAMP_PREFIX, columns};
use crate::error::{CarparkError, Result};
use chrono::Local;
use std::path::PathBuf;
use tracing::{debug, info};

/// Availability records from one fetch, with the timestamp line to report
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityBatch {
    pub timestamp: String,
    pub records: Vec<AvailabilityRecord>,
}

impl AvailabilityBatch {
    /// Parse snapshot text: line 1 is the timestamp, line 2 the header
    pub fn parse_snapshot(text: &str) -> Result<Self> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        if text.trim().is_empty() {
            return Err(CarparkError::empty_input(
                "parse snapshot without a timestamp line",
            ));
        }
        let (timestamp, body) = text.split_once('\n').unwrap_or((text, ""));

        let table = CsvTable::parse_from_line(body, 2)?;
        table.require_columns(&[
            columns::CARPARK_NUMBER,
            columns::TOTAL_LOTS,
            columns::LOTS_AVAILABLE,
        ])?;

        let records = table
            .records()
            .map(|record| -> Result<AvailabilityRecord> {
                Ok(AvailabilityRecord {
                    number: record.require(columns::CARPARK_NUMBER)?.to_string(),
                    total_lots: record.require_u32(columns::TOTAL_LOTS)?,
                    lots_available: record.require_u32(columns::LOTS_AVAILABLE)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            timestamp: timestamp.trim_end().to_string(),
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Anything that can produce a batch of availability records
pub trait AvailabilitySource {
    /// Human-readable description used in logs and reports
    fn describe(&self) -> String;

    /// Fetch the current batch
    ///
    /// # Errors
    /// * `SourceUnavailable` when the underlying file or feed cannot be read
    fn fetch(&self) -> Result<AvailabilityBatch>;
}

/// Snapshot CSV export on disk
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AvailabilitySource for SnapshotFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<AvailabilityBatch> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| CarparkError::source_unavailable(self.describe(), e))?;
        let batch = AvailabilityBatch::parse_snapshot(&text)?;

        info!(
            "Read {} availability records from {}",
            batch.len(),
            self.path.display()
        );
        Ok(batch)
    }
}

/// Records handed over by a live-feed adapter
#[derive(Debug, Clone)]
pub struct LiveBatch {
    records: Vec<AvailabilityRecord>,
    timestamp: Option<String>,
}

impl LiveBatch {
    pub fn new(records: Vec<AvailabilityRecord>) -> Self {
        Self {
            records,
            timestamp: None,
        }
    }

    /// Use the adapter's own timestamp instead of a synthesised one
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

impl AvailabilitySource for LiveBatch {
    fn describe(&self) -> String {
        format!("live feed ({} records)", self.records.len())
    }

    fn fetch(&self) -> Result<AvailabilityBatch> {
        let timestamp = match &self.timestamp {
            Some(timestamp) => timestamp.clone(),
            None => {
                let synthesised = synthesise_timestamp();
                debug!("Live batch has no timestamp, using '{}'", synthesised);
                synthesised
            }
        };

        Ok(AvailabilityBatch {
            timestamp,
            records: self.records.clone(),
        })
    }
}

fn synthesise_timestamp() -> String {
    format!(
        "{}{}",
        SYNTHETIC_TIMESTAMP_PREFIX,
        Local::now().format("%Y-%m-%dT%H:%M:%S")
    )
}
