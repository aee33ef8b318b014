//! Association of availability records with catalog metadata
//!
//! Each availability record is looked up in the catalog's number index
//! (O(1) per record, O(n + m) overall). A hit copies the carpark type,
//! parking system and address; a miss leaves them empty. Output order and
//! length always match the input.

use crate::app::models::{AvailabilityRecord, JoinStats, JoinedRecord, Snapshot};
use crate::app::services::availability::AvailabilityBatch;
use crate::app::services::carpark_catalog::CarparkCatalog;
use tracing::debug;

/// Options controlling what the join copies from the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinOptions {
    /// Attach catalog locations to matched records
    pub include_location: bool,
}

impl JoinOptions {
    pub fn with_location() -> Self {
        Self {
            include_location: true,
        }
    }
}

/// Join availability records with the catalog, keeping input order
pub fn join_records(
    availability: &[AvailabilityRecord],
    catalog: &CarparkCatalog,
    include_location: bool,
) -> Vec<JoinedRecord> {
    availability
        .iter()
        .map(|record| match catalog.get(&record.number) {
            Some(carpark) => JoinedRecord::matched(record, carpark, include_location),
            None => JoinedRecord::unmatched(record),
        })
        .collect()
}

/// Join a fetched batch into a snapshot carrying the batch timestamp
pub fn join_snapshot(
    batch: AvailabilityBatch,
    catalog: &CarparkCatalog,
    options: JoinOptions,
) -> Snapshot {
    let records = join_records(&batch.records, catalog, options.include_location);
    let stats = compute_stats(&batch.records, &records, catalog);

    debug!(
        "Joined {} availability records: {} matched, {} unmatched, {} located",
        stats.total, stats.matched, stats.unmatched, stats.located
    );

    Snapshot {
        timestamp: batch.timestamp,
        records,
        stats,
    }
}

fn compute_stats(
    availability: &[AvailabilityRecord],
    joined: &[JoinedRecord],
    catalog: &CarparkCatalog,
) -> JoinStats {
    let matched = availability
        .iter()
        .filter(|record| catalog.contains(&record.number))
        .count();
    let located = joined
        .iter()
        .filter(|record| record.location().is_some())
        .count();

    JoinStats {
        total: joined.len(),
        matched,
        unmatched: joined.len() - matched,
        located,
    }
}
