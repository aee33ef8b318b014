//! Filter, sort and aggregate operations over joined records
//!
//! Every operation takes a slice and returns a new vector; inputs are never
//! reordered or modified. Filters keep input order and sorts are stable.

use crate::app::models::JoinedRecord;
use crate::error::{CarparkError, Result};

/// Records whose address contains `substring`, ignoring case.
/// An empty substring keeps everything.
pub fn filter_by_address(records: &[JoinedRecord], substring: &str) -> Vec<JoinedRecord> {
    if substring.is_empty() {
        return records.to_vec();
    }

    let needle = substring.to_uppercase();
    records
        .iter()
        .filter(|record| record.address().to_uppercase().contains(&needle))
        .cloned()
        .collect()
}

/// Records with `percentage >= threshold`
pub fn filter_by_min_percentage(records: &[JoinedRecord], threshold: f64) -> Vec<JoinedRecord> {
    records
        .iter()
        .filter(|record| record.percentage() >= threshold)
        .cloned()
        .collect()
}

/// Records with no lots available
pub fn records_with_zero_availability(records: &[JoinedRecord]) -> Vec<JoinedRecord> {
    records
        .iter()
        .filter(|record| record.lots_available() == 0)
        .cloned()
        .collect()
}

/// Records that carry a location and can be placed on a map
pub fn with_location(records: &[JoinedRecord]) -> Vec<JoinedRecord> {
    records
        .iter()
        .filter(|record| record.location().is_some())
        .cloned()
        .collect()
}

/// The record with the most lots; the first one seen wins a tie.
///
/// # Errors
/// * `EmptyInput` when `records` is empty
pub fn max_total_lots(records: &[JoinedRecord]) -> Result<&JoinedRecord> {
    let mut iter = records.iter();
    let mut best = iter
        .next()
        .ok_or_else(|| CarparkError::empty_input("find the carpark with the most lots"))?;

    for record in iter {
        // Strictly greater keeps the earliest record on ties
        if record.total_lots() > best.total_lots() {
            best = record;
        }
    }

    Ok(best)
}

/// Stable sort by lots available, fewest first
pub fn sort_by_available_ascending(records: &[JoinedRecord]) -> Vec<JoinedRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|record| record.lots_available());
    sorted
}

/// Address and percentage filter applied together, as the map view does
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapFilter {
    /// Case-insensitive address substring; empty matches everything
    pub address: String,

    /// Minimum availability percentage, 0 keeps everything
    pub min_percentage: f64,
}

impl MapFilter {
    pub fn new(address: impl Into<String>, min_percentage: f64) -> Self {
        Self {
            address: address.into(),
            min_percentage,
        }
    }

    pub fn apply(&self, records: &[JoinedRecord]) -> Vec<JoinedRecord> {
        let by_address = filter_by_address(records, &self.address);
        filter_by_min_percentage(&by_address, self.min_percentage)
    }
}
