//! Carpark catalog providing O(1) metadata lookups by carpark number
//!
//! The catalog holds the static carpark metadata (type, parking system,
//! address and optional location) loaded once from the metadata CSV. It is
//! read-only after load and shared with the joiner through an `Arc`.
//!
//! ## Architecture
//!
//! - [`loader`] - CSV parsing, file loading and the per-path cache

pub mod loader;

#[cfg(test)]
pub mod tests;

pub use loader::CatalogCache;

use crate::app::models::CarparkRecord;
use std::collections::HashMap;

/// Static carpark metadata indexed by carpark number
#[derive(Debug, Clone, Default)]
pub struct CarparkCatalog {
    /// Records in file order, numbers unique
    records: Vec<CarparkRecord>,

    /// Carpark number to position in `records`
    index: HashMap<String, usize>,

    /// Where the catalog was loaded from
    source_name: String,
}

impl CarparkCatalog {
    /// Create an empty catalog
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            source_name: source_name.into(),
        }
    }

    /// Insert a record, replacing any earlier record with the same number in
    /// place. Returns the replaced record.
    pub(crate) fn insert(&mut self, record: CarparkRecord) -> Option<CarparkRecord> {
        match self.index.get(&record.number) {
            Some(&position) => Some(std::mem::replace(&mut self.records[position], record)),
            None => {
                self.index.insert(record.number.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    /// Get carpark metadata by number (O(1) lookup)
    pub fn get(&self, number: &str) -> Option<&CarparkRecord> {
        self.index.get(number).map(|&position| &self.records[position])
    }

    pub fn contains(&self, number: &str) -> bool {
        self.index.contains_key(number)
    }

    /// All records in file order
    pub fn records(&self) -> &[CarparkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Records whose carpark type matches exactly, in file order
    pub fn records_of_type(&self, carpark_type: &str) -> Vec<&CarparkRecord> {
        self.records
            .iter()
            .filter(|record| record.carpark_type == carpark_type)
            .collect()
    }

    /// Number of records that carry a location
    pub fn located_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.location.is_some())
            .count()
    }
}
