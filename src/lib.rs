//! Carpark Information Library
//!
//! Joins carpark availability snapshots with the static carpark metadata
//! catalog and answers the questions a driver or operator asks of them.
//!
//! This library provides tools for:
//! - Parsing the metadata and snapshot CSV files, including quoted addresses
//! - Indexing carparks by number for O(1) lookups during the join
//! - Filtering, sorting and aggregating joined records
//! - Writing the sorted availability export
//! - Describing colour-banded map markers for located carparks

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod context;
    pub mod models;
    pub mod services {
        pub mod availability;
        pub mod carpark_catalog;
        pub mod csv_table;
        pub mod exporter;
        pub mod map_markers;
        pub mod query;

        #[cfg(test)]
        pub(crate) mod test_support;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod menu;
    pub mod report;
}

// Re-export commonly used types
pub use app::context::CarparkContext;
pub use app::models::{AvailabilityRecord, CarparkRecord, GeoLocation, JoinedRecord, Snapshot};
pub use config::CarparkConfig;
pub use error::{CarparkError, Result};
