//! Availability snapshot ingestion and catalog join
//!
//! A snapshot file starts with an opaque timestamp line, followed by a
//! `Carpark Number,Total Lots,Lots Available[,...]` header and one row per
//! carpark. Live feeds arrive as already-parsed records and may lack a
//! timestamp, in which case one is synthesised.
//!
//! ## Architecture
//!
//! - [`source`] - The [`AvailabilitySource`] seam and its file/live implementations
//! - [`joiner`] - Hash join of availability records with the carpark catalog

pub mod joiner;
pub mod source;

#[cfg(test)]
pub mod tests;

pub use joiner::{JoinOptions, join_records, join_snapshot};
pub use source::{AvailabilityBatch, AvailabilitySource, LiveBatch, SnapshotFile};
