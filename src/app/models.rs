//! Core data structures for carpark processing.
//!
//! Defines the metadata record loaded from the carpark catalog, the raw
//! availability record from a snapshot, and the joined record produced by
//! the availability joiner.

use serde::{Deserialize, Serialize};

/// Geographic position of a carpark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Static carpark metadata, immutable after load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarparkRecord {
    pub number: String,
    pub carpark_type: String,
    pub parking_system_type: String,
    /// Address as read; literal surrounding quote characters may remain
    pub address: String,
    pub location: Option<GeoLocation>,
}

impl CarparkRecord {
    /// Address with surrounding quote characters removed
    pub fn display_address(&self) -> &str {
        strip_quotes(&self.address)
    }
}

/// One carpark's lot counts in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub number: String,
    pub total_lots: u32,
    /// Not constrained to `<= total_lots`
    pub lots_available: u32,
}

impl AvailabilityRecord {
    pub fn new(number: impl Into<String>, total_lots: u32, lots_available: u32) -> Self {
        Self {
            number: number.into(),
            total_lots,
            lots_available,
        }
    }

    /// Percentage of lots available; exactly 0.0 when the carpark has no lots.
    /// Not clamped to 100.
    pub fn percentage(&self) -> f64 {
        if self.total_lots == 0 {
            0.0
        } else {
            (self.lots_available as f64 / self.total_lots as f64) * 100.0
        }
    }
}

/// Availability record associated with its catalog metadata.
///
/// Only the availability joiner constructs these; everything else reads them
/// through the accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedRecord {
    number: String,
    total_lots: u32,
    lots_available: u32,
    carpark_type: String,
    parking_system_type: String,
    address: String,
    location: Option<GeoLocation>,
    percentage: f64,
}

impl JoinedRecord {
    pub(crate) fn matched(
        availability: &AvailabilityRecord,
        carpark: &CarparkRecord,
        include_location: bool,
    ) -> Self {
        Self {
            number: availability.number.clone(),
            total_lots: availability.total_lots,
            lots_available: availability.lots_available,
            carpark_type: carpark.carpark_type.clone(),
            parking_system_type: carpark.parking_system_type.clone(),
            address: carpark.address.clone(),
            location: if include_location {
                carpark.location
            } else {
                None
            },
            percentage: availability.percentage(),
        }
    }

    pub(crate) fn unmatched(availability: &AvailabilityRecord) -> Self {
        Self {
            number: availability.number.clone(),
            total_lots: availability.total_lots,
            lots_available: availability.lots_available,
            carpark_type: String::new(),
            parking_system_type: String::new(),
            address: String::new(),
            location: None,
            percentage: availability.percentage(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn total_lots(&self) -> u32 {
        self.total_lots
    }

    pub fn lots_available(&self) -> u32 {
        self.lots_available
    }

    pub fn carpark_type(&self) -> &str {
        &self.carpark_type
    }

    pub fn parking_system_type(&self) -> &str {
        &self.parking_system_type
    }

    /// Address as stored in the catalog
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Address with surrounding quote characters removed, for display and export
    pub fn display_address(&self) -> &str {
        strip_quotes(&self.address)
    }

    pub fn location(&self) -> Option<GeoLocation> {
        self.location
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }
}

/// Counts gathered while joining a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub located: usize,
}

/// Joined records from one availability load, plus its opaque timestamp line
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub timestamp: String,
    pub records: Vec<JoinedRecord>,
    pub stats: JoinStats,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_formula() {
        assert_eq!(AvailabilityRecord::new("A1", 10, 3).percentage(), 30.0);
    }

    #[test]
    fn test_percentage_zero_total_is_zero() {
        let pct = AvailabilityRecord::new("A1", 0, 5).percentage();
        assert_eq!(pct, 0.0);
        assert!(!pct.is_nan());
    }

    #[test]
    fn test_percentage_not_clamped() {
        assert_eq!(AvailabilityRecord::new("A1", 10, 15).percentage(), 150.0);
    }

    #[test]
    fn test_display_address_strips_quotes() {
        let record = CarparkRecord {
            number: "ACB".to_string(),
            carpark_type: "BASEMENT CAR PARK".to_string(),
            parking_system_type: "ELECTRONIC PARKING".to_string(),
            address: "\"BLK 270/271 ALBERT CENTRE, BASEMENT\"".to_string(),
            location: None,
        };
        assert_eq!(
            record.display_address(),
            "BLK 270/271 ALBERT CENTRE, BASEMENT"
        );
        assert!(record.address.starts_with('"'));
    }
}
