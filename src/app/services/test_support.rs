//! Fixtures shared by the service test modules

use crate::app::models::{AvailabilityRecord, CarparkRecord, GeoLocation, JoinedRecord};

/// Joined record for a carpark found in the catalog
pub fn joined(number: &str, total_lots: u32, lots_available: u32, address: &str) -> JoinedRecord {
    JoinedRecord::matched(
        &AvailabilityRecord::new(number, total_lots, lots_available),
        &carpark(number, address, None),
        false,
    )
}

/// Joined record carrying a location
pub fn joined_at(
    number: &str,
    total_lots: u32,
    lots_available: u32,
    address: &str,
    latitude: f64,
    longitude: f64,
) -> JoinedRecord {
    JoinedRecord::matched(
        &AvailabilityRecord::new(number, total_lots, lots_available),
        &carpark(number, address, Some(GeoLocation::new(latitude, longitude))),
        true,
    )
}

/// Joined record for a carpark missing from the catalog
pub fn unmatched(number: &str, total_lots: u32, lots_available: u32) -> JoinedRecord {
    JoinedRecord::unmatched(&AvailabilityRecord::new(number, total_lots, lots_available))
}

pub fn carpark(number: &str, address: &str, location: Option<GeoLocation>) -> CarparkRecord {
    CarparkRecord {
        number: number.to_string(),
        carpark_type: "SURFACE CAR PARK".to_string(),
        parking_system_type: "ELECTRONIC PARKING".to_string(),
        address: address.to_string(),
        location,
    }
}
