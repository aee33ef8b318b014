//! Shared fixtures for availability source and join tests

use crate::app::services::carpark_catalog::CarparkCatalog;

pub mod source_tests;

pub const SNAPSHOT_HEADER: &str = "Carpark Number,Total Lots,Lots Available";

/// Snapshot text in the shape of carpark-availability-v1.csv
pub fn sample_snapshot_text() -> String {
    format!(
        "Timestamp: 2023-07-31T10:00:00\n\
         {}\n\
         ACB,100,45\n\
         XYZ,50,0\n\
         ACM,0,0\n\
         AH1,10,3\n",
        SNAPSHOT_HEADER
    )
}

pub fn sample_catalog() -> CarparkCatalog {
    CarparkCatalog::from_text(
        "Carpark Number,Carpark Type,Type of Parking System,Location,Address\n\
         ACB,BASEMENT CAR PARK,ELECTRONIC PARKING,1.3007 103.8545,BLK 270/271 ALBERT CENTRE\n\
         ACM,MULTI-STOREY CAR PARK,ELECTRONIC PARKING,,BLK 98A ALJUNIED CRESCENT\n\
         AH1,SURFACE CAR PARK,COUPON PARKING,1.3036 103.8371,\"BLK 101, JALAN DUSUN\"\n",
        "test catalog",
    )
    .unwrap()
}
