//! Shared test utilities and fixtures for carpark catalog tests

use std::fs;
use std::path::{Path, PathBuf};


pub const CATALOG_HEADER: &str = "Carpark Number,Carpark Type,Type of Parking System,Address";

pub const LOCATED_CATALOG_HEADER: &str =
    "Carpark Number,Carpark Type,Type of Parking System,Location,Address";

/// Small catalog in the shape of carpark-information.csv
pub fn sample_catalog_text() -> String {
    format!(
        "{}\n\
         ACB,BASEMENT CAR PARK,ELECTRONIC PARKING,BLK 270/271 ALBERT CENTRE BASEMENT CAR PARK\n\
         ACM,MULTI-STOREY CAR PARK,ELECTRONIC PARKING,BLK 98A ALJUNIED CRESCENT\n\
         AH1,SURFACE CAR PARK,ELECTRONIC PARKING,\"BLK 101, JALAN DUSUN\"\n\
         BE3,BASEMENT CAR PARK,COUPON PARKING,BLK 100 BEDOK NORTH AVENUE 4\n",
        CATALOG_HEADER
    )
}

/// Catalog with a `Location` column
pub fn sample_located_catalog_text() -> String {
    format!(
        "{}\n\
         ACB,BASEMENT CAR PARK,ELECTRONIC PARKING,1.3007 103.8545,BLK 270/271 ALBERT CENTRE\n\
         ACM,MULTI-STOREY CAR PARK,ELECTRONIC PARKING,,BLK 98A ALJUNIED CRESCENT\n\
         AH1,SURFACE CAR PARK,ELECTRONIC PARKING,1.3036 103.8371,BLK 101 JALAN DUSUN\n",
        LOCATED_CATALOG_HEADER
    )
}

/// Write a catalog file into `dir` and return its path
pub fn write_catalog_file(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}
