//! Application constants for the carpark pipeline
//!
//! File names, CSV column names and marker colours shared across the
//! catalog loader, the joiner, the exporter and the CLI.

// =============================================================================
// Resource Files
// =============================================================================

/// Directory holding the CSV resources, relative to the working directory
pub const DEFAULT_RESOURCE_DIR: &str = "./res";

/// Carpark metadata file name
pub const CATALOG_FILE_NAME: &str = "carpark-information.csv";

/// Export target file name (overwritten on every export)
pub const EXPORT_FILE_NAME: &str = "carpark-availability-with-addresses.csv";

/// Glob pattern matching availability snapshot files
pub const SNAPSHOT_FILE_PATTERN: &str = "carpark-availability-*.csv";

// =============================================================================
// CSV Column Names
// =============================================================================

pub mod columns {
    pub const CARPARK_NUMBER: &str = "Carpark Number";
    pub const CARPARK_TYPE: &str = "Carpark Type";
    pub const PARKING_SYSTEM: &str = "Type of Parking System";
    pub const ADDRESS: &str = "Address";
    pub const TOTAL_LOTS: &str = "Total Lots";
    pub const LOTS_AVAILABLE: &str = "Lots Available";

    /// Combined "<lat> <lon>" column
    pub const LOCATION: &str = "Location";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
}

/// Leading UTF-8 byte-order mark some spreadsheet exports carry
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Header line written by the exporter
pub const EXPORT_HEADER: &str = "Carpark Number,Total Lots,Lots Available,Address";

/// Carpark type listed by the basement report
pub const BASEMENT_CARPARK_TYPE: &str = "BASEMENT CAR PARK";

/// Prefix used when a live batch arrives without a timestamp line
pub const SYNTHETIC_TIMESTAMP_PREFIX: &str = "Timestamp: ";

// =============================================================================
// Map Marker Defaults
// =============================================================================

pub mod markers {
    /// Percentages at or below this are scarce (red)
    pub const DEFAULT_SCARCE_AT_OR_BELOW: f64 = 25.0;

    /// Percentages above this are plentiful (green)
    pub const DEFAULT_PLENTIFUL_ABOVE: f64 = 75.0;

    pub const SCARCE_INNER: &str = "#FF0000";
    pub const SCARCE_OUTER: &str = "#8B0000";
    pub const LIMITED_INNER: &str = "#FFFF00";
    pub const LIMITED_OUTER: &str = "#FFA500";
    pub const PLENTIFUL_INNER: &str = "#00FF00";
    pub const PLENTIFUL_OUTER: &str = "#006400";
}
