//! Carpark metadata loading
//!
//! Reads the metadata CSV (`Carpark Number,Carpark Type,Type of Parking
//! System,...,Address`) into a [`CarparkCatalog`]. Location is optional and
//! comes either from a `Location` column holding `"<lat> <lon>"` or from a
//! `Latitude`/`Longitude` column pair.

use super::CarparkCatalog;
use crate::app::models::{CarparkRecord, GeoLocation};
use crate::app::services::csv_table::{CsvRecord, CsvTable};
use crate::constants::columns;
use crate::error::{CarparkError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const REQUIRED_COLUMNS: [&str; 4] = [
    columns::CARPARK_NUMBER,
    columns::CARPARK_TYPE,
    columns::PARKING_SYSTEM,
    columns::ADDRESS,
];

impl CarparkCatalog {
    /// Parse catalog text; `source_name` is kept for reporting
    pub fn from_text(text: &str, source_name: impl Into<String>) -> Result<Self> {
        let table = CsvTable::parse(text)?;
        Self::from_table(&table, source_name)
    }

    /// Build a catalog from an already parsed table
    pub fn from_table(table: &CsvTable, source_name: impl Into<String>) -> Result<Self> {
        table.require_columns(&REQUIRED_COLUMNS)?;

        let mut catalog = Self::new(source_name);
        for record in table.records() {
            let carpark = parse_carpark_record(&record)?;
            if let Some(previous) = catalog.insert(carpark) {
                warn!(
                    "Duplicate carpark number '{}' at line {} in {}, replacing earlier record",
                    previous.number,
                    record.line(),
                    catalog.source_name()
                );
            }
        }

        debug!(
            "Parsed {} carparks ({} with location) from {}",
            catalog.len(),
            catalog.located_count(),
            catalog.source_name()
        );

        Ok(catalog)
    }

    /// Load the catalog from a metadata CSV file
    ///
    /// # Errors
    /// * `SourceUnavailable` if the file cannot be read
    /// * `MissingColumn` / `MalformedRow` for a malformed file
    pub fn load(path: &Path) -> Result<Self> {
        let start_time = Instant::now();
        let source_name = path.display().to_string();

        let text = std::fs::read_to_string(path)
            .map_err(|e| CarparkError::source_unavailable(source_name.clone(), e))?;
        let catalog = Self::from_text(&text, source_name)?;

        info!(
            "Carpark catalog loaded: {} carparks from {} in {:.2}ms",
            catalog.len(),
            path.display(),
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        Ok(catalog)
    }
}

fn parse_carpark_record(record: &CsvRecord<'_>) -> Result<CarparkRecord> {
    Ok(CarparkRecord {
        number: record.require(columns::CARPARK_NUMBER)?.to_string(),
        carpark_type: record.require(columns::CARPARK_TYPE)?.to_string(),
        parking_system_type: record.require(columns::PARKING_SYSTEM)?.to_string(),
        address: record.require(columns::ADDRESS)?.to_string(),
        location: parse_record_location(record),
    })
}

/// Location from either the combined column or the latitude/longitude pair.
/// Unparseable values are logged and treated as absent.
fn parse_record_location(record: &CsvRecord<'_>) -> Option<GeoLocation> {
    if let Some(value) = record.get(columns::LOCATION) {
        return parse_location(value).unwrap_or_else(|| {
            warn!("Invalid location '{}' at line {}", value, record.line());
            None
        });
    }

    let latitude = record.get(columns::LATITUDE)?;
    let longitude = record.get(columns::LONGITUDE)?;
    if latitude.trim().is_empty() && longitude.trim().is_empty() {
        return None;
    }

    match (latitude.trim().parse::<f64>(), longitude.trim().parse::<f64>()) {
        (Ok(lat), Ok(lon)) => Some(GeoLocation::new(lat, lon)),
        _ => {
            warn!(
                "Could not parse coordinates '{}', '{}' at line {}",
                latitude,
                longitude,
                record.line()
            );
            None
        }
    }
}

/// Parse `"<lat> <lon>"`. `Some(None)` for an empty value, `None` when the
/// value is present but invalid.
fn parse_location(value: &str) -> Option<Option<GeoLocation>> {
    let value = value.trim().trim_matches('"');
    if value.is_empty() {
        return Some(None);
    }

    let mut parts = value.split_whitespace();
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };

    match (lat.parse::<f64>(), lon.parse::<f64>()) {
        (Ok(lat), Ok(lon)) => Some(Some(GeoLocation::new(lat, lon))),
        _ => None,
    }
}

/// Loads a catalog once per source path and hands out shared copies.
///
/// A request for the same path returns the cached `Arc` without touching the
/// file again; a different path replaces the cached catalog.
#[derive(Debug, Default)]
pub struct CatalogCache {
    cached: Option<(PathBuf, Arc<CarparkCatalog>)>,
    loads: usize,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<CarparkCatalog>> {
        if let Some((cached_path, catalog)) = &self.cached {
            if cached_path == path {
                debug!("Using cached carpark catalog for {}", path.display());
                return Ok(Arc::clone(catalog));
            }
        }

        let catalog = Arc::new(CarparkCatalog::load(path)?);
        self.loads += 1;
        self.cached = Some((path.to_path_buf(), Arc::clone(&catalog)));
        Ok(catalog)
    }

    /// The cached catalog, if one has been loaded
    pub fn current(&self) -> Option<Arc<CarparkCatalog>> {
        self.cached.as_ref().map(|(_, catalog)| Arc::clone(catalog))
    }

    /// Number of times a catalog was read from disk
    pub fn load_count(&self) -> usize {
        self.loads
    }
}
