//! Session state shared by the CLI commands and the interactive menu
//!
//! `CarparkContext` owns the configuration, the catalog cache and the most
//! recently loaded snapshot. Reports that need availability data fail with
//! `SnapshotNotLoaded` until a snapshot has been loaded.

use crate::app::models::Snapshot;
use crate::app::services::availability::{
    AvailabilitySource, JoinOptions, SnapshotFile, join_snapshot,
};
use crate::app::services::carpark_catalog::{CarparkCatalog, CatalogCache};
use crate::app::services::exporter::{self, ExportSummary};
use crate::app::services::map_markers::{self, MapMarker};
use crate::app::services::query::{self, MapFilter};
use crate::config::CarparkConfig;
use crate::error::{CarparkError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct CarparkContext {
    config: CarparkConfig,
    catalogs: CatalogCache,
    snapshot: Option<Snapshot>,
}

impl CarparkContext {
    pub fn new(config: CarparkConfig) -> Self {
        Self {
            config,
            catalogs: CatalogCache::new(),
            snapshot: None,
        }
    }

    pub fn config(&self) -> &CarparkConfig {
        &self.config
    }

    /// The metadata catalog, read from disk on first use
    pub fn catalog(&mut self) -> Result<Arc<CarparkCatalog>> {
        let path = self.config.catalog_path();
        self.catalogs.get_or_load(&path)
    }

    /// Fetch a batch from `source`, join it and make it the current snapshot.
    ///
    /// A failed load leaves any previously loaded snapshot in place.
    pub fn load_snapshot(&mut self, source: &dyn AvailabilitySource) -> Result<&Snapshot> {
        let catalog = self.catalog()?;
        let batch = source.fetch()?;

        let options = JoinOptions {
            include_location: self.config.include_location,
        };
        let snapshot = join_snapshot(batch, &catalog, options);

        info!(
            "Loaded {} availability records from {} ({} without catalog entry)",
            snapshot.len(),
            source.describe(),
            snapshot.stats.unmatched
        );

        Ok(&*self.snapshot.insert(snapshot))
    }

    /// Load a snapshot file by name, resolved against the resource directory
    pub fn load_snapshot_file(&mut self, name: &str) -> Result<&Snapshot> {
        let source = SnapshotFile::new(self.config.snapshot_path(name));
        self.load_snapshot(&source)
    }

    /// The current snapshot
    ///
    /// # Errors
    /// * `SnapshotNotLoaded` before the first successful load
    pub fn snapshot(&self) -> Result<&Snapshot> {
        self.snapshot.as_ref().ok_or(CarparkError::SnapshotNotLoaded)
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Sort the current snapshot by lots available and write the export file
    pub fn export(&self) -> Result<ExportSummary> {
        let snapshot = self.snapshot()?;
        let sorted = query::sort_by_available_ascending(&snapshot.records);
        let content = exporter::render(&sorted, &snapshot.timestamp, self.config.export_format)?;

        exporter::write_export(&self.config.export_path(), &content)
    }

    /// Map markers for the current snapshot after applying `filter`.
    ///
    /// With `most_lots_only` the result holds the located record with the
    /// most lots, or nothing when no record is located.
    pub fn markers(&self, filter: &MapFilter, most_lots_only: bool) -> Result<Vec<MapMarker>> {
        let snapshot = self.snapshot()?;
        let located = query::with_location(&filter.apply(&snapshot.records));

        let selected = if most_lots_only {
            match query::max_total_lots(&located) {
                Ok(record) => vec![record.clone()],
                Err(CarparkError::EmptyInput { .. }) => Vec::new(),
                Err(e) => return Err(e),
            }
        } else {
            located
        };

        Ok(map_markers::build_markers(
            &selected,
            &self.config.marker_thresholds,
        ))
    }

    /// Snapshot files in the resource directory matching the configured pattern
    pub fn discover_snapshots(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.config.resource_dir.join(&self.config.snapshot_pattern);
        let pattern = pattern.to_string_lossy();
        debug!("Discovering snapshots with pattern {}", pattern);

        let entries = glob::glob(&pattern).map_err(|e| {
            CarparkError::configuration(format!("Invalid snapshot pattern '{}': {}", pattern, e))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable snapshot candidate: {}", e),
            }
        }
        paths.sort();
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::AvailabilityRecord;
    use crate::app::services::availability::LiveBatch;
    use tempfile::TempDir;

    const CATALOG: &str = "Carpark Number,Carpark Type,Type of Parking System,Location,Address\n\
                           ACB,BASEMENT CAR PARK,ELECTRONIC PARKING,1.3007 103.8545,BLK 270/271 ALBERT CENTRE\n\
                           AH1,SURFACE CAR PARK,ELECTRONIC PARKING,1.3036 103.8371,\"BLK 101, JALAN DUSUN\"\n\
                           ACM,MULTI-STOREY CAR PARK,ELECTRONIC PARKING,,BLK 98A ALJUNIED CRESCENT\n";

    const SNAPSHOT: &str = "Timestamp: 2023-07-31T10:00:00\n\
                            Carpark Number,Total Lots,Lots Available\n\
                            ACB,100,45\n\
                            XYZ,50,0\n\
                            ACM,600,12\n\
                            AH1,10,3\n";

    fn context_in(dir: &TempDir) -> CarparkContext {
        std::fs::write(dir.path().join("carpark-information.csv"), CATALOG).unwrap();
        std::fs::write(dir.path().join("carpark-availability-v1.csv"), SNAPSHOT).unwrap();
        CarparkContext::new(CarparkConfig::default().with_resource_dir(dir.path()))
    }

    #[test]
    fn test_snapshot_required_before_reports() {
        let dir = TempDir::new().unwrap();
        let context = context_in(&dir);

        assert!(!context.has_snapshot());
        assert!(matches!(
            context.snapshot(),
            Err(CarparkError::SnapshotNotLoaded)
        ));
        assert!(matches!(
            context.export(),
            Err(CarparkError::SnapshotNotLoaded)
        ));
    }

    #[test]
    fn test_load_snapshot_file() {
        let dir = TempDir::new().unwrap();
        let mut context = context_in(&dir);

        let snapshot = context
            .load_snapshot_file("carpark-availability-v1.csv")
            .unwrap();
        assert_eq!(snapshot.timestamp, "Timestamp: 2023-07-31T10:00:00");
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.stats.unmatched, 1);
        assert!(context.has_snapshot());
    }

    #[test]
    fn test_catalog_loaded_once() {
        let dir = TempDir::new().unwrap();
        let mut context = context_in(&dir);

        context
            .load_snapshot_file("carpark-availability-v1.csv")
            .unwrap();
        context
            .load_snapshot_file("carpark-availability-v1.csv")
            .unwrap();
        let catalog = context.catalog().unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(context.catalogs.load_count(), 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut context = context_in(&dir);

        context
            .load_snapshot_file("carpark-availability-v1.csv")
            .unwrap();
        assert!(context.load_snapshot_file("missing.csv").is_err());

        assert_eq!(context.snapshot().unwrap().len(), 4);
    }

    #[test]
    fn test_load_from_live_batch() {
        let dir = TempDir::new().unwrap();
        let mut context = context_in(&dir);
        let source = LiveBatch::new(vec![AvailabilityRecord::new("ACB", 100, 45)])
            .with_timestamp("Timestamp: live");

        let snapshot = context.load_snapshot(&source).unwrap();
        assert_eq!(snapshot.timestamp, "Timestamp: live");
        assert_eq!(snapshot.records[0].address(), "BLK 270/271 ALBERT CENTRE");
    }

    #[test]
    fn test_export_writes_sorted_file() {
        let dir = TempDir::new().unwrap();
        let mut context = context_in(&dir);
        context
            .load_snapshot_file("carpark-availability-v1.csv")
            .unwrap();

        let summary = context.export().unwrap();
        assert_eq!(summary.lines_written, 6);

        let written = std::fs::read_to_string(context.config().export_path()).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines[0], "Timestamp: 2023-07-31T10:00:00");
        assert_eq!(lines[2], "XYZ,50,0,");
        assert_eq!(lines[3], "AH1,10,3,BLK 101, JALAN DUSUN");
        assert_eq!(lines[5], "ACB,100,45,BLK 270/271 ALBERT CENTRE");
    }

    #[test]
    fn test_markers_only_for_located_records() {
        let dir = TempDir::new().unwrap();
        let mut context = context_in(&dir);
        context
            .load_snapshot_file("carpark-availability-v1.csv")
            .unwrap();

        let markers = context.markers(&MapFilter::default(), false).unwrap();
        let numbers: Vec<_> = markers.iter().map(|m| m.number.as_str()).collect();
        assert_eq!(numbers, vec!["ACB", "AH1"]);
    }

    #[test]
    fn test_most_lots_marker_ignores_unlocated() {
        let dir = TempDir::new().unwrap();
        let mut context = context_in(&dir);
        context
            .load_snapshot_file("carpark-availability-v1.csv")
            .unwrap();

        // ACM has the most lots overall but no location
        let markers = context.markers(&MapFilter::default(), true).unwrap();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].number, "ACB");

        let none = context
            .markers(&MapFilter::new("nowhere", 0.0), true)
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_discover_snapshots() {
        let dir = TempDir::new().unwrap();
        let context = context_in(&dir);
        std::fs::write(dir.path().join("carpark-availability-v2.csv"), SNAPSHOT).unwrap();
        std::fs::write(dir.path().join("unrelated.csv"), "x").unwrap();

        let found = context.discover_snapshots().unwrap();
        let names: Vec<_> = found
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            names,
            vec!["carpark-availability-v1.csv", "carpark-availability-v2.csv"]
        );
    }
}
