//! Configuration management and validation.
//!
//! Provides the resource locations, export settings and map marker
//! thresholds used by the pipeline. Defaults match the layout of the
//! `./res` resource directory; the CLI overrides individual fields.

use crate::constants::{
    CATALOG_FILE_NAME, DEFAULT_RESOURCE_DIR, EXPORT_FILE_NAME, SNAPSHOT_FILE_PATTERN, markers,
};
use crate::error::{CarparkError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Output layout for the sorted availability export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain comma join, address unquoted and commas left unescaped
    #[default]
    Plain,
    /// RFC 4180 quoting through the csv writer, address with quotes stripped
    Quoted,
}

/// Percentage boundaries for marker colour bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerThresholds {
    /// At or below this percentage a carpark is scarce (red)
    pub scarce_at_or_below: f64,

    /// Above this percentage a carpark is plentiful (green)
    pub plentiful_above: f64,
}

impl Default for MarkerThresholds {
    fn default() -> Self {
        Self {
            scarce_at_or_below: markers::DEFAULT_SCARCE_AT_OR_BELOW,
            plentiful_above: markers::DEFAULT_PLENTIFUL_ABOVE,
        }
    }
}

/// Global configuration for carpark processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarparkConfig {
    /// Directory containing the metadata and snapshot CSV files
    pub resource_dir: PathBuf,

    /// Metadata file name inside `resource_dir`
    pub catalog_file: String,

    /// Export file name inside `resource_dir`
    pub export_file: String,

    /// Glob pattern for snapshot discovery inside `resource_dir`
    pub snapshot_pattern: String,

    /// Attach catalog locations to joined records
    pub include_location: bool,

    pub export_format: ExportFormat,

    pub marker_thresholds: MarkerThresholds,
}

impl Default for CarparkConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from(DEFAULT_RESOURCE_DIR),
            catalog_file: CATALOG_FILE_NAME.to_string(),
            export_file: EXPORT_FILE_NAME.to_string(),
            snapshot_pattern: SNAPSHOT_FILE_PATTERN.to_string(),
            include_location: true,
            export_format: ExportFormat::Plain,
            marker_thresholds: MarkerThresholds::default(),
        }
    }
}

impl CarparkConfig {
    /// Use a different resource directory
    pub fn with_resource_dir(mut self, resource_dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = resource_dir.into();
        self
    }

    /// Use a different metadata file name
    pub fn with_catalog_file(mut self, catalog_file: impl Into<String>) -> Self {
        self.catalog_file = catalog_file.into();
        self
    }

    pub fn with_export_file(mut self, export_file: impl Into<String>) -> Self {
        self.export_file = export_file.into();
        self
    }

    pub fn with_export_format(mut self, export_format: ExportFormat) -> Self {
        self.export_format = export_format;
        self
    }

    /// Skip location association in joins
    pub fn without_location(mut self) -> Self {
        self.include_location = false;
        self
    }

    pub fn with_marker_thresholds(mut self, thresholds: MarkerThresholds) -> Self {
        self.marker_thresholds = thresholds;
        self
    }

    /// Full path to the metadata file
    pub fn catalog_path(&self) -> PathBuf {
        self.resource_dir.join(&self.catalog_file)
    }

    /// Full path to the export file
    pub fn export_path(&self) -> PathBuf {
        self.resource_dir.join(&self.export_file)
    }

    /// Resolve a snapshot file name against the resource directory.
    ///
    /// Paths with a directory component are used as given.
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        let candidate = PathBuf::from(name);
        if candidate.components().count() > 1 || candidate.is_absolute() {
            candidate
        } else {
            self.resource_dir.join(candidate)
        }
    }

    /// Check the configuration for inconsistent values
    pub fn validate(&self) -> Result<()> {
        let thresholds = &self.marker_thresholds;
        if !(0.0..=100.0).contains(&thresholds.scarce_at_or_below)
            || !(0.0..=100.0).contains(&thresholds.plentiful_above)
        {
            return Err(CarparkError::configuration(format!(
                "Marker thresholds must lie within 0-100, got {} and {}",
                thresholds.scarce_at_or_below, thresholds.plentiful_above
            )));
        }

        if thresholds.scarce_at_or_below > thresholds.plentiful_above {
            return Err(CarparkError::configuration(format!(
                "Scarce threshold {} exceeds plentiful threshold {}",
                thresholds.scarce_at_or_below, thresholds.plentiful_above
            )));
        }

        if self.catalog_file.trim().is_empty() || self.export_file.trim().is_empty() {
            return Err(CarparkError::configuration(
                "Catalog and export file names must not be empty",
            ));
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}
