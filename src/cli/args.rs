//! Command-line argument definitions for carpark-info
//!
//! Each subcommand corresponds to one report of the interactive menu; running
//! without a subcommand starts the menu itself.

use crate::config::{CarparkConfig, ExportFormat};
use crate::constants::DEFAULT_RESOURCE_DIR;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Carpark availability reports for the metadata and snapshot CSV files
///
/// Joins availability snapshots with carpark metadata, lists carparks by
/// availability or address and writes a sorted export.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "carpark-info",
    version,
    about = "Carpark availability reports from metadata and snapshot CSV files"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the metadata and snapshot files
    #[arg(
        long = "resource-dir",
        value_name = "DIR",
        default_value = DEFAULT_RESOURCE_DIR,
        global = true
    )]
    pub resource_dir: PathBuf,

    /// Metadata file name inside the resource directory
    #[arg(long = "catalog", value_name = "FILE", global = true)]
    pub catalog_file: Option<String>,

    /// Do not attach catalog locations to joined records
    #[arg(long = "no-location", global = true)]
    pub no_location: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Only show warnings and errors in the log
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Total number of carparks in the metadata file
    Catalog,
    /// All basement carparks in the metadata file
    Basements,
    /// Read a snapshot and print its timestamp and record count
    Load(SnapshotArgs),
    /// Carparks without available lots
    Full(SnapshotArgs),
    /// Carparks with at least the given percentage of lots available
    Available(PercentArgs),
    /// As `available`, with addresses
    Addresses(PercentArgs),
    /// Carparks whose address contains the query
    Location(LocationArgs),
    /// The carpark with the most lots
    MostLots(SnapshotArgs),
    /// Write the snapshot sorted by lots available to the export file
    Export(ExportArgs),
    /// Map markers for located carparks
    Markers(MarkersArgs),
    /// List snapshot files in the resource directory
    Sources,
    /// Interactive numbered menu
    Menu,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SnapshotArgs {
    /// Snapshot file, resolved against the resource directory
    #[arg(short = 's', long = "snapshot", value_name = "FILE")]
    pub snapshot: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct PercentArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,

    /// Minimum percentage of lots available (0-100)
    #[arg(
        short = 'p',
        long = "min-percent",
        value_name = "N",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub min_percent: u8,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LocationArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,

    /// Address fragment to search for, case-insensitive
    #[arg(value_name = "QUERY")]
    pub query: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,

    /// Export layout
    #[arg(long = "format", value_enum, default_value = "plain")]
    pub format: FormatArg,

    /// Export file name, resolved against the resource directory
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct MarkersArgs {
    #[command(flatten)]
    pub source: SnapshotArgs,

    /// Address fragment to filter by
    #[arg(short = 'l', long = "location", value_name = "QUERY", default_value = "")]
    pub location: String,

    /// Minimum percentage of lots available (0-100)
    #[arg(
        short = 'p',
        long = "min-percent",
        value_name = "N",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub min_percent: u8,

    /// Only the located carpark with the most lots
    #[arg(long = "most-lots")]
    pub most_lots: bool,

    /// Print markers as JSON instead of a table
    #[arg(long = "json")]
    pub json: bool,
}

/// Export layouts selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Comma-joined fields, address unquoted and commas left unescaped
    Plain,
    /// CSV quoting, address without surrounding quotes
    Quoted,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Plain => ExportFormat::Plain,
            FormatArg::Quoted => ExportFormat::Quoted,
        }
    }
}

impl Args {
    /// Log level for the `carpark_info` filter
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Configuration with the global flags applied
    pub fn to_config(&self) -> CarparkConfig {
        let mut config = CarparkConfig::default().with_resource_dir(&self.resource_dir);
        if let Some(catalog_file) = &self.catalog_file {
            config = config.with_catalog_file(catalog_file);
        }
        if self.no_location {
            config = config.without_location();
        }
        if let Some(Commands::Export(export)) = &self.command {
            config = config.with_export_format(export.format.into());
            if let Some(output) = &export.output {
                config = config.with_export_file(output);
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EXPORT_FILE_NAME;

    #[test]
    fn test_no_subcommand_parses() {
        let args = Args::try_parse_from(["carpark-info"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.resource_dir, PathBuf::from("./res"));
        assert_eq!(args.get_log_level(), "info");
    }

    #[test]
    fn test_percent_range_validated() {
        let ok = Args::try_parse_from([
            "carpark-info",
            "available",
            "-s",
            "carpark-availability-v1.csv",
            "--min-percent",
            "100",
        ]);
        assert!(ok.is_ok());

        let too_high = Args::try_parse_from([
            "carpark-info",
            "available",
            "-s",
            "carpark-availability-v1.csv",
            "--min-percent",
            "101",
        ]);
        assert!(too_high.is_err());

        let negative = Args::try_parse_from([
            "carpark-info",
            "available",
            "-s",
            "x.csv",
            "--min-percent",
            "-5",
        ]);
        assert!(negative.is_err());
    }

    #[test]
    fn test_snapshot_required() {
        assert!(Args::try_parse_from(["carpark-info", "full"]).is_err());
    }

    #[test]
    fn test_global_flags_build_config() {
        let args = Args::try_parse_from([
            "carpark-info",
            "export",
            "-s",
            "snap.csv",
            "--format",
            "quoted",
            "--resource-dir",
            "/data",
            "--catalog",
            "meta.csv",
            "--no-location",
        ])
        .unwrap();
        let config = args.to_config();

        assert_eq!(config.resource_dir, PathBuf::from("/data"));
        assert_eq!(config.catalog_file, "meta.csv");
        assert!(!config.include_location);
        assert_eq!(config.export_format, ExportFormat::Quoted);
        assert_eq!(config.export_file, EXPORT_FILE_NAME);
    }

    #[test]
    fn test_export_output_file() {
        let args = Args::try_parse_from([
            "carpark-info",
            "export",
            "-s",
            "snap.csv",
            "-o",
            "sorted.csv",
            "--resource-dir",
            "/data",
        ])
        .unwrap();

        assert_eq!(
            args.to_config().export_path(),
            PathBuf::from("/data/sorted.csv")
        );
    }

    #[test]
    fn test_verbosity_levels() {
        let debug = Args::try_parse_from(["carpark-info", "-v", "catalog"]).unwrap();
        assert_eq!(debug.get_log_level(), "debug");

        let quiet = Args::try_parse_from(["carpark-info", "catalog", "-q"]).unwrap();
        assert_eq!(quiet.get_log_level(), "warn");

        assert!(Args::try_parse_from(["carpark-info", "-v", "-q", "catalog"]).is_err());
    }

    #[test]
    fn test_location_query_positional() {
        let args =
            Args::try_parse_from(["carpark-info", "location", "-s", "snap.csv", "bedok"]).unwrap();
        match args.command {
            Some(Commands::Location(location)) => {
                assert_eq!(location.query, "bedok");
                assert_eq!(location.source.snapshot, "snap.csv");
            }
            other => panic!("expected location command, got {:?}", other),
        }
    }
}
