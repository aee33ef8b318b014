//! Plain-text report tables shared by the subcommands and the menu
//!
//! Writers take any `Write` so the same tables go to stdout or into a test
//! buffer. Headings are printed by the caller.

use crate::app::models::{CarparkRecord, JoinedRecord, Snapshot};
use crate::app::services::carpark_catalog::CarparkCatalog;
use crate::app::services::exporter::ExportSummary;
use crate::app::services::map_markers::MapMarker;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Coloured section heading
pub fn write_heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", title.bright_green().bold())
}

pub fn write_catalog_total<W: Write>(
    out: &mut W,
    catalog: &CarparkCatalog,
    file_name: &str,
) -> io::Result<()> {
    writeln!(
        out,
        "Total Number of carparks in '{}': {}",
        file_name,
        catalog.len()
    )
}

pub fn write_basements<W: Write>(out: &mut W, basements: &[&CarparkRecord]) -> io::Result<()> {
    writeln!(out, "{:10} {:20} {}", "Carpark No", "Carpark Type", "Address")?;
    for carpark in basements {
        writeln!(
            out,
            "{:10} {:20} {}",
            carpark.number,
            carpark.carpark_type,
            carpark.display_address()
        )?;
    }
    write_total(out, basements.len())
}

/// Timestamp line of a freshly loaded snapshot
pub fn write_snapshot_loaded<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    writeln!(out, "{}", snapshot.timestamp)
}

pub fn write_snapshot_total<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    writeln!(out, "Total Number of Carparks in the File: {}", snapshot.len())
}

/// Carparks with no lots available, one number per line
pub fn write_full<W: Write>(out: &mut W, records: &[JoinedRecord]) -> io::Result<()> {
    for record in records {
        writeln!(out, "Carpark Number: {}", record.number())?;
    }
    write_total(out, records.len())
}

/// Availability table, optionally with an address column, and a total line
pub fn write_availability<W: Write>(
    out: &mut W,
    records: &[JoinedRecord],
    with_address: bool,
) -> io::Result<()> {
    write_availability_rows(out, records, with_address)?;
    write_total(out, records.len())
}

/// Address search result; a miss prints a single notice
pub fn write_location<W: Write>(
    out: &mut W,
    query: &str,
    records: &[JoinedRecord],
) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No carparks found at location: {}", query.to_uppercase());
    }
    write_availability(out, records, true)
}

pub fn write_most_lots<W: Write>(out: &mut W, record: &JoinedRecord) -> io::Result<()> {
    write_availability_rows(out, std::slice::from_ref(record), true)
}

pub fn write_export_summary<W: Write>(out: &mut W, summary: &ExportSummary) -> io::Result<()> {
    writeln!(out, "Lines written: {}", summary.lines_written)?;
    writeln!(out, "Wrote to file: {}", summary.path.display())
}

pub fn write_markers<W: Write>(out: &mut W, markers: &[MapMarker]) -> io::Result<()> {
    writeln!(
        out,
        "{:10} {:>10} {:>11} {:10}",
        "Carpark No", "Latitude", "Longitude", "Band"
    )?;
    for marker in markers {
        writeln!(
            out,
            "{:10} {:>10.4} {:>11.4} {:10}",
            marker.number,
            marker.location.latitude,
            marker.location.longitude,
            marker.band.to_string()
        )?;
    }
    write_total(out, markers.len())
}

pub fn write_sources<W: Write>(out: &mut W, paths: &[PathBuf]) -> io::Result<()> {
    if paths.is_empty() {
        return writeln!(out, "No snapshot files found");
    }
    for path in paths {
        writeln!(out, "{}", path.display())?;
    }
    write_total(out, paths.len())
}

fn write_availability_rows<W: Write>(
    out: &mut W,
    records: &[JoinedRecord],
    with_address: bool,
) -> io::Result<()> {
    let header = format!(
        "{:10} {:10} {:14} {:10}",
        "Carpark No", "Total Lots", "Lots Available", "Percentage"
    );
    if with_address {
        writeln!(out, "{}   {}", header, "Address")?;
    } else {
        writeln!(out, "{}", header)?;
    }

    for record in records {
        let row = format!(
            "{:10} {:>10} {:>14} {:10.1}",
            record.number(),
            record.total_lots(),
            record.lots_available(),
            record.percentage()
        );
        if with_address {
            writeln!(out, "{}   {}", row, record.display_address())?;
        } else {
            writeln!(out, "{}", row)?;
        }
    }
    Ok(())
}

fn write_total<W: Write>(out: &mut W, count: usize) -> io::Result<()> {
    writeln!(out, "Total number: {}", count)
}
