//! Sorted availability export
//!
//! Renders joined records as CSV text headed by the snapshot timestamp:
//!
//! ```text
//! <timestamp>
//! Carpark Number,Total Lots,Lots Available,Address
//! <number>,<totalLots>,<lotsAvailable>,<address>
//! ```
//!
//! Records are written in the order given; callers sort first. Both formats
//! write the address with surrounding quote characters stripped. The plain
//! format does not escape embedded commas, so such an address cannot be read
//! back unambiguously. The quoted format goes through the csv writer and
//! quotes those fields.

use crate::app::models::JoinedRecord;
use crate::config::ExportFormat;
use crate::constants::EXPORT_HEADER;
use crate::error::{CarparkError, Result};
use std::path::Path;
use tracing::info;

/// Render records in the plain export format, commas left unescaped
pub fn export(records: &[JoinedRecord], timestamp: &str) -> String {
    let mut content = String::new();
    content.push_str(timestamp);
    content.push('\n');
    content.push_str(EXPORT_HEADER);
    content.push('\n');

    for record in records {
        content.push_str(&format!(
            "{},{},{},{}\n",
            record.number(),
            record.total_lots(),
            record.lots_available(),
            record.display_address()
        ));
    }

    content
}

/// Render records with RFC 4180 quoting and quote-stripped addresses
pub fn export_quoted(records: &[JoinedRecord], timestamp: &str) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER.split(','))?;
    for record in records {
        let total_lots = record.total_lots().to_string();
        let lots_available = record.lots_available().to_string();
        writer.write_record([
            record.number(),
            total_lots.as_str(),
            lots_available.as_str(),
            record.display_address(),
        ])?;
    }

    let body = writer.into_inner().map_err(|e| {
        CarparkError::source_unavailable("export buffer", std::io::Error::other(e.to_string()))
    })?;

    let mut content = String::with_capacity(timestamp.len() + 1 + body.len());
    content.push_str(timestamp);
    content.push('\n');
    content.push_str(&String::from_utf8_lossy(&body));
    Ok(content)
}

/// Render records in the requested format
pub fn render(records: &[JoinedRecord], timestamp: &str, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Plain => Ok(export(records, timestamp)),
        ExportFormat::Quoted => export_quoted(records, timestamp),
    }
}

/// Summary of a written export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Lines written, including the timestamp and header lines
    pub lines_written: usize,
    pub path: std::path::PathBuf,
}

/// Write rendered export text, replacing any existing file
///
/// # Errors
/// * `SourceUnavailable` when the directory cannot be created or the file written
pub fn write_export(path: &Path, content: &str) -> Result<ExportSummary> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| CarparkError::source_unavailable(parent.display().to_string(), e))?;
    }

    std::fs::write(path, content)
        .map_err(|e| CarparkError::source_unavailable(path.display().to_string(), e))?;

    let summary = ExportSummary {
        lines_written: content.lines().count(),
        path: path.to_path_buf(),
    };
    info!(
        "Wrote {} lines to {}",
        summary.lines_written,
        path.display()
    );
    Ok(summary)
}
