//! Header-keyed CSV table parsing
//!
//! Reads comma-delimited text whose first non-blank line is the header into
//! an ordered sequence of records keyed by header name. The `csv` reader runs
//! in flexible mode: fields past the header's arity are joined back into the
//! final column with `,`, so a trailing address column may carry unquoted
//! commas. Double-quoted fields are unquoted by the reader and may contain
//! commas anywhere in the row.

use crate::constants::BYTE_ORDER_MARK;
use crate::error::{CarparkError, Result};
use csv::StringRecord;
use std::collections::HashMap;

/// Parsed CSV content with header-to-column mapping
#[derive(Debug, Clone)]
pub struct CsvTable {
    headers: Vec<String>,
    name_to_index: HashMap<String, usize>,
    rows: Vec<CsvRow>,
}

#[derive(Debug, Clone)]
struct CsvRow {
    line: usize,
    values: Vec<String>,
}

/// Borrowed view of one data row
#[derive(Debug, Clone, Copy)]
pub struct CsvRecord<'a> {
    table: &'a CsvTable,
    row: &'a CsvRow,
}

impl CsvTable {
    /// Parse text where line 1 is the header
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_from_line(text, 1)
    }

    /// Parse text whose first line is line `first_line` of a larger file.
    ///
    /// Line numbers in `MalformedRow` and `InvalidField` errors are reported
    /// against the larger file, so callers that strip a preamble still point
    /// at the right place.
    pub fn parse_from_line(text: &str, first_line: usize) -> Result<Self> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let line_offset = first_line.saturating_sub(1);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        let mut record = StringRecord::new();

        let headers: Vec<String> = loop {
            if !reader.read_record(&mut record)? {
                return Err(CarparkError::empty_input(
                    "parse CSV table without a header line",
                ));
            }
            if !is_blank(&record) {
                break record.iter().map(|h| h.trim().to_string()).collect();
            }
        };

        let mut name_to_index = HashMap::with_capacity(headers.len());
        for (index, name) in headers.iter().enumerate() {
            // First occurrence wins for repeated header names
            name_to_index.entry(name.clone()).or_insert(index);
        }

        let mut rows = Vec::new();
        while reader.read_record(&mut record)? {
            if is_blank(&record) {
                continue;
            }
            let line = record
                .position()
                .map_or(0, |position| position.line() as usize)
                + line_offset;

            rows.push(CsvRow {
                line,
                values: align_to_header(&record, headers.len(), line)?,
            });
        }

        Ok(Self {
            headers,
            name_to_index,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// Fail with `MissingColumn` unless every named column is present
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        match names.iter().find(|name| !self.has_column(name)) {
            Some(missing) => Err(CarparkError::missing_column(*missing)),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records in file order
    pub fn records(&self) -> impl Iterator<Item = CsvRecord<'_>> {
        self.rows.iter().map(move |row| CsvRecord { table: self, row })
    }
}

impl<'a> CsvRecord<'a> {
    /// Value for a header name
    pub fn get(&self, name: &str) -> Option<&'a str> {
        let index = *self.table.name_to_index.get(name)?;
        self.row.values.get(index).map(String::as_str)
    }

    /// Value for a header name, failing if the column does not exist
    pub fn require(&self, name: &str) -> Result<&'a str> {
        self.get(name)
            .ok_or_else(|| CarparkError::missing_column(name))
    }

    /// Parse a non-negative integer field
    pub fn require_u32(&self, name: &str) -> Result<u32> {
        let value = self.require(name)?;
        value
            .trim()
            .parse::<u32>()
            .map_err(|_| CarparkError::InvalidField {
                line: self.row.line,
                column: name.to_string(),
                value: value.to_string(),
            })
    }

    /// 1-based line number in the source text
    pub fn line(&self) -> usize {
        self.row.line
    }
}

/// Whitespace-only lines come through as a single blank field
fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].trim().is_empty()
}

/// Fit a row to `arity` columns, folding any surplus into the last one
fn align_to_header(record: &StringRecord, arity: usize, line: usize) -> Result<Vec<String>> {
    if record.len() < arity {
        return Err(CarparkError::MalformedRow {
            line,
            expected: arity,
            found: record.len(),
        });
    }

    let mut values: Vec<String> = record
        .iter()
        .take(arity.saturating_sub(1))
        .map(str::to_string)
        .collect();
    let rest: Vec<&str> = record.iter().skip(values.len()).collect();
    values.push(rest.join(","));
    Ok(values)
}
