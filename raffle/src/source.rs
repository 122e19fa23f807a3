//! CSV item source
//!
//! Rows look like `name,value,participant,participant,...` with no header.
//! Malformed rows, including rows that are not valid UTF-8, are skipped with
//! a warning; only I/O failures and duplicate item names abort the load.

use csv::{ReaderBuilder, StringRecord};
use displaydoc::Display;
use raffle_draw::Item;
use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Minimum fields in a row: name, value and at least one participant.
pub const MIN_FIELDS: usize = 3;

/// Fatal errors while loading items.
#[derive(Debug, Display, Error)]
pub enum SourceError {
    /// Failed to open {path}: {source}
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Failed to read CSV records: {0}
    Csv(#[from] csv::Error),

    /// Duplicate item name in input: {0}
    DuplicateItem(String),
}

/// Problems with a single row. The row is skipped.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum RowError {
    /// expected at least 3 fields, found {0}
    TooFewFields(usize),

    /// item value is not an integer: "{0}"
    InvalidValue(String),

    /// row is not valid UTF-8 in field {0}
    InvalidUtf8(usize),
}

/// A row that was left out of the raffle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the input.
    pub line: u64,
    pub error: RowError,
}

/// Items read from a source, plus whatever had to be skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedItems {
    pub items: Vec<Item>,
    pub skipped: Vec<SkippedRow>,
}

/// Load items from a CSV file
pub fn load_items(path: &Path) -> Result<LoadedItems, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_items(file)
}

/// Read items from any CSV stream
pub fn read_items<R: io::Read>(reader: R) -> Result<LoadedItems, SourceError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut loaded = LoadedItems::default();
    let mut names = HashSet::new();

    for result in csv.byte_records() {
        let raw = result?;
        let line = raw.position().map(|p| p.line()).unwrap_or(0);

        let parsed = StringRecord::from_byte_record(raw)
            .map_err(|e| RowError::InvalidUtf8(e.utf8_error().field()))
            .and_then(|record| parse_record(&record));

        match parsed {
            Ok(item) => {
                if !names.insert(item.name.clone()) {
                    return Err(SourceError::DuplicateItem(item.name));
                }
                debug!(line, item = %item.name, entrants = item.participants.len(), "Loaded item");
                loaded.items.push(item);
            }
            Err(error) => {
                warn!(line, "Skipping row: {}", error);
                loaded.skipped.push(SkippedRow { line, error });
            }
        }
    }

    Ok(loaded)
}

/// Parse one CSV row into an item
pub fn parse_record(record: &StringRecord) -> Result<Item, RowError> {
    if record.len() < MIN_FIELDS {
        return Err(RowError::TooFewFields(record.len()));
    }

    let name = record[0].trim();
    let value = record[1]
        .trim()
        .parse::<i64>()
        .map_err(|_| RowError::InvalidValue(record[1].to_string()))?;

    Ok(Item::new(name, value, record.iter().skip(2)))
}
