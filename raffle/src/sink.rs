//! CSV result sink

use anyhow::{Context, Result};
use raffle_draw::{Item, WinnersMap};
use serde::Serialize;
use std::io;
use std::path::Path;

/// Written for items that ended without a winner.
pub const NO_WINNER: &str = "No winner";

/// Output column names
pub const HEADER: [&str; 2] = ["Item", "Winner"];

/// One output row
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ResultRow<'a> {
    pub item: &'a str,
    pub winner: &'a str,
}

/// One row per item, in the order given
pub fn result_rows<'a>(items: &'a [Item], winners: &'a WinnersMap) -> Vec<ResultRow<'a>> {
    items
        .iter()
        .map(|item| ResultRow {
            item: &item.name,
            winner: winners.winner_or(&item.name, NO_WINNER),
        })
        .collect()
}

/// Write results as CSV with an `Item,Winner` header
pub fn write_results<W: io::Write>(writer: W, items: &[Item], winners: &WinnersMap) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(HEADER).context("Failed to write header")?;
    for row in result_rows(items, winners) {
        csv.serialize(&row).context("Failed to write result row")?;
    }
    csv.flush().context("Failed to flush results")?;
    Ok(())
}

/// Write results to a file, replacing any previous results
pub fn save_results(path: &Path, items: &[Item], winners: &WinnersMap) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_results(file, items, winners)
        .with_context(|| format!("Failed to write results to {}", path.display()))
}
