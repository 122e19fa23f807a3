//! CLI Commands
//!
//! Implementation of all raffle CLI commands.

pub mod draw;
pub mod roster;
pub mod simulate;

use anyhow::{Context, Result};
use std::path::Path;

use crate::source::{load_items, LoadedItems};

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("\x1b[31mError:\x1b[0m {}", message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("\x1b[32m{}\x1b[0m", message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("\x1b[33mWarning:\x1b[0m {}", message);
}

/// Load items from the input file, reporting skipped rows
pub fn load_input(path: &Path) -> Result<LoadedItems> {
    let loaded = load_items(path)
        .with_context(|| format!("Failed to load raffle data from {}", path.display()))?;

    for skipped in &loaded.skipped {
        print_warning(&format!("Skipped line {}: {}", skipped.line, skipped.error));
    }

    Ok(loaded)
}
