//! Weighted Raffle Runner
//!
//! Reads items and their entrants from a CSV file, draws one winner per item
//! with [`raffle_draw`], and writes the results back out as CSV.
//!
//! ## Input Format
//!
//! One item per row, no header:
//!
//! ```text
//! Gift card,25,alice,bob,carol
//! Headphones,80,bob,dave
//! ```
//!
//! ## Output Format
//!
//! ```text
//! Item,Winner
//! Gift card,alice
//! Headphones,No winner
//! ```

pub mod config;
pub mod console;
pub mod sink;
pub mod source;

pub mod commands;

pub use config::Config;
pub use console::ConsoleHooks;
pub use sink::{save_results, write_results, NO_WINNER};
pub use source::{load_items, read_items, LoadedItems, RowError, SkippedRow, SourceError};
