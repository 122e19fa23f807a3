// Copyright (c) 2024 Botho Foundation

//! Weighted raffle draws.
//!
//! Every item is drawn once, in ascending order of value. Each eligible
//! participant holds tickets for the draw, and the ticket count shrinks as
//! the participant accumulates wins:
//!
//! | Prior wins | Tickets |
//! |------------|---------|
//! | 0          | 1.0     |
//! | 1          | 0.5     |
//! | 2          | 0.333   |
//! | n          | 1/(1+n) |
//!
//! Frequent winners are never excluded, they only become less likely.
//!
//! ## Key Concepts
//!
//! - **Win record**: the total number of items a participant has won so far
//!   in this run. It only ever grows.
//! - **Eligibility pool**: the participants allowed to win an item, computed
//!   at the moment the item is drawn.
//! - **Opt-out**: a winner may leave the raffle, which removes them from every
//!   later draw.
//!
//! Randomness is always supplied by the caller as a [`rand::Rng`], so a fixed
//! generator reproduces a run exactly.

pub mod error;
pub mod item;
pub mod pool;
pub mod record;
pub mod selector;
pub mod sequencer;

pub use error::DrawError;
pub use item::Item;
pub use pool::{EligibilityPool, Ticket};
pub use record::{WinRecord, WinRecords};
pub use selector::{select_from_tickets, select_winner, ticket_weight, total_tickets};
pub use sequencer::{
    sort_by_value, DrawHooks, DrawReport, DrawSequencer, DrawSummary, NoopHooks, OptOutPolicy,
    WinnersMap,
};
