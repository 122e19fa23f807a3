// Copyright (c) 2024 Botho Foundation

//! Draw sequencing.
//!
//! Items are drawn one at a time in ascending order of value. Each draw is
//! fully applied (win recorded, opt-out handled) before the next item's pool
//! and tickets are computed, so an opt-out changes the odds of every later
//! draw.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    selector::{select_from_tickets, total_tickets},
    DrawError, EligibilityPool, Item, Ticket, WinRecords,
};

/// Whether winners are asked to leave the raffle after winning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptOutPolicy {
    /// Winners always stay in.
    #[default]
    Never,
    /// Each winner is asked through [`DrawHooks::confirm_remain`].
    Ask,
}

/// Callbacks invoked around each draw.
///
/// Hooks only observe the raffle. The one exception is
/// [`confirm_remain`](DrawHooks::confirm_remain), whose answer decides an
/// opt-out when the policy is [`OptOutPolicy::Ask`].
pub trait DrawHooks {
    /// An item is about to be drawn from these tickets.
    fn on_item(&mut self, _item: &Item, _tickets: &[Ticket]) {}

    /// Pause before the winner is revealed.
    fn pause(&mut self) {}

    /// A winner was drawn.
    fn on_winner(&mut self, _item: &Item, _winner: &str) {}

    /// Ask whether the winner stays in the following draws.
    fn confirm_remain(&mut self, _winner: &str) -> bool {
        true
    }

    /// The winner left the raffle.
    fn on_opt_out(&mut self, _winner: &str) {}

    /// The item had nobody eligible and was not drawn.
    fn on_skip(&mut self, _item: &Item) {}
}

/// Hooks that do nothing and keep every winner in.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl DrawHooks for NoopHooks {}

/// Winners by item name, in draw order.
///
/// Items without a winner have no entry. Entries are never overwritten.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WinnersMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl WinnersMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the winner of an item.
    pub fn insert(&mut self, item: &str, winner: &str) -> Result<(), DrawError> {
        if self.index.contains_key(item) {
            return Err(DrawError::DuplicateItem(item.to_string()));
        }
        self.index.insert(item.to_string(), self.entries.len());
        self.entries.push((item.to_string(), winner.to_string()));
        Ok(())
    }

    /// Winner of an item, if it had one.
    pub fn get(&self, item: &str) -> Option<&str> {
        self.index
            .get(item)
            .map(|&i| self.entries[i].1.as_str())
    }

    /// Winner of an item, or `default` when it had none.
    pub fn winner_or<'a>(&'a self, item: &str, default: &'a str) -> &'a str {
        self.get(item).unwrap_or(default)
    }

    /// Number of items with a winner.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been won.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(item, winner)` pairs in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(item, winner)| (item.as_str(), winner.as_str()))
    }
}

/// What happened in one draw.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawReport {
    /// Item name.
    pub item: String,
    /// Item value.
    pub value: i64,
    /// Tickets held at the time of the draw, in name order.
    pub tickets: Vec<Ticket>,
    /// Sum of all ticket weights.
    pub total_tickets: f64,
    /// Winning participant.
    pub winner: String,
    /// Whether the winner left the raffle afterwards.
    pub opted_out: bool,
}

/// Result of a full raffle run.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawSummary {
    /// Items in the order they were drawn.
    pub order: Vec<Item>,
    /// Winner of each item that had one.
    pub winners: WinnersMap,
    /// One report per item that was actually drawn.
    pub draws: Vec<DrawReport>,
}

impl DrawSummary {
    /// Items that ended without a winner.
    pub fn unwon(&self) -> impl Iterator<Item = &Item> {
        self.order
            .iter()
            .filter(|item| self.winners.get(&item.name).is_none())
    }
}

/// Sort items by ascending value. Items of equal value keep their order.
pub fn sort_by_value(items: &mut [Item]) {
    items.sort_by_key(|item| item.value);
}

/// Fail on the first item name that appears twice.
pub fn check_unique_names(items: &[Item]) -> Result<(), DrawError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.name.as_str()) {
            return Err(DrawError::DuplicateItem(item.name.clone()));
        }
    }
    Ok(())
}

/// Runs one draw per item over a shared set of win records.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawSequencer {
    policy: OptOutPolicy,
}

impl DrawSequencer {
    /// Create a sequencer with the given opt-out policy.
    pub fn new(policy: OptOutPolicy) -> Self {
        Self { policy }
    }

    /// The opt-out policy in use.
    pub fn policy(&self) -> OptOutPolicy {
        self.policy
    }

    /// Draw every item once.
    ///
    /// Participants named by the items are registered in `records` first;
    /// existing records keep their wins. `records` holds the final state
    /// when this returns.
    pub fn run<H, R>(
        &self,
        items: Vec<Item>,
        records: &mut WinRecords,
        hooks: &mut H,
        rng: &mut R,
    ) -> Result<DrawSummary, DrawError>
    where
        H: DrawHooks + ?Sized,
        R: Rng,
    {
        check_unique_names(&items)?;

        let mut order = items;
        sort_by_value(&mut order);
        for item in &order {
            records.register_item(item);
        }

        let mut winners = WinnersMap::new();
        let mut draws = Vec::new();

        for item in &order {
            let pool = EligibilityPool::at_draw_time(item, records);
            if pool.is_empty() {
                debug!(item = %item.name, "No eligible participants, skipping");
                hooks.on_skip(item);
                continue;
            }

            let tickets = pool.tickets(records);
            let total = total_tickets(&tickets);
            debug!(item = %item.name, pool = tickets.len(), total, "Drawing item");

            hooks.on_item(item, &tickets);
            hooks.pause();

            // Tickets are non-empty here, so selection always yields a winner
            let winner = select_from_tickets(&tickets, rng)
                .map(|t| t.name.clone())
                .ok_or_else(|| DrawError::NoWinnerSelected(item.name.clone()))?;

            let wins = records.record_win(&winner)?;
            winners.insert(&item.name, &winner)?;
            info!(item = %item.name, winner = %winner, wins, "Winner drawn");
            hooks.on_winner(item, &winner);

            let opted_out = self.policy == OptOutPolicy::Ask && !hooks.confirm_remain(&winner);
            if opted_out {
                records.opt_out(&winner);
                info!(participant = %winner, "Opted out of remaining draws");
                hooks.on_opt_out(&winner);
            }

            draws.push(DrawReport {
                item: item.name.clone(),
                value: item.value,
                tickets,
                total_tickets: total,
                winner,
                opted_out,
            });
        }

        Ok(DrawSummary {
            order,
            winners,
            draws,
        })
    }
}
