// Copyright (c) 2024 Botho Foundation

//! Eligibility pools.
//!
//! A pool is the set of participants who may win one item. Pools are built
//! when the item is drawn, not ahead of time, so opt-outs from earlier draws
//! are always reflected.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{item::participant_name, selector::ticket_weight, Item, WinRecords};

/// One participant's share of a single draw.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ticket {
    /// Participant name.
    pub name: String,

    /// Wins before this draw.
    pub wins: u32,

    /// Ticket weight, `1 / (1 + wins)`.
    pub weight: f64,
}

impl Ticket {
    /// Build the ticket for a participant with the given prior wins.
    pub fn new(name: impl Into<String>, wins: u32) -> Self {
        Self {
            name: name.into(),
            wins,
            weight: ticket_weight(wins),
        }
    }
}

/// Participants eligible to win one item, kept in name order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EligibilityPool {
    names: BTreeSet<String>,
}

impl EligibilityPool {
    /// Create a pool from raw names. Names are trimmed, blanks dropped and
    /// duplicates collapsed.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .filter_map(|n| participant_name(n.as_ref()).map(str::to_string))
                .collect(),
        }
    }

    /// The item's participants who are still registered.
    pub fn at_draw_time(item: &Item, records: &WinRecords) -> Self {
        Self {
            names: item
                .participant_names()
                .filter(|name| records.contains(name))
                .map(str::to_string)
                .collect(),
        }
    }

    /// Whether a participant is in the pool.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Remove a participant. Returns whether they were present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    /// Number of eligible participants.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nobody is eligible.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate eligible names in name order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Tickets for every eligible participant, in name order.
    ///
    /// Participants without a record count as having no wins.
    pub fn tickets(&self, records: &WinRecords) -> Vec<Ticket> {
        self.names
            .iter()
            .map(|name| Ticket::new(name.as_str(), records.wins(name).unwrap_or(0)))
            .collect()
    }
}
