// Copyright (c) 2024 Botho Foundation

//! Raffle items.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An item up for draw.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Unique name of the item.
    pub name: String,

    /// Item value. Only used to order the draws.
    pub value: i64,

    /// Names of the participants who entered for this item, in input order.
    pub participants: Vec<String>,
}

impl Item {
    /// Create an item. Participant names are trimmed and blank names dropped.
    pub fn new<I, S>(name: impl Into<String>, value: i64, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            value,
            participants: participants
                .into_iter()
                .filter_map(|p| participant_name(p.as_ref()).map(str::to_string))
                .collect(),
        }
    }

    /// Iterate the participant names that identify real participants.
    pub fn participant_names(&self) -> impl Iterator<Item = &str> {
        self.participants
            .iter()
            .filter_map(|p| participant_name(p))
    }
}

/// Normalize a raw participant name. Returns `None` for blank names.
pub fn participant_name(raw: &str) -> Option<&str> {
    let name = raw.trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
