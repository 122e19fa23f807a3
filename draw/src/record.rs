// Copyright (c) 2024 Botho Foundation

//! Win records and the participant registry.
//!
//! A participant's record is a single counter of items won across the whole
//! run. Which items were won does not matter for weighting.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{item::participant_name, selector::ticket_weight, DrawError, Item};

/// Per-participant win history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WinRecord {
    wins: u32,
}

impl WinRecord {
    /// A record with no wins.
    pub fn new() -> Self {
        Self::default()
    }

    /// A record with a given number of prior wins.
    pub fn with_wins(wins: u32) -> Self {
        Self { wins }
    }

    /// Number of items won so far.
    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Count one more win. Returns the new total.
    pub fn record_win(&mut self) -> u32 {
        self.wins = self.wins.saturating_add(1);
        self.wins
    }

    /// Tickets this participant holds in their next draw.
    pub fn tickets(&self) -> f64 {
        ticket_weight(self.wins)
    }
}

/// Registry of active participants and their win records.
///
/// Only participants present in the registry can win. Opting out removes a
/// participant for the rest of the run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WinRecords {
    records: BTreeMap<String, WinRecord>,
}

impl WinRecords {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every participant named by the given items with zero wins.
    pub fn from_items(items: &[Item]) -> Self {
        let mut records = Self::new();
        for item in items {
            records.register_item(item);
        }
        records
    }

    /// Register a participant. Existing records are left untouched.
    ///
    /// Returns `false` if the name is blank.
    pub fn register(&mut self, name: &str) -> bool {
        match participant_name(name) {
            Some(name) => {
                self.records.entry(name.to_string()).or_default();
                true
            }
            None => false,
        }
    }

    /// Register every participant of one item.
    pub fn register_item(&mut self, item: &Item) {
        for name in item.participant_names() {
            self.records.entry(name.to_string()).or_default();
        }
    }

    /// Look up a participant's record.
    pub fn get(&self, name: &str) -> Option<&WinRecord> {
        self.records.get(name)
    }

    /// Prior wins of a participant, if registered.
    pub fn wins(&self, name: &str) -> Option<u32> {
        self.get(name).map(WinRecord::wins)
    }

    /// Whether a participant is still in the raffle.
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Count a win for a participant. Returns their new total.
    pub fn record_win(&mut self, name: &str) -> Result<u32, DrawError> {
        self.records
            .get_mut(name)
            .map(WinRecord::record_win)
            .ok_or_else(|| DrawError::UnknownParticipant(name.to_string()))
    }

    /// Remove a participant from the raffle, returning their final record.
    pub fn opt_out(&mut self, name: &str) -> Option<WinRecord> {
        self.records.remove(name)
    }

    /// Number of active participants.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no participants are registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate active participants in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WinRecord)> {
        self.records.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Sum of all wins recorded for active participants.
    pub fn total_wins(&self) -> u64 {
        self.records.values().map(|r| r.wins() as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_win_is_monotonic() {
        let mut record = WinRecord::new();
        assert_eq!(record.wins(), 0);
        assert_eq!(record.record_win(), 1);
        assert_eq!(record.record_win(), 2);
        assert_eq!(record.wins(), 2);
    }

    #[test]
    fn test_record_tickets_shrink_with_wins() {
        assert_eq!(WinRecord::new().tickets(), 1.0);
        assert_eq!(WinRecord::with_wins(1).tickets(), 0.5);
        assert!((WinRecord::with_wins(2).tickets() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_items_registers_each_name_once() {
        let items = vec![
            Item::new("A", 10, ["x", "y"]),
            Item::new("B", 5, ["x", " y ", "z"]),
        ];
        let records = WinRecords::from_items(&items);

        assert_eq!(records.len(), 3);
        let names: Vec<&str> = records.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert!(records.iter().all(|(_, r)| r.wins() == 0));
    }

    #[test]
    fn test_register_keeps_existing_wins() {
        let mut records = WinRecords::new();
        assert!(records.register("alice"));
        records.record_win("alice").unwrap();

        assert!(records.register("alice"));
        assert_eq!(records.wins("alice"), Some(1));
    }

    #[test]
    fn test_register_rejects_blank_name() {
        let mut records = WinRecords::new();
        assert!(!records.register("  "));
        assert!(records.is_empty());
    }

    #[test]
    fn test_record_win_only_touches_winner() {
        let items = vec![Item::new("A", 1, ["x", "y"])];
        let mut records = WinRecords::from_items(&items);

        records.record_win("x").unwrap();

        assert_eq!(records.wins("x"), Some(1));
        assert_eq!(records.wins("y"), Some(0));
        assert_eq!(records.total_wins(), 1);
    }

    #[test]
    fn test_record_win_unknown_participant() {
        let mut records = WinRecords::new();
        assert_eq!(
            records.record_win("ghost"),
            Err(DrawError::UnknownParticipant("ghost".to_string()))
        );
    }

    #[test]
    fn test_opt_out_removes_participant() {
        let items = vec![Item::new("A", 1, ["x", "y"])];
        let mut records = WinRecords::from_items(&items);
        records.record_win("x").unwrap();

        let last = records.opt_out("x").unwrap();

        assert_eq!(last.wins(), 1);
        assert!(!records.contains("x"));
        assert!(records.contains("y"));
        assert!(records.opt_out("x").is_none());
    }
}
