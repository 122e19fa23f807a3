//! Roster command: show what would be drawn, without drawing

use anyhow::Result;
use raffle_draw::{sort_by_value, Item};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::load_input;

/// Items in draw order and every participant with the number of items they
/// entered for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    pub items: Vec<Item>,
    pub participants: BTreeMap<String, usize>,
}

impl Roster {
    pub fn build(items: &[Item]) -> Self {
        let mut sorted = items.to_vec();
        sort_by_value(&mut sorted);

        let mut participants = BTreeMap::new();
        for item in items {
            let unique: BTreeSet<&str> = item.participant_names().collect();
            for name in unique {
                *participants.entry(name.to_string()).or_insert(0) += 1;
            }
        }

        Self {
            items: sorted,
            participants,
        }
    }
}

/// Print the participant list
pub fn print_participants(participants: &BTreeMap<String, usize>) {
    println!("Total List of Participants:");
    for (name, entries) in participants {
        println!("- Participant: {} ({} items)", name, entries);
    }
}

/// Run the roster command
pub fn run(input: &Path) -> Result<()> {
    let loaded = load_input(input)?;
    let roster = Roster::build(&loaded.items);

    println!("Items in draw order:");
    for item in &roster.items {
        println!(
            "  {:<24} value {:>8}  entrants {}",
            item.name,
            item.value,
            item.participant_names().count()
        );
    }
    println!();
    print_participants(&roster.participants);

    Ok(())
}
