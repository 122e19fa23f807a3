//! Simulate command: repeat the raffle many times and report how often each
//! participant wins each item.

use anyhow::{Context, Result};
use raffle_draw::{DrawSequencer, Item, NoopHooks, OptOutPolicy, WinRecords};
use rand::Rng;
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::DrawConfig;

use super::load_input;

/// Win counts for one item across all simulated runs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemTally {
    pub item: String,
    pub value: i64,
    pub wins: BTreeMap<String, usize>,
    pub no_winner: usize,
}

impl ItemTally {
    /// Fraction of runs a participant won this item
    pub fn share(&self, participant: &str, runs: usize) -> f64 {
        if runs == 0 {
            return 0.0;
        }
        self.wins.get(participant).copied().unwrap_or(0) as f64 / runs as f64
    }
}

/// Aggregated results of repeated runs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub runs: usize,
    /// One tally per item, in draw order
    pub items: Vec<ItemTally>,
    /// Total items won per participant across all runs
    pub totals: BTreeMap<String, usize>,
}

/// Run the raffle `runs` times from fresh records, without opt-outs.
pub fn simulate<R: Rng>(items: &[Item], runs: usize, rng: &mut R) -> Result<SimulationReport> {
    let sequencer = DrawSequencer::new(OptOutPolicy::Never);
    let mut report = SimulationReport {
        runs,
        ..SimulationReport::default()
    };
    let mut index: BTreeMap<String, usize> = BTreeMap::new();

    for round in 0..runs {
        let mut records = WinRecords::from_items(items);
        let summary = sequencer
            .run(items.to_vec(), &mut records, &mut NoopHooks, rng)
            .with_context(|| format!("Simulated run {} failed", round))?;

        if report.items.is_empty() {
            for (i, item) in summary.order.iter().enumerate() {
                index.insert(item.name.clone(), i);
                report.items.push(ItemTally {
                    item: item.name.clone(),
                    value: item.value,
                    ..ItemTally::default()
                });
            }
        }

        for item in &summary.order {
            let tally = &mut report.items[index[&item.name]];
            match summary.winners.get(&item.name) {
                Some(winner) => {
                    *tally.wins.entry(winner.to_string()).or_insert(0) += 1;
                    *report.totals.entry(winner.to_string()).or_insert(0) += 1;
                }
                None => tally.no_winner += 1,
            }
        }
    }

    Ok(report)
}

/// Run the simulate command
pub fn run(input: &Path, runs: usize, draw: &DrawConfig) -> Result<()> {
    let loaded = load_input(input)?;
    let mut rng = draw.rng();
    let report = simulate(&loaded.items, runs, &mut rng)?;

    println!("Simulated {} runs", report.runs);
    for tally in &report.items {
        println!();
        println!("Item {} with value {}", tally.item, tally.value);
        for name in tally.wins.keys() {
            println!(
                "  {:<20} {:>6.2}%",
                name,
                tally.share(name, report.runs) * 100.0
            );
        }
        if tally.no_winner > 0 {
            println!(
                "  {:<20} {:>6.2}%",
                "(no winner)",
                tally.no_winner as f64 / report.runs as f64 * 100.0
            );
        }
    }

    println!();
    println!("Items won per run:");
    for (name, total) in &report.totals {
        println!("  {:<20} {:>8.3}", name, *total as f64 / report.runs.max(1) as f64);
    }

    Ok(())
}
