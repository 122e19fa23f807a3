//! Draw command: run the raffle and write the results

use anyhow::{Context, Result};
use raffle_draw::{DrawHooks, DrawSequencer, DrawSummary, Item, WinRecords};
use tracing::info;

use crate::{config::Config, console::ConsoleHooks, sink::save_results, NO_WINNER};

use super::{load_input, print_success, print_warning, roster::print_participants, roster::Roster};

/// Draw the given items and write the results file.
pub fn draw_items<H: DrawHooks>(
    config: &Config,
    items: Vec<Item>,
    hooks: &mut H,
) -> Result<DrawSummary> {
    if items.is_empty() {
        print_warning("No items to draw.");
    }

    let mut records = WinRecords::from_items(&items);
    let mut rng = config.draw.rng();
    let sequencer = DrawSequencer::new(config.draw.opt_out_policy());

    info!(
        items = items.len(),
        participants = records.len(),
        seeded = config.draw.seed.is_some(),
        "Starting raffle"
    );

    let summary = sequencer
        .run(items, &mut records, hooks, &mut rng)
        .context("Raffle failed")?;

    save_results(&config.files.output, &summary.order, &summary.winners)?;

    info!(
        drawn = summary.winners.len(),
        unwon = summary.unwon().count(),
        output = %config.files.output.display(),
        "Raffle finished"
    );

    Ok(summary)
}

/// Load the configured input, draw it and write the results file.
pub fn run_with_hooks<H: DrawHooks>(config: &Config, hooks: &mut H) -> Result<DrawSummary> {
    let loaded = load_input(&config.files.input)?;
    draw_items(config, loaded.items, hooks)
}

/// Run the draw command
pub fn run(config: &Config) -> Result<()> {
    let loaded = load_input(&config.files.input)?;
    let mut hooks = ConsoleHooks::stdio(config.draw.interactive);

    print_participants(&Roster::build(&loaded.items).participants);
    println!();
    hooks.wait_for_enter("Press Enter to start the raffle:");

    let summary = draw_items(config, loaded.items, &mut hooks)?;

    println!();
    println!("Results:");
    for item in &summary.order {
        println!(
            "  {:<24} {}",
            item.name,
            summary.winners.winner_or(&item.name, NO_WINNER)
        );
    }
    println!();
    print_success(&format!(
        "Results written to {}",
        config.files.output.display()
    ));

    Ok(())
}
