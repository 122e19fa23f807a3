//! Weighted Raffle CLI
//!
//! Draws one winner per item, favoring participants who have won less.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use raffle::{commands, Config};

#[derive(Parser)]
#[command(name = "raffle")]
#[command(about = "Weighted raffle - fewer wins, better odds")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (defaults to ./raffle.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the raffle and write the results
    Draw {
        /// Input CSV file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Do not ask winners whether they stay in
        #[arg(long)]
        no_opt_out: bool,

        /// Skip all prompts
        #[arg(long)]
        yes: bool,
    },

    /// Show items in draw order and the participant list
    Roster {
        /// Input CSV file
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Repeat the raffle many times and report win rates
    Simulate {
        /// Input CSV file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of simulated runs
        #[arg(short = 'n', long, default_value = "10000")]
        runs: usize,

        /// Seed for a reproducible simulation
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Draw {
            input,
            output,
            seed,
            no_opt_out,
            yes,
        } => {
            let mut config = config.with_overrides(input, output, seed);
            if no_opt_out {
                config.draw.opt_out = false;
            }
            if yes {
                config.draw.interactive = false;
            }
            commands::draw::run(&config)
        }
        Commands::Roster { input } => {
            let config = config.with_overrides(input, None, None);
            commands::roster::run(&config.files.input)
        }
        Commands::Simulate { input, runs, seed } => {
            let config = config.with_overrides(input, None, seed);
            commands::simulate::run(&config.files.input, runs, &config.draw)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(e) = run(cli) {
        commands::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
