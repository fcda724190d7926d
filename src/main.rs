//! Premia CLI - play, simulate, and validate insurance board games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Premia - a turn-based insurance board game engine
#[derive(Parser, Debug)]
#[command(name = "premia")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play an interactive game in the terminal
    Play {
        /// Player roster JSON file (default: a generated roster)
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Number of generated players when no roster file is given
        #[arg(short, long, default_value = "2")]
        players: u32,

        /// Event deck JSON file (default: the built-in deck)
        #[arg(long)]
        deck: Option<PathBuf>,

        /// Random seed (default: entropy)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Type roll values (1-22) instead of rolling the die
        #[arg(long)]
        manual_rolls: bool,
    },

    /// Run headless games in parallel and aggregate statistics
    Simulate {
        /// Number of games to run
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Players per game
        #[arg(short, long, default_value = "4")]
        players: u32,

        /// Purchase policy for offered insurance
        #[arg(long, default_value = "always")]
        policy: cli::BuyPolicy,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum rolls per game before declaring a draw
        #[arg(short = 't', long, default_value = "500")]
        max_rolls: u32,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Validate a roster or event deck JSON file
    Validate {
        /// Player roster JSON file
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Event deck JSON file
        #[arg(long)]
        deck: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            roster,
            players,
            deck,
            seed,
            manual_rolls,
        } => cli::play::execute(roster, players, deck, seed, manual_rolls),

        Commands::Simulate {
            games,
            players,
            policy,
            seed,
            max_rolls,
            threads,
            format,
            progress,
        } => cli::simulate::execute(games, players, policy, seed, max_rolls, threads, format, progress),

        Commands::Validate { roster, deck } => cli::validate::execute(roster, deck),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
