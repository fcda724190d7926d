//! Headless batch simulation command.
//!
//! Runs many independent games in parallel, one engine per game, and
//! aggregates win statistics. Useful for balancing the board layout and the
//! event deck.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use premia::ports::{DecisionPrompt, InsuranceDecision, InsuranceOffer, MovementVisualizer,
    Notice, TurnObserver};
use premia::{
    Board, Dice, EngineResult, EventDeck, MemoryStore, Movement, PlayerId, TurnAdvance,
    TurnController,
};

use super::{seed_or_entropy, BuyPolicy, CliError, OutputFormat};

/// Prompt that answers offers from a fixed policy.
#[derive(Debug)]
struct PolicyPrompt {
    policy: BuyPolicy,
    rng: Mutex<ChaCha8Rng>,
}

impl PolicyPrompt {
    fn new(policy: BuyPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl DecisionPrompt for PolicyPrompt {
    fn request_insurance_decision(
        &self,
        _offer: &InsuranceOffer,
    ) -> EngineResult<InsuranceDecision> {
        let accepted = match self.policy {
            BuyPolicy::Always => true,
            BuyPolicy::Never => false,
            BuyPolicy::Random => match self.rng.lock() {
                Ok(mut rng) => rng.gen_bool(0.5),
                Err(_) => false,
            },
        };
        Ok(InsuranceDecision { accepted })
    }

    fn notify(&self, _notice: &Notice) -> EngineResult<()> {
        Ok(())
    }
}

/// Visualizer that completes instantly.
#[derive(Debug, Clone, Copy)]
struct NullVisualizer;

impl MovementVisualizer for NullVisualizer {
    fn animate_token(&self, _player: PlayerId, _movement: &Movement) -> EngineResult<()> {
        Ok(())
    }
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy)]
struct NullObserver;

impl TurnObserver for NullObserver {
    fn on_turn_changed(&self, _current_player_index: usize) {}

    fn on_game_over(&self, _winner: &str) {}
}

/// Outcome of one headless game.
struct GameOutcome {
    winner_seat: Option<usize>,
    rolls: u64,
}

/// Aggregated statistics across all games.
#[derive(Debug, Clone, Serialize)]
struct SimulationStats {
    games: u64,
    draws: u64,
    wins_by_seat: Vec<u64>,
    total_rolls: u64,
}

impl SimulationStats {
    fn new(players: usize) -> Self {
        Self {
            games: 0,
            draws: 0,
            wins_by_seat: vec![0; players],
            total_rolls: 0,
        }
    }

    fn add(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        self.total_rolls += outcome.rolls;
        match outcome.winner_seat {
            Some(seat) if seat < self.wins_by_seat.len() => self.wins_by_seat[seat] += 1,
            _ => self.draws += 1,
        }
    }

    fn merge(&mut self, other: &SimulationStats) {
        self.games += other.games;
        self.draws += other.draws;
        self.total_rolls += other.total_rolls;
        for (mine, theirs) in self.wins_by_seat.iter_mut().zip(&other.wins_by_seat) {
            *mine += theirs;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn average_rolls(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_rolls as f64 / self.games as f64
        }
    }
}

/// Run one complete game and report who won.
fn run_game(seed: u64, players: u32, max_rolls: u32, policy: BuyPolicy) -> Option<GameOutcome> {
    let store = Arc::new(MemoryStore::with_default_roster(players));
    let deck = Arc::new(EventDeck::standard(seed.wrapping_add(1)));
    let prompt = Arc::new(PolicyPrompt::new(policy, seed.wrapping_add(2)));

    let mut controller = TurnController::new(
        Board::standard(),
        store.clone(),
        deck,
        prompt,
        Arc::new(NullVisualizer),
        Arc::new(NullObserver),
    )
    .ok()?;

    let mut dice = Dice::from_seed(seed);
    let mut rolls: u64 = 0;
    while rolls < u64::from(max_rolls) {
        match controller.play_turn(dice.roll()) {
            Ok(TurnAdvance::GameOver { winner }) => {
                let seat = store.snapshot().iter().position(|p| p.name == winner);
                return Some(GameOutcome {
                    winner_seat: seat,
                    rolls,
                });
            }
            Ok(_) => rolls += 1,
            Err(_) => return None,
        }
    }

    Some(GameOutcome {
        winner_seat: None,
        rolls,
    })
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error when the configuration is unusable or JSON output
/// fails to serialize.
#[allow(clippy::too_many_arguments, clippy::cast_possible_truncation)]
pub(crate) fn execute(
    games: u64,
    players: u32,
    policy: BuyPolicy,
    seed: Option<u64>,
    max_rolls: u32,
    threads: Option<usize>,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    if players < 2 {
        return Err(CliError::new("a game needs at least 2 players"));
    }

    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed_or_entropy(seed);

    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})",
                )
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let seats = players as usize;

    // Each thread accumulates into its own SimulationStats, merged at the end.
    let stats = (0..games)
        .into_par_iter()
        .fold(
            || SimulationStats::new(seats),
            |mut local, i| {
                let game_seed = base_seed.wrapping_add(i);
                if let Some(outcome) = run_game(game_seed, players, max_rolls, policy) {
                    local.add(&outcome);
                }
                if let Some(pb) = &pb {
                    pb.inc(1);
                }
                local
            },
        )
        .reduce(
            || SimulationStats::new(seats),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }
    let elapsed = start.elapsed();

    match format {
        OutputFormat::Text => {
            println!("Simulated {} games in {:.2?} (seed {base_seed})", stats.games, elapsed);
            println!("Average rolls per game: {:.1}", stats.average_rolls());
            println!("Draws (roll cap hit): {}", stats.draws);
            for (seat, wins) in stats.wins_by_seat.iter().enumerate() {
                #[allow(clippy::cast_precision_loss)]
                let share = if stats.games == 0 {
                    0.0
                } else {
                    *wins as f64 * 100.0 / stats.games as f64
                };
                println!("  Player {:<2} wins: {wins:>7} ({share:>5.1}%)", seat + 1);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
