//! Interactive play command.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use premia::game::FAIR_DIE_MAX;
use premia::{
    Board, Dice, EventDeck, MemoryStore, Player, TurnAdvance, TurnController, BOARD_SIZE,
};

use super::console::{read_line, ConsoleObserver, ConsolePrompt, ConsoleVisualizer};
use super::{seed_or_entropy, CliError};

/// Execute the play command.
///
/// # Errors
///
/// Returns an error when a roster or deck file cannot be loaded, or when
/// the game cannot be set up.
pub(crate) fn execute(
    roster: Option<PathBuf>,
    players: u32,
    deck: Option<PathBuf>,
    seed: Option<u64>,
    manual_rolls: bool,
) -> Result<(), CliError> {
    let store = Arc::new(load_store(roster, players)?);
    let seed = seed_or_entropy(seed);
    let events = Arc::new(load_deck(deck, seed)?);
    let mut dice = Dice::from_seed(seed);

    let mut controller = TurnController::new(
        Board::standard(),
        store.clone(),
        events,
        Arc::new(ConsolePrompt),
        Arc::new(ConsoleVisualizer),
        Arc::new(ConsoleObserver),
    )?;

    println!("Premia - first to hold all 7 insurance lines wins (seed {seed})");
    print_standings(&store.snapshot());

    loop {
        let roster = store.snapshot();
        let seat = controller.turn_state().current_player_index;
        let Some(player) = roster.get(seat) else {
            return Err(CliError::new("seat out of range"));
        };

        println!();
        println!(
            "=== {}'s turn (money {}, tile {}, {} lines held) ===",
            player.name,
            player.money,
            player.position,
            player.insurances.len()
        );
        if manual_rolls {
            print!("Roll 1-{BOARD_SIZE}, Enter for the die, or q to quit: ");
        } else {
            print!("Press Enter to roll the d{FAIR_DIE_MAX} (q to quit): ");
        }
        let input = read_line();
        if input == "q" {
            println!("Game abandoned.");
            break;
        }

        let roll = match (manual_rolls, input.parse::<u32>()) {
            (true, Ok(forced)) => forced,
            _ => dice.roll(),
        };
        println!("Rolled {roll}.");

        match controller.play_turn(roll) {
            Ok(TurnAdvance::GameOver { .. }) => {
                print_standings(&store.snapshot());
                break;
            }
            Ok(TurnAdvance::Played { .. } | TurnAdvance::Skipped { .. }) => {}
            Ok(TurnAdvance::Degraded) => {
                println!("  (store unreachable, turn passed without effect)");
            }
            Err(e) => println!("  Turn aborted, try again: {e}"),
        }
    }

    Ok(())
}

fn load_store(roster: Option<PathBuf>, players: u32) -> Result<MemoryStore, CliError> {
    match roster {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
            Ok(MemoryStore::from_json(&json)?)
        }
        None => {
            if players < 2 {
                return Err(CliError::new("a game needs at least 2 players"));
            }
            Ok(MemoryStore::with_default_roster(players))
        }
    }
}

fn load_deck(deck: Option<PathBuf>, seed: u64) -> Result<EventDeck, CliError> {
    match deck {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
            Ok(EventDeck::from_json(&json, seed)?)
        }
        None => Ok(EventDeck::standard(seed)),
    }
}

fn print_standings(roster: &[Player]) {
    println!();
    println!("Standings:");
    for player in roster {
        let lines: Vec<String> = player.insurances.iter().map(ToString::to_string).collect();
        println!(
            "  {:<12} money {:>6}  salary {:>5}  rent {:>5}  tile {:>2}  [{}]",
            player.name,
            player.money,
            player.salary,
            player.rent,
            player.position,
            lines.join(", ")
        );
    }
}
