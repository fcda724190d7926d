//! Terminal implementations of the engine's collaborator traits.

use std::io::{self, Write};

use premia::ports::{DecisionPrompt, InsuranceDecision, InsuranceOffer, MovementVisualizer,
    Notice, TurnObserver};
use premia::{Board, EngineResult, Movement, PlayerId};

/// Read one trimmed line from stdin; IO failures read as an empty answer.
pub(crate) fn read_line() -> String {
    let mut line = String::new();
    let _ = io::stdout().flush();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

/// Decision prompt over stdin/stdout.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConsolePrompt;

impl DecisionPrompt for ConsolePrompt {
    fn request_insurance_decision(
        &self,
        offer: &InsuranceOffer,
    ) -> EngineResult<InsuranceDecision> {
        println!();
        print!(
            "  Buy {} insurance for {}? [y/N] ",
            offer.kind, offer.cost
        );
        let answer = read_line();
        Ok(InsuranceDecision {
            accepted: matches!(answer.as_str(), "y" | "Y" | "yes"),
        })
    }

    fn notify(&self, notice: &Notice) -> EngineResult<()> {
        println!();
        match notice.icon {
            Some(kind) => println!("  [{kind}] {}", notice.message),
            None => println!("  {}", notice.message),
        }
        Ok(())
    }
}

/// Prints the token's hop sequence, marking corners.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConsoleVisualizer;

impl MovementVisualizer for ConsoleVisualizer {
    fn animate_token(&self, _player: PlayerId, movement: &Movement) -> EngineResult<()> {
        let hops: Vec<String> = movement
            .path
            .iter()
            .map(|&tile| {
                if Board::is_corner(tile) {
                    format!("[{tile}]")
                } else {
                    tile.to_string()
                }
            })
            .collect();
        println!("  Token hops: {}", hops.join(" > "));
        Ok(())
    }
}

/// Prints turn changes and the win banner.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConsoleObserver;

impl TurnObserver for ConsoleObserver {
    fn on_turn_changed(&self, current_player_index: usize) {
        println!("  -- turn passes to seat {current_player_index}");
    }

    fn on_game_over(&self, winner: &str) {
        println!();
        println!("*** {winner} holds the full insurance catalog and wins! ***");
    }
}
