//! Roster and event deck file validation command.

use std::fs;
use std::path::PathBuf;

use premia::game::check_invariants;
use premia::{EventDeck, MemoryStore};

use super::CliError;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error when a file cannot be read or parsed, or when any
/// record violates its constraints.
pub(crate) fn execute(roster: Option<PathBuf>, deck: Option<PathBuf>) -> Result<(), CliError> {
    if roster.is_none() && deck.is_none() {
        return Err(CliError::new(
            "nothing to validate: pass --roster and/or --deck",
        ));
    }

    let mut problems = 0usize;

    if let Some(path) = roster {
        let json = fs::read_to_string(&path)
            .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
        let store = MemoryStore::from_json(&json)?;
        let players = store.snapshot();
        let violations = check_invariants(&players);
        if violations.is_empty() {
            println!("Roster {}: {} players, OK", path.display(), players.len());
        } else {
            println!("Roster {}:", path.display());
            for violation in &violations {
                println!("  {violation}");
            }
            problems += violations.len();
        }
    }

    if let Some(path) = deck {
        let json = fs::read_to_string(&path)
            .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
        let deck = EventDeck::from_json(&json, 0)?;
        let issues = deck.validate();
        if issues.is_empty() {
            println!("Deck {}: {} events, OK", path.display(), deck.size());
        } else {
            println!("Deck {}:", path.display());
            for issue in &issues {
                println!("  {issue}");
            }
            problems += issues.len();
        }
    }

    if problems > 0 {
        return Err(CliError::new(format!("{problems} problem(s) found")));
    }
    Ok(())
}
