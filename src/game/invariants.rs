//! Record invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger in a correctly implemented game: the engine
//! clamps money at zero, the board wraps positions, and the insurance set
//! rejects duplicates. If one fires, a store write went wrong.

use std::collections::HashSet;

use crate::game::{InsuranceKind, Player, BOARD_SIZE};

/// Sanity bound: no economy path mints anywhere near this much money.
///
/// The largest per-turn credit is one salary; a default game moves a few
/// hundred units per lap, so this is very generous.
pub const SANITY_MAX_MONEY: u64 = 1_000_000_000;

/// Invariant violation found in a store snapshot.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all record invariants over a store snapshot.
///
/// Returns the violations found, empty if all invariants hold.
#[must_use]
pub fn check_invariants(players: &[Player]) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut seen_ids = HashSet::new();

    for player in players {
        if !seen_ids.insert(player.id) {
            violations.push(InvariantViolation {
                message: format!("duplicate player id {}", player.id),
            });
        }

        if player.position >= BOARD_SIZE {
            violations.push(InvariantViolation {
                message: format!(
                    "player {} is at position {} on a {BOARD_SIZE}-tile board",
                    player.id, player.position
                ),
            });
        }

        if player.insurances.len() > InsuranceKind::ALL.len() {
            violations.push(InvariantViolation {
                message: format!(
                    "player {} holds {} insurance lines, catalog has {}",
                    player.id,
                    player.insurances.len(),
                    InsuranceKind::ALL.len()
                ),
            });
        }

        if player.money > SANITY_MAX_MONEY {
            violations.push(InvariantViolation {
                message: format!(
                    "player {} has money {} > sanity max {SANITY_MAX_MONEY}",
                    player.id, player.money
                ),
            });
        }
    }

    violations
}

/// Assert all record invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with a detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(players: &[Player]) {
    let violations = check_invariants(players);
    assert!(
        violations.is_empty(),
        "invariant violations: {:?}",
        violations
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
    );
}

/// Assert all record invariants hold (no-op in release builds).
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_players: &[Player]) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_snapshot_passes() {
        let players = vec![Player::new(1, "Ada"), Player::new(2, "Grace")];
        assert!(check_invariants(&players).is_empty());
    }

    #[test]
    fn test_out_of_range_position_flagged() {
        let players = vec![Player {
            position: BOARD_SIZE,
            ..Player::new(1, "Ada")
        }];
        let violations = check_invariants(&players);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("position"));
    }

    #[test]
    fn test_duplicate_ids_flagged() {
        let players = vec![Player::new(1, "Ada"), Player::new(1, "Grace")];
        let violations = check_invariants(&players);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("duplicate"));
    }
}
