//! In-memory player store.
//!
//! Stands in for the external persistence service behind
//! [`PlayerStore`]: the CLI and the test suites run against it. Records live
//! behind a mutex and partial patches are applied field by field. An
//! availability toggle simulates outages for exercising the engine's
//! degraded mode.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::error::{EngineError, EngineResult};
use crate::game::{Player, PlayerId, PlayerPatch};
use crate::ports::PlayerStore;

/// Player store backed by process memory.
#[derive(Debug)]
pub struct MemoryStore {
    players: Mutex<Vec<Player>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Store seeded with the given roster, in seating order.
    #[must_use]
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players: Mutex::new(players),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Roster parsed from a JSON array of player records.
    ///
    /// Missing economic fields take the standard starting values.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let players: Vec<Player> = serde_json::from_str(json)?;
        Ok(Self::new(players))
    }

    /// Default roster of `count` players named "Player 1" through
    /// "Player N", ids 1..=N.
    #[must_use]
    pub fn with_default_roster(count: u32) -> Self {
        let players = (1..=count)
            .map(|i| Player::new(i, format!("Player {i}")))
            .collect();
        Self::new(players)
    }

    /// Copy of every record, in seating order.
    ///
    /// Display and test helper; not part of the [`PlayerStore`] contract and
    /// unaffected by the availability toggle.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Player> {
        match self.players.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => Vec::new(),
        }
    }

    /// Toggle a simulated outage: while set, every store call fails.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    fn guard(&self) -> EngineResult<MutexGuard<'_, Vec<Player>>> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(EngineError::StoreUnavailable {
                reason: "store offline".to_string(),
            });
        }
        self.players.lock().map_err(|_| EngineError::StoreUnavailable {
            reason: "store lock poisoned".to_string(),
        })
    }
}

impl PlayerStore for MemoryStore {
    fn list_players(&self) -> EngineResult<Vec<Player>> {
        Ok(self.guard()?.clone())
    }

    fn update_player(&self, id: PlayerId, patch: &PlayerPatch) -> EngineResult<Player> {
        let mut players = self.guard()?;
        let player = players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(EngineError::PlayerNotFound(id))?;
        patch.apply_to(player);
        Ok(player.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update() {
        let store = MemoryStore::new(vec![Player::new(1, "Ada")]);
        let patch = PlayerPatch {
            money: Some(1234),
            ..PlayerPatch::default()
        };
        let updated = store.update_player(1, &patch).expect("player exists");
        assert_eq!(updated.money, 1234);
        assert_eq!(updated.salary, 500);
        assert_eq!(store.snapshot()[0].money, 1234);
    }

    #[test]
    fn test_unknown_player_rejected() {
        let store = MemoryStore::new(vec![Player::new(1, "Ada")]);
        assert_eq!(
            store.update_player(9, &PlayerPatch::default()),
            Err(EngineError::PlayerNotFound(9))
        );
    }

    #[test]
    fn test_outage_toggle() {
        let store = MemoryStore::with_default_roster(2);
        store.set_unavailable(true);
        assert!(matches!(
            store.list_players(),
            Err(EngineError::StoreUnavailable { .. })
        ));
        store.set_unavailable(false);
        assert_eq!(store.list_players().expect("store back up").len(), 2);
    }

    #[test]
    fn test_roster_from_json() {
        let json = r#"[
            {"id": 1, "name": "Ada"},
            {"id": 2, "name": "Grace", "money": 50, "skip": true}
        ]"#;
        let store = MemoryStore::from_json(json).expect("valid roster");
        let roster = store.snapshot();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].money, 1000);
        assert_eq!(roster[1].money, 50);
        assert!(roster[1].skip);
    }
}
