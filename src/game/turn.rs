//! Turn orchestration: skip checks, movement, effects, advancement.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::game::{resolve_move, Board, EffectEngine, Player, PlayerId, PlayerPatch};
use crate::ports::{DecisionPrompt, EventSupplier, MovementVisualizer, Notice, PlayerStore,
    TurnObserver};

/// Whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    /// Index of the active player in seating order.
    pub current_player_index: usize,
    /// Number of seated players.
    pub total_players: usize,
}

impl TurnState {
    /// State starting at the first seat.
    #[must_use]
    pub const fn new(total_players: usize) -> Self {
        Self {
            current_player_index: 0,
            total_players,
        }
    }

    fn advance(&mut self) {
        self.current_player_index = (self.current_player_index + 1) % self.total_players;
    }
}

/// Phase of the turn state machine.
///
/// One call to [`TurnController::play_turn`] walks the whole cycle; the
/// phase is observable for display and assertions. `GameOver` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Between turns; the next call starts with the skip check.
    Idle,
    /// Roll validation in progress.
    AwaitingRoll,
    /// Token movement being visualized.
    Moving,
    /// Tile effects being applied and persisted.
    ResolvingEffects,
    /// All mutations persisted; the turn is about to pass on.
    TurnComplete,
    /// A player holds the full catalog; no further transitions.
    GameOver,
}

/// How a call to [`TurnController::play_turn`] advanced the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnAdvance {
    /// The roll was applied and all effects resolved.
    Played {
        /// Player who moved.
        player: PlayerId,
        /// Roll consumed.
        roll: u32,
        /// Tile landed on.
        new_position: usize,
    },
    /// The player's skip flag was consumed; no roll took place.
    Skipped {
        /// Player whose turn was forfeited.
        player: PlayerId,
    },
    /// The store was unreachable; nothing was mutated but the turn passed on.
    Degraded,
    /// The game is over, won on this turn or an earlier one.
    GameOver {
        /// Winner's display name.
        winner: String,
    },
}

/// Owns the turn state machine and the collaborator handles.
///
/// All collaborators are injected at construction; the controller holds no
/// global state and exactly one controller drives a game. Turns are strictly
/// sequential: a `play_turn` call runs to completion before the next starts.
pub struct TurnController {
    board: Board,
    state: TurnState,
    phase: TurnPhase,
    seats: Vec<PlayerId>,
    winner: Option<String>,
    store: Arc<dyn PlayerStore>,
    events: Arc<dyn EventSupplier>,
    prompt: Arc<dyn DecisionPrompt>,
    visualizer: Arc<dyn MovementVisualizer>,
    observer: Arc<dyn TurnObserver>,
}

impl fmt::Debug for TurnController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnController")
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("seats", &self.seats)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}

impl TurnController {
    /// Controller over the given board and collaborators.
    ///
    /// Reads the store once to fix the seating order; seat indices reported
    /// through [`TurnObserver::on_turn_changed`] refer to this order.
    ///
    /// # Errors
    ///
    /// [`EngineError::StoreUnavailable`] if the roster cannot be read, or
    /// [`EngineError::PlayerNotFound`] if the store holds no players.
    pub fn new(
        board: Board,
        store: Arc<dyn PlayerStore>,
        events: Arc<dyn EventSupplier>,
        prompt: Arc<dyn DecisionPrompt>,
        visualizer: Arc<dyn MovementVisualizer>,
        observer: Arc<dyn TurnObserver>,
    ) -> EngineResult<Self> {
        let seats: Vec<PlayerId> = store.list_players()?.iter().map(|p| p.id).collect();
        if seats.is_empty() {
            return Err(EngineError::PlayerNotFound(0));
        }
        Ok(Self {
            board,
            state: TurnState::new(seats.len()),
            phase: TurnPhase::Idle,
            seats,
            winner: None,
            store,
            events,
            prompt,
            visualizer,
            observer,
        })
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Current turn state.
    #[must_use]
    pub const fn turn_state(&self) -> TurnState {
        self.state
    }

    /// Board in play.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Winner's display name once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Whether the absorbing game-over state has been reached.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self.phase, TurnPhase::GameOver)
    }

    /// Run one full turn for the active player with the given roll.
    ///
    /// The sequence is: skip check, roll validation, movement, movement
    /// visualization, effect resolution, position persistence, turn
    /// advancement. A player entering their turn with the skip flag set
    /// forfeits it: the flag is cleared and the turn passes without a roll,
    /// ignoring `roll`. After a win this returns
    /// [`TurnAdvance::GameOver`] without touching any state.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidRoll`] and [`EngineError::PlayerNotFound`] abort
    /// the turn with the turn state unchanged, so retrying is safe. Store
    /// and supplier outages do not error; they degrade per the engine's
    /// no-op policy and the turn still advances.
    pub fn play_turn(&mut self, roll: u32) -> EngineResult<TurnAdvance> {
        if let Some(winner) = &self.winner {
            return Ok(TurnAdvance::GameOver {
                winner: winner.clone(),
            });
        }
        match self.run_turn(roll) {
            Ok(advance) => Ok(advance),
            Err(e) => {
                // Fatal turn errors leave the machine ready for a retry.
                self.phase = TurnPhase::Idle;
                Err(e)
            }
        }
    }

    fn run_turn(&mut self, roll: u32) -> EngineResult<TurnAdvance> {
        let player = match self.current_player()? {
            Some(player) => player,
            None => {
                // Store down at turn entry: nothing can be read or written,
                // but the game must stay live.
                self.complete_turn();
                return Ok(TurnAdvance::Degraded);
            }
        };

        if player.skip {
            let patch = PlayerPatch {
                skip: Some(false),
                ..PlayerPatch::default()
            };
            if let Err(e) = self.store.update_player(player.id, &patch) {
                warn!("could not clear skip flag for player {}: {e}", player.id);
            }
            self.notify_best_effort(&Notice::plain(format!(
                "{} sits this turn out after running short of funds.",
                player.name
            )));
            self.complete_turn();
            return Ok(TurnAdvance::Skipped { player: player.id });
        }

        self.phase = TurnPhase::AwaitingRoll;
        let movement = resolve_move(player.position, roll, self.board.size())?;

        self.phase = TurnPhase::Moving;
        if let Err(e) = self.visualizer.animate_token(player.id, &movement) {
            warn!("movement visualization failed, continuing: {e}");
        }

        self.phase = TurnPhase::ResolvingEffects;
        let resolution = EffectEngine::new(
            &self.board,
            self.store.as_ref(),
            self.events.as_ref(),
            self.prompt.as_ref(),
        )
        .resolve(player.id, &movement)?;

        if let Some(winner) = resolution.winner {
            self.phase = TurnPhase::GameOver;
            self.winner = Some(winner.clone());
            self.observer.on_game_over(&winner);
            debug!("game over, won by {winner}");
            return Ok(TurnAdvance::GameOver { winner });
        }

        let patch = PlayerPatch {
            position: Some(movement.new_position),
            ..PlayerPatch::default()
        };
        if let Err(e) = self.store.update_player(player.id, &patch) {
            warn!("could not persist position for player {}: {e}", player.id);
        }

        self.phase = TurnPhase::TurnComplete;
        self.complete_turn();
        Ok(TurnAdvance::Played {
            player: player.id,
            roll,
            new_position: movement.new_position,
        })
    }

    /// Pass the turn to the next seat and notify.
    fn complete_turn(&mut self) {
        self.state.advance();
        self.observer.on_turn_changed(self.state.current_player_index);
        self.phase = TurnPhase::Idle;
        debug!("turn passed to seat {}", self.state.current_player_index);
    }

    /// Record of the seat's player, or `None` when the store is down.
    fn current_player(&self) -> EngineResult<Option<Player>> {
        let id = self.seats[self.state.current_player_index];
        let players = match self.store.list_players() {
            Ok(players) => players,
            Err(e) => {
                warn!("player store unreachable at turn entry: {e}");
                return Ok(None);
            }
        };
        match players.into_iter().find(|p| p.id == id) {
            Some(player) => Ok(Some(player)),
            None => Err(EngineError::PlayerNotFound(id)),
        }
    }

    fn notify_best_effort(&self, notice: &Notice) {
        if let Err(e) = self.prompt.notify(notice) {
            warn!("notification dropped: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::EngineResult;
    use crate::game::{InsuranceKind, Movement, RandomEvent};
    use crate::ports::{InsuranceDecision, InsuranceOffer};
    use crate::store::MemoryStore;

    struct DownSupplier;

    impl EventSupplier for DownSupplier {
        fn fetch_random_event(&self) -> EngineResult<RandomEvent> {
            Err(EngineError::EventSupplierUnavailable {
                reason: "offline".to_string(),
            })
        }
    }

    struct AcceptAll;

    impl DecisionPrompt for AcceptAll {
        fn request_insurance_decision(
            &self,
            _offer: &InsuranceOffer,
        ) -> EngineResult<InsuranceDecision> {
            Ok(InsuranceDecision { accepted: true })
        }

        fn notify(&self, _notice: &Notice) -> EngineResult<()> {
            Ok(())
        }
    }

    struct NullVisualizer;

    impl MovementVisualizer for NullVisualizer {
        fn animate_token(&self, _player: PlayerId, _movement: &Movement) -> EngineResult<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        turn_changes: Mutex<Vec<usize>>,
        game_overs: Mutex<Vec<String>>,
    }

    impl TurnObserver for RecordingObserver {
        fn on_turn_changed(&self, current_player_index: usize) {
            self.turn_changes.lock().unwrap().push(current_player_index);
        }

        fn on_game_over(&self, winner: &str) {
            self.game_overs.lock().unwrap().push(winner.to_string());
        }
    }

    fn controller(
        players: Vec<Player>,
    ) -> (Arc<MemoryStore>, Arc<RecordingObserver>, TurnController) {
        let store = Arc::new(MemoryStore::new(players));
        let observer = Arc::new(RecordingObserver::default());
        let controller = TurnController::new(
            Board::standard(),
            store.clone(),
            Arc::new(DownSupplier),
            Arc::new(AcceptAll),
            Arc::new(NullVisualizer),
            observer.clone(),
        )
        .expect("roster is non-empty");
        (store, observer, controller)
    }

    #[test]
    fn test_turn_rotates_through_seats() {
        let (_, observer, mut controller) =
            controller(vec![Player::new(1, "Ada"), Player::new(2, "Grace")]);
        // Land on neutral-ish offer tiles is fine; rotation is what matters.
        controller.play_turn(3).unwrap();
        controller.play_turn(3).unwrap();
        controller.play_turn(3).unwrap();
        assert_eq!(*observer.turn_changes.lock().unwrap(), vec![1, 0, 1]);
        assert_eq!(controller.turn_state().current_player_index, 1);
    }

    #[test]
    fn test_position_persisted_after_turn() {
        let (store, _, mut controller) = controller(vec![Player::new(1, "Ada")]);
        let advance = controller.play_turn(5).unwrap();
        assert_eq!(
            advance,
            TurnAdvance::Played {
                player: 1,
                roll: 5,
                new_position: 5
            }
        );
        assert_eq!(store.snapshot()[0].position, 5);
    }

    #[test]
    fn test_skip_flag_forfeits_turn() {
        let (store, observer, mut controller) = controller(vec![
            Player {
                skip: true,
                position: 3,
                ..Player::new(1, "Ada")
            },
            Player::new(2, "Grace"),
        ]);
        let advance = controller.play_turn(6).unwrap();
        assert_eq!(advance, TurnAdvance::Skipped { player: 1 });
        let player = &store.snapshot()[0];
        assert!(!player.skip);
        assert_eq!(player.position, 3);
        assert_eq!(*observer.turn_changes.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_invalid_roll_leaves_state_unchanged() {
        let (store, observer, mut controller) = controller(vec![Player::new(1, "Ada")]);
        assert_eq!(controller.play_turn(0), Err(EngineError::InvalidRoll(0)));
        assert_eq!(controller.play_turn(23), Err(EngineError::InvalidRoll(23)));
        assert_eq!(controller.turn_state().current_player_index, 0);
        assert_eq!(controller.phase(), TurnPhase::Idle);
        assert!(observer.turn_changes.lock().unwrap().is_empty());
        assert_eq!(store.snapshot()[0].position, 0);
        // A corrected retry goes through.
        controller.play_turn(2).unwrap();
        assert_eq!(store.snapshot()[0].position, 2);
    }

    #[test]
    fn test_degraded_store_still_advances() {
        let (store, observer, mut controller) =
            controller(vec![Player::new(1, "Ada"), Player::new(2, "Grace")]);
        store.set_unavailable(true);
        let advance = controller.play_turn(4).unwrap();
        assert_eq!(advance, TurnAdvance::Degraded);
        assert_eq!(*observer.turn_changes.lock().unwrap(), vec![1]);
        store.set_unavailable(false);
        assert_eq!(store.snapshot()[0].position, 0);
    }

    #[test]
    fn test_game_over_is_absorbing() {
        let mut player = Player::new(1, "Ada");
        for kind in InsuranceKind::ALL {
            if kind != InsuranceKind::Savings {
                player.add_insurance(kind).unwrap();
            }
        }
        player.position = 9;
        let (_, observer, mut controller) = controller(vec![player, Player::new(2, "Grace")]);
        // Lands on tile 10, the Savings offer, and accepts the 7th line.
        let advance = controller.play_turn(1).unwrap();
        assert_eq!(
            advance,
            TurnAdvance::GameOver {
                winner: "Ada".to_string()
            }
        );
        assert!(controller.is_game_over());
        assert_eq!(controller.winner(), Some("Ada"));
        assert_eq!(*observer.game_overs.lock().unwrap(), vec!["Ada".to_string()]);
        assert!(observer.turn_changes.lock().unwrap().is_empty());

        // No further turn processing for anyone.
        let advance = controller.play_turn(4).unwrap();
        assert_eq!(
            advance,
            TurnAdvance::GameOver {
                winner: "Ada".to_string()
            }
        );
        assert!(observer.turn_changes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_roster_rejected() {
        let store = Arc::new(MemoryStore::new(Vec::new()));
        let result = TurnController::new(
            Board::standard(),
            store,
            Arc::new(DownSupplier),
            Arc::new(AcceptAll),
            Arc::new(NullVisualizer),
            Arc::new(RecordingObserver::default()),
        );
        assert!(matches!(result, Err(EngineError::PlayerNotFound(0))));
    }
}
