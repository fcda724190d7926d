//! Collaborator interfaces consumed by the engine.
//!
//! The engine owns no persistence, rendering, or UI; it reaches those
//! through the traits here, injected into the turn controller at
//! construction. Every call blocks until the collaborator has finished its
//! round trip, so the engine has at most one outstanding request at a time
//! and no step begins before the previous one resolved. The decision prompt
//! deliberately has no timeout: an unanswered offer is a game pause.

use crate::error::EngineResult;
use crate::game::{InsuranceKind, Movement, Player, PlayerId, PlayerPatch, RandomEvent};

/// An insurance purchase offer surfaced to the decision prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsuranceOffer {
    /// Tile the offer was landed on.
    pub tile: usize,
    /// Insurance line offered.
    pub kind: InsuranceKind,
    /// Purchase cost in currency units.
    pub cost: u64,
}

/// The player's answer to an insurance offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsuranceDecision {
    /// Whether the purchase was accepted.
    pub accepted: bool,
}

/// A read-only notification shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Message text.
    pub message: String,
    /// Insurance line to illustrate the notice with, when one applies.
    pub icon: Option<InsuranceKind>,
}

impl Notice {
    /// Notice with no icon hint.
    #[must_use]
    pub fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            icon: None,
        }
    }

    /// Notice illustrated with an insurance line.
    #[must_use]
    pub fn with_icon(message: impl Into<String>, icon: InsuranceKind) -> Self {
        Self {
            message: message.into(),
            icon: Some(icon),
        }
    }
}

/// Authoritative owner of player records.
///
/// The engine treats every read as possibly stale and every write as
/// authoritative on success.
pub trait PlayerStore {
    /// All player records, in seating order.
    ///
    /// # Errors
    ///
    /// [`crate::EngineError::StoreUnavailable`] when the store cannot be
    /// reached.
    fn list_players(&self) -> EngineResult<Vec<Player>>;

    /// Apply a partial update and return the updated record.
    ///
    /// # Errors
    ///
    /// [`crate::EngineError::StoreUnavailable`] when the store cannot be
    /// reached, [`crate::EngineError::PlayerNotFound`] when `id` is unknown.
    fn update_player(&self, id: PlayerId, patch: &PlayerPatch) -> EngineResult<Player>;
}

/// Source of externally drawn random events.
pub trait EventSupplier {
    /// Draw one random event.
    ///
    /// # Errors
    ///
    /// [`crate::EngineError::EventSupplierUnavailable`] when no event can be
    /// drawn.
    fn fetch_random_event(&self) -> EngineResult<RandomEvent>;
}

/// Decision and notification surface.
pub trait DecisionPrompt {
    /// Ask the player to accept or decline an offer; blocks until answered.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the engine treats a failed round trip as a
    /// declined purchase.
    fn request_insurance_decision(&self, offer: &InsuranceOffer)
    -> EngineResult<InsuranceDecision>;

    /// Show a message and block until acknowledged.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the engine logs the failure and continues.
    fn notify(&self, notice: &Notice) -> EngineResult<()>;
}

/// Token movement presentation.
pub trait MovementVisualizer {
    /// Walk the token through the movement's path; returns on completion.
    ///
    /// Effect resolution does not start until this call comes back.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the engine logs the failure and continues.
    fn animate_token(&self, player: PlayerId, movement: &Movement) -> EngineResult<()>;
}

/// Outbound fire-and-forget turn events.
pub trait TurnObserver {
    /// The active player changed.
    fn on_turn_changed(&self, current_player_index: usize);

    /// A player completed the insurance catalog.
    fn on_game_over(&self, winner: &str);
}
