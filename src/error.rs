//! Error types for the game progression engine.

use std::fmt;

use crate::game::{InsuranceKind, PlayerId};

/// Errors produced while resolving a turn.
///
/// `InvalidRoll` and `PlayerNotFound` are fatal to the current turn: the
/// engine aborts without mutating anything, so a retry is safe. The two
/// `*Unavailable` variants are absorbed by the degraded policy inside the
/// engine (logged, step treated as a no-op) and only surface from the
/// collaborator implementations themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The player store could not be reached.
    StoreUnavailable {
        /// Description of the failed round trip.
        reason: String,
    },
    /// The external event supplier could not be reached.
    EventSupplierUnavailable {
        /// Description of the failed round trip.
        reason: String,
    },
    /// A roll of zero, or one larger than the board.
    InvalidRoll(u32),
    /// The requested player is missing from the store.
    PlayerNotFound(PlayerId),
    /// A purchase was applied for an insurance line the player already holds.
    ///
    /// Offer resolution pre-filters held lines, so this only fires when the
    /// store record drifted underneath a resolution step.
    DuplicateInsurance(InsuranceKind),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::StoreUnavailable { reason } => {
                write!(f, "player store unavailable: {reason}")
            }
            EngineError::EventSupplierUnavailable { reason } => {
                write!(f, "event supplier unavailable: {reason}")
            }
            EngineError::InvalidRoll(roll) => write!(f, "invalid roll: {roll}"),
            EngineError::PlayerNotFound(id) => write!(f, "player not found: {id}"),
            EngineError::DuplicateInsurance(kind) => {
                write!(f, "insurance line already held: {kind}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
