//! Game progression engine.
//!
//! Implements the board game rules:
//! - Board topology (22-tile loop, lap tiles, corners)
//! - Event catalog (insurance offers, external events)
//! - Movement resolution (wrap-around paths)
//! - Effect resolution (economy, purchases, win detection)
//! - Turn control (skip checks, phase machine, notifications)

mod board;
mod catalog;
mod dice;
mod effects;
mod invariants;
mod movement;
mod player;
mod turn;

pub use board::{Board, TileKind, BOARD_SIZE, CORNER_TILES, RENT_TILE, SALARY_TILE};
pub use catalog::{effect_for_tile, EventEffect, EventVariable, InsuranceKind, RandomEvent};
pub use dice::{Dice, FAIR_DIE_MAX};
pub use effects::{EffectEngine, Resolution};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation, SANITY_MAX_MONEY};
pub use movement::{resolve_move, Movement};
pub use player::{
    Player, PlayerId, PlayerPatch, DEFAULT_MONEY, DEFAULT_RENT, DEFAULT_SALARY,
};
pub use turn::{TurnAdvance, TurnController, TurnPhase, TurnState};
