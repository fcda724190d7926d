// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Premia: a turn-based insurance board game progression engine.
//!
//! Players circle a fixed 22-tile loop, collect salary, pay rent, and buy
//! insurance lines; the first to hold one of every line wins. This crate is
//! the progression engine: for every dice roll it decides which tiles were
//! crossed, which economic and insurance effects fire, how player decisions
//! are sequenced, and how turn order advances. Persistence, rendering, and
//! UI live outside, behind the traits in [`ports`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         Turn Controller             │
//! ├─────────────────────────────────────┤
//! │  Movement + Effect Resolution       │
//! ├─────────────────────────────────────┤
//! │  Board Topology + Event Catalog     │
//! └─────────────────────────────────────┘
//!         │ collaborator traits
//!         ▼
//!  Player Store · Event Supplier · Prompt · Visualizer · Observer
//! ```
//!
//! A turn runs strictly sequentially: skip check, roll, movement,
//! visualization, effect resolution, persistence, advancement. Store or
//! supplier outages degrade individual steps to logged no-ops so the game
//! never stalls on a dead collaborator.

pub mod deck;
pub mod error;
pub mod game;
pub mod ports;
pub mod store;

pub use error::{EngineError, EngineResult};

// Re-export key game types at crate root for convenience
pub use deck::EventDeck;
pub use game::{
    Board, Dice, EventEffect, InsuranceKind, Movement, Player, PlayerId, PlayerPatch,
    RandomEvent, TileKind, TurnAdvance, TurnController, TurnPhase, TurnState, BOARD_SIZE,
};
pub use store::MemoryStore;
