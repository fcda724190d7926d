//! Benchmarks for movement resolution and full headless games.

#![allow(missing_docs)]

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use premia::game::resolve_move;
use premia::ports::{DecisionPrompt, InsuranceDecision, InsuranceOffer, MovementVisualizer,
    Notice, TurnObserver};
use premia::{
    Board, Dice, EngineResult, EventDeck, MemoryStore, Movement, PlayerId, TurnAdvance,
    TurnController, BOARD_SIZE,
};

struct BuyEverything;

impl DecisionPrompt for BuyEverything {
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

struct NullObserver;

impl TurnObserver for NullObserver {
    fn on_turn_changed(&self, _current_player_index: usize) {}

    fn on_game_over(&self, _winner: &str) {}
}

/// Run one headless always-buy game to completion (or a roll cap).
fn run_game(seed: u64, players: u32) -> u64 {
    let store = Arc::new(MemoryStore::with_default_roster(players));
    let mut controller = TurnController::new(
        Board::standard(),
        store,
        Arc::new(EventDeck::standard(seed)),
        Arc::new(BuyEverything),
        Arc::new(NullVisualizer),
        Arc::new(NullObserver),
    )
    .expect("roster is non-empty");

    let mut dice = Dice::from_seed(seed);
    let mut rolls = 0u64;
    while rolls < 100_000 {
        match controller.play_turn(dice.roll()) {
            Ok(TurnAdvance::GameOver { .. }) | Err(_) => break,
            Ok(_) => rolls += 1,
        }
    }
    rolls
}

fn bench_movement(c: &mut Criterion) {
    c.bench_function("resolve_move_wraparound", |b| {
        b.iter(|| {
            let movement = resolve_move(black_box(17), black_box(6), black_box(BOARD_SIZE));
            black_box(movement)
        });
    });
}

fn bench_single_game(c: &mut Criterion) {
    c.bench_function("single_game_4p", |b| {
        b.iter(|| black_box(run_game(black_box(42), 4)));
    });
}

fn bench_game_batch(c: &mut Criterion) {
    // 10 games sequentially, without parallel overhead.
    c.bench_function("10_games_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                black_box(run_game(black_box(seed), 2));
            }
        });
    });
}

criterion_group!(benches, bench_movement, bench_single_game, bench_game_batch);
criterion_main!(benches);
