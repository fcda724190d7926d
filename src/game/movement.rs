//! Movement resolution along the circular board.

use crate::error::{EngineError, EngineResult};

/// Result of resolving one dice roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    /// Tile the token ends on.
    pub new_position: usize,
    /// Every tile visited, in order: exclusive of the start, inclusive of
    /// the landing tile.
    pub path: Vec<usize>,
}

impl Movement {
    /// Tiles crossed without landing on them.
    #[must_use]
    pub fn crossed(&self) -> &[usize] {
        &self.path[..self.path.len().saturating_sub(1)]
    }
}

/// Resolve a roll from `old` on a board of `board_size` tiles.
///
/// The path is built by advancing one tile at a time around the loop, which
/// naturally yields the wrap-around sequence when `old + roll` passes the
/// end. Lap tiles in the crossed portion of the path trigger their effect
/// even without a landing, and the visualizer walks the same sequence.
///
/// # Errors
///
/// [`EngineError::InvalidRoll`] when `roll` is zero or exceeds the board
/// size (a fair die rolls 1-6; debug tooling may inject up to the full
/// loop). Nothing is mutated, so retrying with a corrected roll is safe.
pub fn resolve_move(old: usize, roll: u32, board_size: usize) -> EngineResult<Movement> {
    let steps = usize::try_from(roll).map_err(|_| EngineError::InvalidRoll(roll))?;
    if steps == 0 || steps > board_size {
        return Err(EngineError::InvalidRoll(roll));
    }

    let mut path = Vec::with_capacity(steps);
    let mut pos = old % board_size;
    for _ in 0..steps {
        pos = (pos + 1) % board_size;
        path.push(pos);
    }

    Ok(Movement {
        new_position: pos,
        path,
    })
}
