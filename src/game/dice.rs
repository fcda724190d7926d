//! Dice rolling with seed-reproducible randomness.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Highest face of the fair die.
pub const FAIR_DIE_MAX: u32 = 6;

/// A fair six-sided die.
///
/// Seeded construction makes whole games replayable; debug tooling bypasses
/// the die entirely and feeds a forced roll straight to the turn controller,
/// which validates it against the board size.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    /// Die with a reproducible seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Die seeded from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Roll once: uniform in 1..=6.
    pub fn roll(&mut self) -> u32 {
        self.rng.gen_range(1..=FAIR_DIE_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolls_stay_in_range() {
        let mut dice = Dice::from_seed(7);
        for _ in 0..1000 {
            let roll = dice.roll();
            assert!((1..=FAIR_DIE_MAX).contains(&roll));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Dice::from_seed(42);
        let mut b = Dice::from_seed(42);
        let rolls_a: Vec<u32> = (0..32).map(|_| a.roll()).collect();
        let rolls_b: Vec<u32> = (0..32).map(|_| b.roll()).collect();
        assert_eq!(rolls_a, rolls_b);
    }
}
