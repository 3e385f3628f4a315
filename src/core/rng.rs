//! Deterministic random number generation for dice rolls.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical dice sequence
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Usage
//!
//! ```
//! use yamb_env::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let dice = rng.roll_dice(5);
//! assert_eq!(dice.total(), 5);
//!
//! // Same seed, same roll
//! let mut again = GameRng::new(42);
//! assert_eq!(again.roll_dice(5), dice);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::dice::{DiceCounts, FACE_COUNT};

/// Deterministic RNG for dice and policy sampling.
///
/// Uses ChaCha8 for speed while maintaining high quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll `n` fair dice and tally them into face counts.
    pub fn roll_dice(&mut self, n: u8) -> DiceCounts {
        let mut counts = [0u8; FACE_COUNT];
        for _ in 0..n {
            counts[self.inner.gen_range(0..FACE_COUNT)] += 1;
        }
        DiceCounts::new(counts)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many dice have been rolled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
