//! Seeded shuffle source.
//!
//! Each environment owns one `GameRng`. Two environments built with the same
//! seed deal the same sequence of decks, and a snapshot of the stream
//! position resumes it exactly:
//!
//! ```
//! use okey_rl::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let saved = rng.state();
//! let first = rng.below(1000);
//!
//! let mut resumed = GameRng::from_state(&saved);
//! assert_eq!(resumed.below(1000), first);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream tagged with the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `0..n`. `n` must be non-zero.
    pub fn below(&mut self, n: usize) -> usize {
        self.stream.gen_range(0..n)
    }

    /// Uniform permutation in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.stream);
    }

    /// Uniform pick, `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.stream)
    }

    /// Capture the stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    /// Resume a stream captured by [`GameRng::state`].
    #[must_use]
    pub fn from_state(saved: &GameRngState) -> Self {
        let mut rng = Self::new(saved.seed);
        rng.stream.set_word_pos(saved.word_pos);
        rng
    }
}

/// Seed plus ChaCha8 word position. Constant size no matter how far the
/// stream has advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}
