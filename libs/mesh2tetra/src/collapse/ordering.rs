//! # Retry Ordering
//!
//! Strategies that reorder collapse candidates after a failed pass.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Reorders candidate vertices before a retry pass.
pub trait RetryOrdering {
    /// Reorders `candidates` in place; `attempt` counts retries from 1.
    fn reorder(&mut self, candidates: &mut [usize], attempt: usize);
}

/// Shuffles candidates with a seeded `StdRng`.
///
/// The same seed always produces the same sequence of permutations.
#[derive(Debug, Clone)]
pub struct SeededShuffle {
    rng: StdRng,
}

impl SeededShuffle {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RetryOrdering for SeededShuffle {
    fn reorder(&mut self, candidates: &mut [usize], _attempt: usize) {
        candidates.shuffle(&mut self.rng);
    }
}

/// Rotates candidates left by the attempt number.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rotate;

impl RetryOrdering for Rotate {
    fn reorder(&mut self, candidates: &mut [usize], attempt: usize) {
        if !candidates.is_empty() {
            let shift = attempt % candidates.len();
            candidates.rotate_left(shift);
        }
    }
}
