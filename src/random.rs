use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const DEFAULT_SEED: u64 = 3819201;

/// The random source used by Monte Carlo rollouts.
///
/// Searches take it by `&mut` from the caller, so a seeded generator makes a search fully
/// reproducible.
pub trait RandomGenerator {
    /// Returns a number in `from..to`. `to` must be greater than `from`.
    fn next_range(&mut self, from: usize, to: usize) -> usize;

    /// Picks a uniformly random element, `None` for an empty slice.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(0, items.len()))
    }
}

/// Draws from the thread-local generator. Not reproducible.
#[derive(Default)]
pub struct StandardRandomGenerator {
    rng: ThreadRng,
}

impl RandomGenerator for StandardRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        self.rng.random_range(from..to)
    }
}

/// A ChaCha20 stream from a fixed seed. Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: ChaCha20Rng,
}

impl Default for SeededRandomGenerator {
    fn default() -> Self {
        SeededRandomGenerator::new(DEFAULT_SEED)
    }
}

impl SeededRandomGenerator {
    /// Creates a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        self.rng.random_range(from..to)
    }
}
