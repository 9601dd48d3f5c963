//! Sources of random read offsets.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Picks read offsets for the pattern generators.
pub trait OffsetSource {
    /// Return an offset in `0..=max`.
    fn next_offset(&mut self, max: u64) -> u64;
}

/// Uniform random offsets from a seedable ChaCha8 generator.
#[derive(Debug, Clone)]
pub struct RandomOffsets {
    rng: ChaCha8Rng,
    seed: u64,
}

impl RandomOffsets {
    /// Create a generator with a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator with a freshly drawn seed.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// The seed this generator started from, for reproducing a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl OffsetSource for RandomOffsets {
    fn next_offset(&mut self, max: u64) -> u64 {
        self.rng.random_range(0..=max)
    }
}

/// Replays a fixed list of offsets, cycling when exhausted.
///
/// Offsets above the requested maximum are clamped to it. An empty script
/// always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOffsets {
    offsets: Vec<u64>,
    next: usize,
}

impl ScriptedOffsets {
    /// Create a source that yields `offsets` in order.
    pub fn new(offsets: Vec<u64>) -> Self {
        Self { offsets, next: 0 }
    }
}

impl OffsetSource for ScriptedOffsets {
    fn next_offset(&mut self, max: u64) -> u64 {
        if self.offsets.is_empty() {
            return 0;
        }
        let offset = self.offsets[self.next % self.offsets.len()];
        self.next += 1;
        offset.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_offsets_in_range() {
        let mut offsets = RandomOffsets::from_seed(7);
        for _ in 0..1000 {
            assert!(offsets.next_offset(4095) <= 4095);
        }
        assert_eq!(offsets.next_offset(0), 0);
    }

    #[test]
    fn test_random_offsets_reproducible() {
        let mut a = RandomOffsets::from_seed(42);
        let mut b = RandomOffsets::from_seed(42);
        let xs: Vec<u64> = (0..16).map(|_| a.next_offset(1 << 40)).collect();
        let ys: Vec<u64> = (0..16).map(|_| b.next_offset(1 << 40)).collect();
        assert_eq!(xs, ys);
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_scripted_offsets_cycle_and_clamp() {
        let mut offsets = ScriptedOffsets::new(vec![10, 500]);
        assert_eq!(offsets.next_offset(100), 10);
        assert_eq!(offsets.next_offset(100), 100);
        assert_eq!(offsets.next_offset(100), 10);

        let mut empty = ScriptedOffsets::default();
        assert_eq!(empty.next_offset(100), 0);
    }
}
