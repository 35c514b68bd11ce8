//! Sources for the initial sequence of a run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ValueRange;

/// Supplies freshly generated values whenever the engine resets.
pub trait SequenceSource: Send {
    fn generate(&mut self, len: usize) -> Vec<u32>;
}

/// Uniform random values drawn from a [`ValueRange`].
pub struct RandomSource {
    range: ValueRange,
    rng: StdRng,
}

impl RandomSource {
    pub fn new(range: ValueRange) -> Self {
        Self {
            range,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(range: ValueRange, seed: u64) -> Self {
        Self {
            range,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }
}

impl SequenceSource for RandomSource {
    fn generate(&mut self, len: usize) -> Vec<u32> {
        let range = self.range.min..=self.range.max;
        (0..len).map(|_| self.rng.gen_range(range.clone())).collect()
    }
}

/// Replays a fixed pattern, cycling it to fill the requested length.
#[derive(Debug, Clone)]
pub struct FixedSource {
    values: Vec<u32>,
}

impl FixedSource {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }
}

impl SequenceSource for FixedSource {
    fn generate(&mut self, len: usize) -> Vec<u32> {
        if self.values.is_empty() {
            return vec![0; len];
        }
        self.values.iter().copied().cycle().take(len).collect()
    }
}
