//! Randomness sources
//!
//! Every random decision in `sim` goes through a [`RandomSource`] passed in by
//! the caller. Production code hands in a [`SeededSource`]; tests hand in a
//! [`FixedSource`] or [`SequenceSource`] to pin outcomes down exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// A generator of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Next draw in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Pick an index in `0..len` as `floor(u * len)`.
    ///
    /// Returns `None` for an empty range. Draws at or above 1.0 (only possible
    /// from stubbed sources) land on the last index.
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let unit = self.next_unit().clamp(0.0, 1.0);
        let index = (unit * len as f64).floor() as usize;
        Some(index.min(len - 1))
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// PCG-backed source for production use
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    rng: Pcg32,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Two independent streams from one seed (cell placement, fruit kind)
    pub fn pair(seed: u64) -> (Self, Self) {
        let cell = Self::from_seed(seed);
        let kind = Self {
            seed,
            rng: Pcg32::new(seed, 0x9e37_79b9_7f4a_7c15),
        };
        (cell, kind)
    }

    /// Seed from the operating system (or the browser on wasm32)
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Always returns the same draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedSource(pub f64);

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a list of draws in order, cycling when exhausted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
