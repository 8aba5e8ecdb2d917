//! Injectable randomness.
//!
//! Every stochastic operation in the simulation (trait seeding, success
//! rolls, profit variance, partner and project selection) draws from a
//! [`RandomSource`] passed in by the caller. Production code uses
//! [`ThreadRandom`]; reproducible runs use [`SeededRandom`]; tests feed
//! exact sequences through [`ScriptedRandom`].
//!
//! All derived draws (`chance`, `index`, `below`) are computed from a single
//! [`RandomSource::next_unit`] call, so a scripted sequence controls every
//! outcome one value at a time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed values in `[0, 1)`.
pub trait RandomSource: Send {
    /// Draw the next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Return `true` with the given probability.
    ///
    /// Consumes one draw; succeeds when the draw is strictly below
    /// `probability`.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Pick an index in `0..len`. Returns 0 when `len` is 0.
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let raw = (self.next_unit() * len as f64).floor().max(0.0) as usize;
        raw.min(len.saturating_sub(1))
    }

    /// Draw an integer in `0..bound`. Returns 0 when `bound` is 0.
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let raw = (self.next_unit() * f64::from(bound)).floor().max(0.0) as u32;
        raw.min(bound.saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// ThreadRandom
// ---------------------------------------------------------------------------

/// Unseeded randomness from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl ThreadRandom {
    /// Create a new thread-local random source.
    pub const fn new() -> Self {
        Self
    }
}

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::random::<f64>()
    }
}

// ---------------------------------------------------------------------------
// SeededRandom
// ---------------------------------------------------------------------------

/// Reproducible randomness from a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a random source seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

// ---------------------------------------------------------------------------
// ScriptedRandom
// ---------------------------------------------------------------------------

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Values are returned as given. An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Create a source that replays `values` in order.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    pub const fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let slot = self.cursor % self.values.len();
        self.cursor = self.cursor.saturating_add(1);
        self.values.get(slot).copied().unwrap_or(0.0)
    }
}
