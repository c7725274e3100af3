//! Shared utilities
//!
//! Randomness is injected into every filter that needs it through
//! [`RandomSource`], so a run can be replayed from its seed.

use std::time::{SystemTime, UNIX_EPOCH};

/// A source of independent uniform values in `[0, 1)`
///
/// Filters draw a fresh value per decision and per channel; implementors
/// must never hand back a cached value.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[min, max)`
    #[inline]
    fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform integer in `[min, max)`
    ///
    /// Returns `min` when the range is empty.
    #[inline]
    fn range_i64(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = (max - min) as f64;
        min + ((self.next_f64() * span).floor() as i64).min(max - min - 1)
    }

    /// True with probability `p`
    #[inline]
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Simple deterministic RNG using xorshift64
/// Good for reproducible runs without a global generator
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) } // Ensure non-zero
    }

    /// Seed from the system clock
    pub fn seed_from_clock() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0x00D1_A27C, |d| d.as_nanos() as u64)
    }

    /// Get the next random u64
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl RandomSource for Rng {
    /// 53 high bits mapped onto `[0, 1)`
    #[inline]
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a fixed list of values, cycling when exhausted
///
/// Lets tests pin down exactly which branch a randomized filter takes.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of values drawn so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
