//! Bounded random draws shared by every entity constructor

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Half-open range `[min, max)` sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Span centered on zero, `[-half_width, half_width)`
    pub const fn symmetric(half_width: f64) -> Self {
        Self { min: -half_width, max: half_width }
    }

    /// Draw a value; a degenerate span always yields `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }

    pub fn is_inverted(&self) -> bool {
        self.max < self.min
    }
}

/// Pick one entry of a palette, falling back when the palette is empty
pub fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T], fallback: T) -> T {
    items.choose(rng).copied().unwrap_or(fallback)
}

/// Bernoulli trial that tolerates out-of-range probabilities. NaN never fires.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    if probability.is_nan() {
        return false;
    }
    rng.gen_bool(probability.clamp(0.0, 1.0))
}
