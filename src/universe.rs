//! Discretized sampling domains for fuzzy variables.

use serde::{Deserialize, Serialize};

use crate::{FuzzyError, Result};

/// An ordered, strictly increasing discretization of a real interval.
///
/// The sample grid is fixed at construction and only used when aggregating
/// and defuzzifying *output* sets; crisp inputs are evaluated against the
/// membership functions' closed forms directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    samples: Vec<f64>,
}

impl Universe {
    /// Create a universe from explicit sample points.
    pub fn new(samples: Vec<f64>) -> Result<Self> {
        if samples.len() < 2 {
            return Err(FuzzyError::Configuration(
                "universe needs at least two sample points".into(),
            ));
        }
        if samples.iter().any(|x| !x.is_finite()) {
            return Err(FuzzyError::Configuration(
                "universe samples must be finite".into(),
            ));
        }
        if samples.windows(2).any(|w| w[0] >= w[1]) {
            return Err(FuzzyError::Configuration(
                "universe samples must be strictly increasing".into(),
            ));
        }
        Ok(Self { samples })
    }

    /// Create a universe of `n` evenly spaced samples covering `[min, max]`.
    pub fn linspace(min: f64, max: f64, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(FuzzyError::Configuration(
                "universe needs at least two sample points".into(),
            ));
        }
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(FuzzyError::Configuration(format!(
                "invalid universe bounds [{min}, {max}]"
            )));
        }
        let span = max - min;
        let last = (n - 1) as f64;
        let samples = (0..n).map(|i| min + span * i as f64 / last).collect();
        Ok(Self { samples })
    }

    /// Lower bound of the universe.
    pub fn min(&self) -> f64 {
        self.samples[0]
    }

    /// Upper bound of the universe.
    pub fn max(&self) -> f64 {
        self.samples[self.samples.len() - 1]
    }

    /// The sample grid.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of sample points.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; construction guarantees at least two samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether a crisp value lies within the universe bounds (inclusive).
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min() && x <= self.max()
    }
}
