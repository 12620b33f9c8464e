//! Selection operators
//!
//! This module provides Gaussian rank selection, the default parent selection
//! strategy.

use log::warn;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{EvoResult, OperatorError};
use crate::genome::traits::Genome;
use crate::operators::traits::SelectionOperator;
use crate::population::population::Population;
use crate::state::RunState;

/// Gaussian rank selection
///
/// Draws a rank from a half-normal distribution centred on the elite: the
/// index is `|N(0, n / spread)|` truncated to an integer, and draws past the
/// last rank are rejected and redrawn. Fitter individuals (lower ranks) are
/// picked most often while weaker ones keep a declining chance.
#[derive(Clone, Debug)]
pub struct GaussianRankSelection {
    /// Population size is divided by this to get sigma (default 3.0)
    pub spread: f64,
    /// Redraw limit before falling back to the elite
    pub max_attempts: usize,
}

impl GaussianRankSelection {
    /// Create a Gaussian rank selection with sigma = n / 3
    pub fn new() -> Self {
        Self {
            spread: 3.0,
            max_attempts: 1000,
        }
    }

    /// Use sigma = n / spread; larger spreads mean stronger selection pressure
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Set the redraw limit
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Draw a rank in `0..n`
    pub fn sample_rank<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> EvoResult<usize> {
        if n == 0 {
            return Err(
                OperatorError::SelectionFailed("Population cannot be empty".to_string()).into(),
            );
        }
        if !(self.spread.is_finite() && self.spread > 0.0) {
            return Err(OperatorError::InvalidConfiguration(format!(
                "spread must be positive and finite, got {}",
                self.spread
            ))
            .into());
        }
        if n == 1 {
            return Ok(0);
        }

        let sigma = n as f64 / self.spread;
        let normal = Normal::new(0.0, sigma)
            .map_err(|e| OperatorError::InvalidConfiguration(format!("sigma {}: {}", sigma, e)))?;

        for _ in 0..self.max_attempts {
            let rank = normal.sample(rng).abs() as usize;
            if rank < n {
                return Ok(rank);
            }
        }

        warn!(
            "Gaussian rank selection rejected {} draws (n = {}, sigma = {:.3}); \
             selecting the elite",
            self.max_attempts,
            n,
            sigma
        );
        Ok(0)
    }
}

impl Default for GaussianRankSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genome> SelectionOperator<G> for GaussianRankSelection {
    fn select<R: Rng + ?Sized>(
        &self,
        _state: &RunState<G>,
        population: &Population<G>,
        rng: &mut R,
    ) -> EvoResult<usize> {
        self.sample_rank(population.len(), rng)
    }
}
