//! Crossover operators
//!
//! This module provides single-point crossover, the default recombination
//! strategy.

use rand::Rng;

use crate::error::{EvoResult, GenomeError};
use crate::genome::traits::Genome;
use crate::operators::traits::CrossoverOperator;
use crate::state::RunState;

/// Single-point crossover
///
/// Cuts both parents at one uniformly random point `c` in `[0, L - 1]` and
/// joins the head of the mother with the tail of the father:
/// `child = mom[..c] ++ dad[c..]`.
#[derive(Clone, Debug, Default)]
pub struct SinglePointCrossover;

impl SinglePointCrossover {
    /// Create a new single-point crossover
    pub fn new() -> Self {
        Self
    }

    /// Join `mom[..point]` with `dad[point..]`.
    ///
    /// `point` may be anywhere in `[0, L]`: 0 yields the father, `L` the
    /// mother.
    pub fn splice<G: Genome>(mom: &G, dad: &G, point: usize) -> EvoResult<G> {
        check_lengths(mom, dad)?;
        if point > mom.len() {
            return Err(GenomeError::InvalidStructure(format!(
                "crossover point {} is past the genome length {}",
                point,
                mom.len()
            ))
            .into());
        }

        let genes = mom.genes()[..point]
            .iter()
            .chain(&dad.genes()[point..])
            .cloned()
            .collect();
        Ok(G::from_genes(genes))
    }
}

impl<G: Genome> CrossoverOperator<G> for SinglePointCrossover {
    fn crossover<R: Rng + ?Sized>(
        &self,
        _state: &RunState<G>,
        mom: &G,
        dad: &G,
        rng: &mut R,
    ) -> EvoResult<G> {
        check_lengths(mom, dad)?;

        let n = mom.len();
        if n == 0 {
            return Ok(mom.clone());
        }

        let point = rng.gen_range(0..n);
        Self::splice(mom, dad, point)
    }
}

fn check_lengths<G: Genome>(mom: &G, dad: &G) -> Result<(), GenomeError> {
    if mom.len() != dad.len() {
        return Err(GenomeError::DimensionMismatch {
            expected: mom.len(),
            actual: dad.len(),
        });
    }
    Ok(())
}
