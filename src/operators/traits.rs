//! Operator traits
//!
//! This module defines the core operator traits for genetic algorithms. Every
//! operator receives the shared run state so it can read its tunable
//! parameters, and an explicit random source so runs are reproducible.

use rand::Rng;

use crate::error::EvoResult;
use crate::genome::traits::Genome;
use crate::population::population::Population;
use crate::state::RunState;

/// Selection operator trait
///
/// Selects individuals from a population for reproduction.
pub trait SelectionOperator<G: Genome> {
    /// Select a single individual from the population
    ///
    /// The population is sorted best first. Returns the index of the selected
    /// individual; the same index may be returned on consecutive calls.
    fn select<R: Rng + ?Sized>(
        &self,
        state: &RunState<G>,
        population: &Population<G>,
        rng: &mut R,
    ) -> EvoResult<usize>;
}

/// Crossover operator trait
///
/// Combines genetic material from two parents into one child.
pub trait CrossoverOperator<G: Genome> {
    /// Produce a child genome with the parents' length
    fn crossover<R: Rng + ?Sized>(
        &self,
        state: &RunState<G>,
        mom: &G,
        dad: &G,
        rng: &mut R,
    ) -> EvoResult<G>;
}

/// Mutation operator trait
///
/// Applies random changes to a genome. The returned genome is the child; the
/// engine never mutates on its own.
pub trait MutationOperator<G: Genome> {
    /// Apply mutation and return the (possibly unchanged) genome
    fn mutate<R: Rng + ?Sized>(&self, state: &RunState<G>, genome: G, rng: &mut R)
        -> EvoResult<G>;
}
