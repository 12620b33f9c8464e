//! Fitness traits
//!
//! This module defines the fitness evaluation trait.

use std::marker::PhantomData;

use crate::error::EvoResult;
use crate::genome::traits::Genome;
use crate::state::RunState;

/// Fitness evaluation trait
///
/// Defines how to score a genome. Higher is better. Implementations should be
/// deterministic for a fixed run state.
pub trait Fitness {
    /// The genome type being evaluated
    type Genome: Genome;

    /// Evaluate fitness (higher = better by convention)
    fn evaluate(&self, state: &RunState<Self::Genome>, genome: &Self::Genome) -> EvoResult<f64>;
}

/// A simple function wrapper for fitness evaluation
pub struct FnFitness<G, F>
where
    F: Fn(&RunState<G>, &G) -> f64,
{
    f: F,
    _marker: PhantomData<G>,
}

impl<G, F> FnFitness<G, F>
where
    F: Fn(&RunState<G>, &G) -> f64,
{
    /// Create a new function-based fitness evaluator
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<G, F> Fitness for FnFitness<G, F>
where
    G: Genome,
    F: Fn(&RunState<G>, &G) -> f64,
{
    type Genome = G;

    fn evaluate(&self, state: &RunState<G>, genome: &G) -> EvoResult<f64> {
        Ok((self.f)(state, genome))
    }
}
