//! Population type
//!
//! This module provides the Population container type.

use std::ops::Index;

use crate::error::{EvoResult, EvolutionError, GenomeError};
use crate::genome::traits::Genome;
use crate::population::individual::Individual;

/// A non-empty population of individuals sorted by descending fitness
///
/// Every individual carries a genome of the same length. Index 0 is always
/// the elite.
#[derive(Clone, Debug, PartialEq)]
pub struct Population<G> {
    individuals: Vec<Individual<G>>,
}

impl<G: Genome> Population<G> {
    /// Create a population from a vector of individuals.
    ///
    /// The individuals are stable-sorted by descending fitness, so ties keep
    /// their relative order.
    pub fn new(individuals: Vec<Individual<G>>) -> EvoResult<Self> {
        let first = individuals.first().ok_or(EvolutionError::EmptyPopulation)?;
        let expected = first.genome().len();
        if let Some(odd) = individuals.iter().find(|i| i.genome().len() != expected) {
            return Err(GenomeError::DimensionMismatch {
                expected,
                actual: odd.genome().len(),
            }
            .into());
        }

        let mut population = Self { individuals };
        population.sort_descending();
        Ok(population)
    }

    /// Evaluate a list of genomes and build a population from them
    pub fn evaluate<F>(genomes: Vec<G>, mut score: F) -> EvoResult<Self>
    where
        F: FnMut(&G) -> EvoResult<f64>,
    {
        let individuals = genomes
            .into_iter()
            .map(|genome| {
                let fitness = score(&genome)?;
                Ok(Individual::new(genome, fitness))
            })
            .collect::<EvoResult<Vec<_>>>()?;
        Self::new(individuals)
    }

    fn sort_descending(&mut self) {
        // `sort_by` is stable
        self.individuals.sort_by(|a, b| a.rank_cmp(b));
    }

    /// The best individual
    pub fn elite(&self) -> &Individual<G> {
        &self.individuals[0]
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Always false: a population holds at least one individual
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Length shared by every genome in the population
    pub fn genome_len(&self) -> usize {
        self.elite().genome().len()
    }

    /// Get an individual by rank
    pub fn get(&self, index: usize) -> Option<&Individual<G>> {
        self.individuals.get(index)
    }

    /// Get an iterator over the individuals, best first
    pub fn iter(&self) -> impl Iterator<Item = &Individual<G>> {
        self.individuals.iter()
    }

    /// Get the underlying slice of individuals
    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    /// Check the descending-fitness invariant
    pub fn is_sorted_descending(&self) -> bool {
        self.individuals
            .windows(2)
            .all(|pair| pair[0].rank_cmp(&pair[1]) != std::cmp::Ordering::Greater)
    }

    /// Mean fitness of the population
    pub fn mean_fitness(&self) -> f64 {
        self.individuals.iter().map(|i| i.fitness()).sum::<f64>() / self.len() as f64
    }
}

impl<G> Index<usize> for Population<G> {
    type Output = Individual<G>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}
