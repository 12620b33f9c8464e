//! Individual wrapper type
//!
//! This module provides the Individual type that pairs a genome with its fitness.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::genome::traits::Genome;

/// An individual in the population
///
/// Immutable once created: the fitness is computed before construction and
/// neither field can be changed afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Individual<G> {
    fitness: f64,
    genome: G,
}

impl<G: Genome> Individual<G> {
    /// Create an individual from a genome and its fitness score
    pub fn new(genome: G, fitness: f64) -> Self {
        Self { fitness, genome }
    }

    /// The fitness score (higher is better)
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Get a reference to the genome
    pub fn genome(&self) -> &G {
        &self.genome
    }

    /// Take the genome out of this individual
    pub fn into_genome(self) -> G {
        self.genome
    }

    /// Check if this individual is strictly better than another
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.fitness > other.fitness
    }

    /// Ordering used for the descending population sort.
    ///
    /// NaN scores rank below every other score.
    pub(crate) fn rank_cmp(&self, other: &Self) -> Ordering {
        let key = |f: f64| if f.is_nan() { f64::NEG_INFINITY } else { f };
        key(other.fitness)
            .partial_cmp(&key(self.fitness))
            .unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::bit_string::BitString;

    #[test]
    fn test_individual_new() {
        let individual = Individual::new(BitString::ones(3), 3.0);
        assert_eq!(individual.fitness(), 3.0);
        assert_eq!(individual.genome(), &BitString::ones(3));
    }

    #[test]
    fn test_individual_is_better_than() {
        let ind1 = Individual::new(BitString::ones(1), 100.0);
        let ind2 = Individual::new(BitString::zeros(1), 50.0);

        assert!(ind1.is_better_than(&ind2));
        assert!(!ind2.is_better_than(&ind1));
        assert!(!ind1.is_better_than(&ind1.clone()));
    }

    #[test]
    fn test_rank_cmp_descending() {
        let high = Individual::new(vec![1u8], 10.0);
        let low = Individual::new(vec![0u8], 1.0);
        let nan = Individual::new(vec![2u8], f64::NAN);

        assert_eq!(high.rank_cmp(&low), Ordering::Less);
        assert_eq!(low.rank_cmp(&high), Ordering::Greater);
        assert_eq!(low.rank_cmp(&nan), Ordering::Less);
        assert_eq!(high.rank_cmp(&high.clone()), Ordering::Equal);
    }

    #[test]
    fn test_individual_into_genome() {
        let genome = vec![true, false];
        let individual = Individual::new(genome.clone(), 1.0);
        assert_eq!(individual.into_genome(), genome);
    }

    #[test]
    fn test_individual_serialization() {
        let individual = Individual::new(BitString::new(vec![true, false]), 1.5);
        let json = serde_json::to_string(&individual).unwrap();
        let back: Individual<BitString> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, individual);
    }
}
