//! Benchmark problems
//!
//! Boolean test problems for exercising the engine: OneMax and the 0/1
//! knapsack problem.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, GenomeError, OperatorError};
use crate::fitness::traits::Fitness;
use crate::genome::bit_string::BitString;
use crate::state::RunState;

/// OneMax function for bit strings
///
/// Counts the number of 1s in the bit string. Optimum when all bits are 1.
#[derive(Clone, Debug, Default)]
pub struct OneMax;

impl OneMax {
    /// Create a new OneMax function
    pub fn new() -> Self {
        Self
    }
}

impl Fitness for OneMax {
    type Genome = BitString;

    fn evaluate(&self, _state: &RunState<BitString>, genome: &BitString) -> EvoResult<f64> {
        Ok(genome.count_ones() as f64)
    }
}

/// One item that may be packed
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnapsackItem {
    pub weight: f64,
    pub value: f64,
}

/// 0/1 knapsack problem
///
/// Gene `i` says whether item `i` is packed. The fitness is the total value of
/// the packed items, or 0 when their total weight exceeds the capacity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Knapsack {
    items: Vec<KnapsackItem>,
    capacity: f64,
}

impl Knapsack {
    /// Create a knapsack instance from explicit items
    pub fn new(items: Vec<KnapsackItem>, capacity: f64) -> Self {
        Self { items, capacity }
    }

    /// Generate a random instance.
    ///
    /// Weights and values are `|N(0, sigma)|` draws.
    pub fn random<R: Rng + ?Sized>(
        n_items: usize,
        weight_sigma: f64,
        value_sigma: f64,
        capacity: f64,
        rng: &mut R,
    ) -> EvoResult<Self> {
        let weights = half_normal_source("weight", weight_sigma)?;
        let values = half_normal_source("value", value_sigma)?;

        let items = (0..n_items)
            .map(|_| KnapsackItem {
                weight: weights.sample(rng).abs(),
                value: values.sample(rng).abs(),
            })
            .collect();
        Ok(Self { items, capacity })
    }

    /// The items of this instance
    pub fn items(&self) -> &[KnapsackItem] {
        &self.items
    }

    /// Number of items (the genome length)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the instance has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum total weight
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// A genome with exactly one randomly chosen item packed
    pub fn sparse_genome<R: Rng + ?Sized>(&self, rng: &mut R) -> BitString {
        let mut genome = BitString::zeros(self.items.len());
        if !self.items.is_empty() {
            genome.set(rng.gen_range(0..self.items.len()), true);
        }
        genome
    }

    /// Total weight of the packed items
    pub fn total_weight(&self, genome: &BitString) -> f64 {
        self.packed(genome).map(|item| item.weight).sum()
    }

    /// Total value of the packed items, ignoring capacity
    pub fn total_value(&self, genome: &BitString) -> f64 {
        self.packed(genome).map(|item| item.value).sum()
    }

    fn packed<'a>(&'a self, genome: &'a BitString) -> impl Iterator<Item = &'a KnapsackItem> {
        self.items
            .iter()
            .zip(genome.bits())
            .filter(|(_, packed)| **packed)
            .map(|(item, _)| item)
    }
}

/// `Normal::new` only rejects non-finite deviations, so the sign is checked here
fn half_normal_source(name: &str, sigma: f64) -> EvoResult<Normal<f64>> {
    if !(sigma.is_finite() && sigma >= 0.0) {
        return Err(OperatorError::InvalidConfiguration(format!(
            "{} sigma must be finite and non-negative, got {}",
            name, sigma
        ))
        .into());
    }
    Normal::new(0.0, sigma).map_err(|e| {
        OperatorError::InvalidConfiguration(format!("{} sigma: {}", name, e)).into()
    })
}

impl Fitness for Knapsack {
    type Genome = BitString;

    fn evaluate(&self, _state: &RunState<BitString>, genome: &BitString) -> EvoResult<f64> {
        if genome.len() != self.items.len() {
            return Err(GenomeError::DimensionMismatch {
                expected: self.items.len(),
                actual: genome.len(),
            }
            .into());
        }
        if self.total_weight(genome) > self.capacity {
            return Ok(0.0);
        }
        Ok(self.total_value(genome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvolutionError;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_knapsack() -> Knapsack {
        Knapsack::new(
            vec![
                KnapsackItem { weight: 2.0, value: 3.0 },
                KnapsackItem { weight: 3.0, value: 4.0 },
                KnapsackItem { weight: 4.0, value: 8.0 },
            ],
            6.0,
        )
    }

    #[test]
    fn test_onemax() {
        let state = RunState::default();
        let genome: BitString = "10110".parse().unwrap();
        assert_eq!(OneMax::new().evaluate(&state, &genome).unwrap(), 3.0);
    }

    #[test]
    fn test_knapsack_within_capacity() {
        let knapsack = small_knapsack();
        let state = RunState::default();
        let genome: BitString = "101".parse().unwrap();

        assert_relative_eq!(knapsack.total_weight(&genome), 6.0);
        assert_relative_eq!(knapsack.evaluate(&state, &genome).unwrap(), 11.0);
    }

    #[test]
    fn test_knapsack_over_capacity_scores_zero() {
        let knapsack = small_knapsack();
        let state = RunState::default();
        let genome: BitString = "111".parse().unwrap();

        assert_relative_eq!(knapsack.total_value(&genome), 15.0);
        assert_relative_eq!(knapsack.evaluate(&state, &genome).unwrap(), 0.0);
    }

    #[test]
    fn test_knapsack_length_mismatch() {
        let knapsack = small_knapsack();
        let state = RunState::default();
        let result = knapsack.evaluate(&state, &BitString::zeros(2));
        assert!(matches!(result, Err(EvolutionError::Genome(_))));
    }

    #[test]
    fn test_knapsack_random_instance() {
        let mut rng = StdRng::seed_from_u64(42);
        let knapsack = Knapsack::random(50, 10.0, 100.0, 100.0, &mut rng).unwrap();

        assert_eq!(knapsack.len(), 50);
        assert!(knapsack
            .items()
            .iter()
            .all(|item| item.weight >= 0.0 && item.value >= 0.0));
    }

    #[test]
    fn test_knapsack_random_rejects_bad_sigma() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(Knapsack::random(5, -1.0, 1.0, 10.0, &mut rng).is_err());
        assert!(matches!(
            Knapsack::random(5, 1.0, -0.5, 10.0, &mut rng),
            Err(EvolutionError::Operator(OperatorError::InvalidConfiguration(_)))
        ));
        assert!(Knapsack::random(5, f64::NAN, 1.0, 10.0, &mut rng).is_err());
        assert!(Knapsack::random(5, f64::INFINITY, 1.0, 10.0, &mut rng).is_err());
    }

    #[test]
    fn test_knapsack_random_zero_sigma() {
        let mut rng = StdRng::seed_from_u64(42);
        let knapsack = Knapsack::random(4, 0.0, 1.0, 10.0, &mut rng).unwrap();
        assert!(knapsack.items().iter().all(|item| item.weight == 0.0));
    }

    #[test]
    fn test_sparse_genome_has_one_item() {
        let mut rng = StdRng::seed_from_u64(3);
        let knapsack = small_knapsack();
        for _ in 0..20 {
            assert_eq!(knapsack.sparse_genome(&mut rng).count_ones(), 1);
        }
    }
}
