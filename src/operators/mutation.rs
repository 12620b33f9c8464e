//! Mutation operators
//!
//! Both operators read their probability from the run state's
//! `mutation_rate` and return the mutated genome.

use rand::Rng;

use crate::error::EvoResult;
use crate::genome::traits::{Booleans, GeneDomain, Genome};
use crate::operators::traits::MutationOperator;
use crate::state::RunState;

/// Per-gene mutation
///
/// Each gene is independently replaced, with probability `mutation_rate`, by
/// a uniformly random value from the gene domain. For booleans this is a
/// random bit, so a "mutated" gene keeps its value half of the time.
#[derive(Clone, Debug, Default)]
pub struct PerGeneMutation<D = Booleans> {
    domain: D,
}

impl PerGeneMutation<Booleans> {
    /// Per-gene mutation over boolean genes
    pub fn boolean() -> Self {
        Self { domain: Booleans }
    }
}

impl<D> PerGeneMutation<D> {
    /// Per-gene mutation drawing replacements from `domain`
    pub fn new(domain: D) -> Self {
        Self { domain }
    }

    /// The gene domain replacements are drawn from
    pub fn domain(&self) -> &D {
        &self.domain
    }
}

impl<G, D> MutationOperator<G> for PerGeneMutation<D>
where
    G: Genome,
    D: GeneDomain<G::Gene>,
{
    fn mutate<R: Rng + ?Sized>(
        &self,
        state: &RunState<G>,
        mut genome: G,
        rng: &mut R,
    ) -> EvoResult<G> {
        let rate = state.mutation_rate()?;
        if rate == 0.0 {
            return Ok(genome);
        }

        for gene in genome.genes_mut() {
            if rng.gen::<f64>() < rate {
                *gene = self.domain.sample(rng);
            }
        }
        Ok(genome)
    }
}

/// Single-flip mutation for boolean genomes
///
/// With probability `mutation_rate`, checked once per child, flips exactly one
/// uniformly chosen gene. Mutation pressure does not grow with genome length.
#[derive(Clone, Debug, Default)]
pub struct SingleFlipMutation;

impl SingleFlipMutation {
    /// Create a new single-flip mutation
    pub fn new() -> Self {
        Self
    }
}

impl<G> MutationOperator<G> for SingleFlipMutation
where
    G: Genome<Gene = bool>,
{
    fn mutate<R: Rng + ?Sized>(
        &self,
        state: &RunState<G>,
        mut genome: G,
        rng: &mut R,
    ) -> EvoResult<G> {
        let rate = state.mutation_rate()?;
        if genome.is_empty() || rate == 0.0 {
            return Ok(genome);
        }

        if rng.gen::<f64>() < rate {
            let index = rng.gen_range(0..genome.len());
            let gene = &mut genome.genes_mut()[index];
            *gene = !*gene;
        }
        Ok(genome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvolutionError;
    use crate::genome::bit_string::BitString;
    use crate::genome::traits::Alphabet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state(rate: f64) -> RunState<BitString> {
        RunState::default().with_mutation_rate(rate)
    }

    #[test]
    fn test_per_gene_rate_zero_is_noop() {
        let mut rng = StdRng::seed_from_u64(42);
        let mutation = PerGeneMutation::boolean();
        let original = BitString::random(64, &mut rng);

        for _ in 0..100 {
            let mutated = mutation
                .mutate(&state(0.0), original.clone(), &mut rng)
                .unwrap();
            assert_eq!(mutated, original);
        }
    }

    #[test]
    fn test_per_gene_rate_one_randomises() {
        let mut rng = StdRng::seed_from_u64(42);
        let mutation = PerGeneMutation::boolean();

        let mutated = mutation
            .mutate(&state(1.0), BitString::zeros(1000), &mut rng)
            .unwrap();
        let ones = mutated.count_ones();
        // Every gene is redrawn uniformly, so roughly half end up set
        assert!((400..600).contains(&ones), "got {} ones", ones);
    }

    #[test]
    fn test_per_gene_preserves_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let mutation = PerGeneMutation::boolean();
        let mutated = mutation
            .mutate(&state(0.3), BitString::ones(37), &mut rng)
            .unwrap();
        assert_eq!(mutated.len(), 37);
    }

    #[test]
    fn test_per_gene_alphabet_domain() {
        let mut rng = StdRng::seed_from_u64(42);
        let mutation = PerGeneMutation::new(Alphabet::new(vec!['x', 'y']).unwrap());
        let state: RunState<Vec<char>> = RunState::default().with_mutation_rate(1.0);

        let mutated = mutation.mutate(&state, vec!['a'; 50], &mut rng).unwrap();
        assert!(mutated.iter().all(|c| *c == 'x' || *c == 'y'));
    }

    #[test]
    fn test_per_gene_requires_rate() {
        let mut rng = StdRng::seed_from_u64(42);
        let result = PerGeneMutation::boolean().mutate(
            &RunState::default(),
            BitString::zeros(3),
            &mut rng,
        );
        assert!(matches!(result, Err(EvolutionError::Configuration(_))));
    }

    #[test]
    fn test_single_flip_rate_one_flips_exactly_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let original = BitString::zeros(20);

        for _ in 0..50 {
            let mutated = SingleFlipMutation
                .mutate(&state(1.0), original.clone(), &mut rng)
                .unwrap();
            assert_eq!(mutated.hamming_distance(&original), Ok(1));
        }
    }

    #[test]
    fn test_single_flip_rate_zero_is_noop() {
        let mut rng = StdRng::seed_from_u64(42);
        let original = BitString::random(20, &mut rng);
        let mutated = SingleFlipMutation
            .mutate(&state(0.0), original.clone(), &mut rng)
            .unwrap();
        assert_eq!(mutated, original);
    }

    #[test]
    fn test_single_flip_empty_genome() {
        let mut rng = StdRng::seed_from_u64(42);
        let mutated = SingleFlipMutation
            .mutate(&state(1.0), BitString::zeros(0), &mut rng)
            .unwrap();
        assert!(mutated.is_empty());
    }
}
