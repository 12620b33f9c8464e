//! Generational genetic algorithm
//!
//! This module implements an elitist generational GA: every generation the
//! best individual is carried over unchanged and the rest of the population is
//! replaced by freshly bred and scored children.

use std::marker::PhantomData;

use log::{debug, info, warn};
use rand::Rng;

use crate::error::{EvoResult, EvolutionError, GenomeError, OperatorError};
use crate::fitness::traits::Fitness;
use crate::genome::traits::Genome;
use crate::monitor::Monitor;
use crate::operators::traits::{CrossoverOperator, MutationOperator, SelectionOperator};
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::state::RunState;

/// Builder for GenerationalGA
pub struct GenerationalGABuilder<G, S, C, M, Fit>
where
    G: Genome,
{
    selection: Option<S>,
    crossover: Option<C>,
    mutation: Option<M>,
    fitness: Option<Fit>,
    _phantom: PhantomData<G>,
}

impl<G: Genome> GenerationalGABuilder<G, (), (), (), ()> {
    /// Create a new builder with no operators set
    pub fn new() -> Self {
        Self {
            selection: None,
            crossover: None,
            mutation: None,
            fitness: None,
            _phantom: PhantomData,
        }
    }
}

impl<G: Genome> Default for GenerationalGABuilder<G, (), (), (), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, S, C, M, Fit> GenerationalGABuilder<G, S, C, M, Fit>
where
    G: Genome,
{
    /// Set the selection operator
    pub fn selection<NewS>(self, selection: NewS) -> GenerationalGABuilder<G, NewS, C, M, Fit>
    where
        NewS: SelectionOperator<G>,
    {
        GenerationalGABuilder {
            selection: Some(selection),
            crossover: self.crossover,
            mutation: self.mutation,
            fitness: self.fitness,
            _phantom: PhantomData,
        }
    }

    /// Set the crossover operator
    pub fn crossover<NewC>(self, crossover: NewC) -> GenerationalGABuilder<G, S, NewC, M, Fit>
    where
        NewC: CrossoverOperator<G>,
    {
        GenerationalGABuilder {
            selection: self.selection,
            crossover: Some(crossover),
            mutation: self.mutation,
            fitness: self.fitness,
            _phantom: PhantomData,
        }
    }

    /// Set the mutation operator
    pub fn mutation<NewM>(self, mutation: NewM) -> GenerationalGABuilder<G, S, C, NewM, Fit>
    where
        NewM: MutationOperator<G>,
    {
        GenerationalGABuilder {
            selection: self.selection,
            crossover: self.crossover,
            mutation: Some(mutation),
            fitness: self.fitness,
            _phantom: PhantomData,
        }
    }

    /// Set the fitness function
    pub fn fitness<NewFit>(self, fitness: NewFit) -> GenerationalGABuilder<G, S, C, M, NewFit>
    where
        NewFit: Fitness<Genome = G>,
    {
        GenerationalGABuilder {
            selection: self.selection,
            crossover: self.crossover,
            mutation: self.mutation,
            fitness: Some(fitness),
            _phantom: PhantomData,
        }
    }
}

impl<G, S, C, M, Fit> GenerationalGABuilder<G, S, C, M, Fit>
where
    G: Genome,
    S: SelectionOperator<G>,
    C: CrossoverOperator<G>,
    M: MutationOperator<G>,
    Fit: Fitness<Genome = G>,
{
    /// Build the GenerationalGA instance
    pub fn build(self) -> Result<GenerationalGA<G, S, C, M, Fit>, EvolutionError> {
        let selection = self.selection.ok_or_else(|| {
            EvolutionError::Configuration("Selection operator must be specified".to_string())
        })?;

        let crossover = self.crossover.ok_or_else(|| {
            EvolutionError::Configuration("Crossover operator must be specified".to_string())
        })?;

        let mutation = self.mutation.ok_or_else(|| {
            EvolutionError::Configuration("Mutation operator must be specified".to_string())
        })?;

        let fitness = self.fitness.ok_or_else(|| {
            EvolutionError::Configuration("Fitness function must be specified".to_string())
        })?;

        Ok(GenerationalGA {
            selection,
            crossover,
            mutation,
            fitness,
            _phantom: PhantomData,
        })
    }
}

/// What a finished run hands back to the caller
#[derive(Clone, Debug)]
pub struct RunOutcome<G: Genome> {
    /// Run state as the monitor left it
    pub state: RunState<G>,
    /// The last population produced
    pub population: Population<G>,
}

impl<G: Genome> RunOutcome<G> {
    /// Best individual of the final population
    pub fn elite(&self) -> &Individual<G> {
        self.population.elite()
    }

    /// Generation counter at termination
    pub fn generations(&self) -> usize {
        self.state.generation()
    }
}

/// Elitist generational genetic algorithm
///
/// The engine is generic over its operators and holds no run state of its
/// own; one instance can drive any number of runs.
pub struct GenerationalGA<G, S, C, M, Fit>
where
    G: Genome,
{
    selection: S,
    crossover: C,
    mutation: M,
    fitness: Fit,
    _phantom: PhantomData<G>,
}

impl<G: Genome> GenerationalGA<G, (), (), (), ()> {
    /// Create a builder for GenerationalGA
    pub fn builder() -> GenerationalGABuilder<G, (), (), (), ()> {
        GenerationalGABuilder::new()
    }
}

impl<G, S, C, M, Fit> GenerationalGA<G, S, C, M, Fit>
where
    G: Genome,
    S: SelectionOperator<G>,
    C: CrossoverOperator<G>,
    M: MutationOperator<G>,
    Fit: Fitness<Genome = G>,
{
    /// Score a batch of genomes with this engine's fitness function
    pub fn evaluate_population(
        &self,
        state: &RunState<G>,
        genomes: Vec<G>,
    ) -> EvoResult<Population<G>> {
        Population::evaluate(genomes, |genome| self.fitness.evaluate(state, genome))
    }

    /// Run until the monitor signals termination.
    ///
    /// The population size and genome length of `population` are kept for
    /// the whole run. Any operator, fitness or monitor error aborts the run
    /// and is returned as is.
    pub fn run<Mon, R>(
        &self,
        monitor: &mut Mon,
        mut state: RunState<G>,
        mut population: Population<G>,
        rng: &mut R,
    ) -> EvoResult<RunOutcome<G>>
    where
        Mon: Monitor<G> + ?Sized,
        R: Rng + ?Sized,
    {
        let start = state.ensure_generation();
        if !state.has_termination_threshold() {
            warn!(
                "Neither max_generations nor goal_fitness is set; \
                 the monitor alone decides when to stop"
            );
        }
        info!(
            "Starting run at generation {}: population {}, genome length {}, elite fitness {}",
            start,
            population.len(),
            population.genome_len(),
            population.elite().fitness()
        );

        loop {
            population = self.next_generation(&state, &population, rng)?;
            debug!(
                "Bred generation {}: elite fitness {}, mean fitness {:.4}",
                state.generation() + 1,
                population.elite().fitness(),
                population.mean_fitness()
            );

            if monitor.observe(&mut state, &population)?.is_terminal() {
                break;
            }
        }

        info!(
            "Run finished at generation {} with elite fitness {}",
            state.generation(),
            population.elite().fitness()
        );
        Ok(RunOutcome { state, population })
    }

    /// Breed one generation from a sorted population
    fn next_generation<R: Rng + ?Sized>(
        &self,
        state: &RunState<G>,
        population: &Population<G>,
        rng: &mut R,
    ) -> EvoResult<Population<G>> {
        let size = population.len();
        let genome_len = population.genome_len();

        let mut next = Vec::with_capacity(size);
        next.push(population.elite().clone());

        while next.len() < size {
            let mom = self.select_parent(state, population, rng)?;
            let dad = self.select_parent(state, population, rng)?;

            let child = self
                .crossover
                .crossover(state, mom.genome(), dad.genome(), rng)?;
            let child = self.mutation.mutate(state, child, rng)?;
            if child.len() != genome_len {
                return Err(GenomeError::DimensionMismatch {
                    expected: genome_len,
                    actual: child.len(),
                }
                .into());
            }

            let fitness = self.fitness.evaluate(state, &child)?;
            next.push(Individual::new(child, fitness));
        }

        Population::new(next)
    }

    fn select_parent<'a, R: Rng + ?Sized>(
        &self,
        state: &RunState<G>,
        population: &'a Population<G>,
        rng: &mut R,
    ) -> EvoResult<&'a Individual<G>> {
        let index = self.selection.select(state, population, rng)?;
        population.get(index).ok_or_else(|| {
            OperatorError::SelectionFailed(format!(
                "selected index {} is out of range for a population of {}",
                index,
                population.len()
            ))
            .into()
        })
    }
}
