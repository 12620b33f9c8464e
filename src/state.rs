//! Run state and run parameters
//!
//! [`RunState`] is threaded through every operator call of a run. The engine
//! makes sure a generation counter exists, the monitor advances it and records
//! the elite, and operators read whatever tunable parameters they need from
//! [`RunParameters`]. Parameters the library does not know about are kept in
//! an open key-value bag and passed through untouched.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EvoResult, EvolutionError};
use crate::population::individual::Individual;

/// Tunable parameters of a run
///
/// Deserializes from JSON. Keys may be written in `snake_case` or
/// `camelCase`; unrecognised keys end up in [`RunParameters::extra`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Stop once this many generations have been produced
    #[serde(default, alias = "maxGenerations", skip_serializing_if = "Option::is_none")]
    pub max_generations: Option<usize>,
    /// Stop once the elite reaches this fitness
    #[serde(default, alias = "goalFitness", skip_serializing_if = "Option::is_none")]
    pub goal_fitness: Option<f64>,
    /// Per-gene (or per-child) mutation probability in `[0, 1]`
    #[serde(default, alias = "mutationRate", skip_serializing_if = "Option::is_none")]
    pub mutation_rate: Option<f64>,
    /// Problem-specific parameters
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RunParameters {
    /// Parse parameters from a JSON document
    pub fn from_json_str(json: &str) -> EvoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load parameters from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> EvoResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Mutable state of a single optimization run
#[derive(Clone, Debug)]
pub struct RunState<G> {
    /// Number of generations produced so far; `None` until the engine starts
    pub generation: Option<usize>,
    /// Best individual of the latest generation, recorded by the monitor
    pub elite: Option<Individual<G>>,
    /// Tunable parameters
    pub parameters: RunParameters,
}

impl<G> Default for RunState<G> {
    fn default() -> Self {
        Self::new(RunParameters::default())
    }
}

impl<G> RunState<G> {
    /// Create a fresh state from parameters
    pub fn new(parameters: RunParameters) -> Self {
        Self {
            generation: None,
            elite: None,
            parameters,
        }
    }

    /// Create a fresh state from a JSON parameter document
    pub fn from_json_str(json: &str) -> EvoResult<Self> {
        Ok(Self::new(RunParameters::from_json_str(json)?))
    }

    /// Set the generation limit
    pub fn with_max_generations(mut self, max: usize) -> Self {
        self.parameters.max_generations = Some(max);
        self
    }

    /// Set the goal fitness
    pub fn with_goal_fitness(mut self, goal: f64) -> Self {
        self.parameters.goal_fitness = Some(goal);
        self
    }

    /// Set the mutation rate
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.parameters.mutation_rate = Some(rate);
        self
    }

    /// Set the generation counter explicitly (e.g. to continue a numbering)
    pub fn with_generation(mut self, generation: usize) -> Self {
        self.generation = Some(generation);
        self
    }

    /// Current generation, 0 before the run starts
    pub fn generation(&self) -> usize {
        self.generation.unwrap_or(0)
    }

    /// Initialise the generation counter to 0 unless it is already set
    pub fn ensure_generation(&mut self) -> usize {
        *self.generation.get_or_insert(0)
    }

    /// Increment the generation counter and return the new value
    pub fn advance_generation(&mut self) -> usize {
        let next = self.generation() + 1;
        self.generation = Some(next);
        next
    }

    /// Whether a generation limit or goal fitness is configured
    pub fn has_termination_threshold(&self) -> bool {
        self.parameters.max_generations.is_some() || self.parameters.goal_fitness.is_some()
    }

    /// The configured mutation rate.
    ///
    /// Fails if it is missing or outside `[0, 1]`.
    pub fn mutation_rate(&self) -> EvoResult<f64> {
        let rate = self.parameters.mutation_rate.ok_or_else(|| {
            EvolutionError::Configuration("mutation_rate must be specified".to_string())
        })?;
        if !(0.0..=1.0).contains(&rate) {
            return Err(EvolutionError::Configuration(format!(
                "mutation_rate must be in [0, 1], got {}",
                rate
            )));
        }
        Ok(rate)
    }

    /// Typed lookup of a problem-specific parameter
    pub fn extra<T: DeserializeOwned>(&self, key: &str) -> EvoResult<Option<T>> {
        self.parameters
            .extra
            .get(key)
            .map(|value| T::deserialize(value).map_err(EvolutionError::from))
            .transpose()
    }

    /// Store a problem-specific parameter
    pub fn set_extra<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> EvoResult<()> {
        self.parameters
            .extra
            .insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }
}
