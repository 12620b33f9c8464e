//! Termination criteria
//!
//! Criteria look only at the run state: the generation counter and the elite
//! recorded by the monitor, compared against the thresholds configured in
//! [`RunParameters`](crate::state::RunParameters). A threshold that is not
//! configured never triggers.

use crate::genome::traits::Genome;
use crate::state::RunState;

/// Termination criterion trait
pub trait TerminationCriterion<G: Genome> {
    /// Check if evolution should terminate
    fn should_terminate(&self, state: &RunState<G>) -> bool;

    /// Get a description of why termination occurred
    fn reason(&self) -> &'static str;
}

/// Terminate once `generation >= max_generations`
///
/// Only an unset limit is ignored. `Some(0)` is a real limit rather than a
/// falsy "no limit", so a run configured with it stops after its first
/// generation.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxGenerations;

impl<G: Genome> TerminationCriterion<G> for MaxGenerations {
    fn should_terminate(&self, state: &RunState<G>) -> bool {
        state
            .parameters
            .max_generations
            .is_some_and(|max| state.generation() >= max)
    }

    fn reason(&self) -> &'static str {
        "Maximum generations reached"
    }
}

/// Terminate once the elite's fitness reaches `goal_fitness`
///
/// Only an unset goal is ignored. `Some(0.0)` is a real goal rather than a
/// falsy "no goal", so it triggers as soon as the elite scores 0 or more.
#[derive(Clone, Copy, Debug, Default)]
pub struct GoalFitness;

impl<G: Genome> TerminationCriterion<G> for GoalFitness {
    fn should_terminate(&self, state: &RunState<G>) -> bool {
        match (state.parameters.goal_fitness, &state.elite) {
            (Some(goal), Some(elite)) => elite.fitness() >= goal,
            _ => false,
        }
    }

    fn reason(&self) -> &'static str {
        "Goal fitness reached"
    }
}

/// Combine criteria with OR logic (any one triggers termination)
pub struct AnyOf<G: Genome> {
    criteria: Vec<Box<dyn TerminationCriterion<G>>>,
}

impl<G: Genome> AnyOf<G> {
    /// Create a new AnyOf combinator
    pub fn new(criteria: Vec<Box<dyn TerminationCriterion<G>>>) -> Self {
        Self { criteria }
    }

    /// The first criterion that currently triggers, if any
    pub fn triggered(&self, state: &RunState<G>) -> Option<&dyn TerminationCriterion<G>> {
        self.criteria
            .iter()
            .find(|c| c.should_terminate(state))
            .map(|c| c.as_ref())
    }
}

impl<G: Genome> TerminationCriterion<G> for AnyOf<G> {
    fn should_terminate(&self, state: &RunState<G>) -> bool {
        self.criteria.iter().any(|c| c.should_terminate(state))
    }

    fn reason(&self) -> &'static str {
        "One of multiple criteria met"
    }
}

/// The default stop rule: generation limit reached or goal fitness reached
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfiguredThresholds;

impl<G: Genome> TerminationCriterion<G> for ConfiguredThresholds {
    fn should_terminate(&self, state: &RunState<G>) -> bool {
        MaxGenerations.should_terminate(state) || GoalFitness.should_terminate(state)
    }

    fn reason(&self) -> &'static str {
        "Generation limit or goal fitness reached"
    }
}

pub mod prelude {
    pub use super::{
        AnyOf, ConfiguredThresholds, GoalFitness, MaxGenerations, TerminationCriterion,
    };
}
