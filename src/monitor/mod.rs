//! Run monitoring
//!
//! A monitor is called once per generation, after the new population has been
//! sorted. It owns progress reporting and the decision to stop; the engine
//! stops as soon as a monitor returns [`MonitorDecision::Terminate`].

pub mod log_monitor;

use crate::error::EvoResult;
use crate::genome::traits::Genome;
use crate::population::population::Population;
use crate::state::RunState;

/// What the engine should do after a generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorDecision {
    /// Produce another generation
    Continue,
    /// Stop the run
    Terminate,
}

impl MonitorDecision {
    /// Whether this decision ends the run
    pub fn is_terminal(self) -> bool {
        self == Self::Terminate
    }
}

/// Observer and controller of a run
pub trait Monitor<G: Genome> {
    /// Inspect the generation that was just produced.
    ///
    /// May update the run state (the generation counter and elite are the
    /// monitor's to maintain).
    fn observe(
        &mut self,
        state: &mut RunState<G>,
        population: &Population<G>,
    ) -> EvoResult<MonitorDecision>;
}

impl<G, F> Monitor<G> for F
where
    G: Genome,
    F: FnMut(&mut RunState<G>, &Population<G>) -> EvoResult<MonitorDecision>,
{
    fn observe(
        &mut self,
        state: &mut RunState<G>,
        population: &Population<G>,
    ) -> EvoResult<MonitorDecision> {
        self(state, population)
    }
}

/// Renders a genome for a log line
pub type GenomeWriter<G> = Box<dyn Fn(&G) -> String>;

/// Genome writer for any genome with a `Display` impl
pub fn display<G: std::fmt::Display>(genome: &G) -> String {
    genome.to_string()
}

pub mod prelude {
    pub use super::log_monitor::*;
    pub use super::{display, GenomeWriter, Monitor, MonitorDecision};
}
