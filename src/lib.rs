//! # elitist-ga
//!
//! A generic elitist generational genetic algorithm.
//!
//! The engine takes an initial population and a set of pluggable operators
//! (selection, crossover, mutation, fitness) and breeds one generation after
//! another, always carrying the best individual over unchanged. A monitor
//! observes every generation, maintains the run state, and decides when to
//! stop.
//!
//! ## Core Concepts
//!
//! - **Run state**: generation counter, elite and tunable parameters shared by
//!   every operator
//! - **Trait-per-role operators**: Gaussian rank selection, single-point
//!   crossover and per-gene mutation are the defaults
//! - **Monitor**: logs each generation and returns the terminal signal
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use elitist_ga::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let state = RunState::default()
//!     .with_mutation_rate(0.05)
//!     .with_max_generations(100);
//!
//! let ga = GenerationalGA::builder()
//!     .selection(GaussianRankSelection::new())
//!     .crossover(SinglePointCrossover::new())
//!     .mutation(PerGeneMutation::boolean())
//!     .fitness(OneMax::new())
//!     .build()?;
//!
//! let genomes = (0..50).map(|_| BitString::random(64, &mut rng)).collect();
//! let population = ga.evaluate_population(&state, genomes)?;
//! let mut monitor = LogMonitor::create("run.log", display::<BitString>)?;
//! let outcome = ga.run(&mut monitor, state, population, &mut rng)?;
//! ```

pub mod algorithms;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod monitor;
pub mod operators;
pub mod population;
pub mod state;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::monitor::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::state::*;
    pub use crate::termination::prelude::*;
}
