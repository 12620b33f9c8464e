//! Knapsack runner
//!
//! Generates a random 0/1 knapsack instance, evolves packings with the
//! elitist generational GA and writes one log line per generation:
//! generation, elite value, elite weight, elite packing.

use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use elitist_ga::prelude::*;

const DEFAULT_GENERATIONS: usize = 1000;
const DEFAULT_MUTATION_RATE: f64 = 0.05;

#[derive(Parser)]
#[command(name = "knapsack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of items in the random instance
    #[arg(long, default_value_t = 1000)]
    items: usize,

    /// Standard deviation of item weights
    #[arg(long, default_value_t = 10.0)]
    weight_sigma: f64,

    /// Standard deviation of item values
    #[arg(long, default_value_t = 100.0)]
    value_sigma: f64,

    /// Maximum total weight
    #[arg(long, default_value_t = 1000.0)]
    capacity: f64,

    /// Population size
    #[arg(short, long, default_value_t = 100)]
    population: usize,

    /// Per-gene mutation probability, 0.05 unless the config file sets one
    #[arg(short, long)]
    mutation_rate: Option<f64>,

    /// Stop after this many generations
    #[arg(short, long)]
    generations: Option<usize>,

    /// Stop once the best packing is worth at least this much
    #[arg(long)]
    goal: Option<f64>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log file, truncated at start
    #[arg(short, long, value_name = "FILE", default_value = "knapsack.log")]
    output: PathBuf,

    /// JSON file with run parameters; flags take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn parameters(&self) -> EvoResult<RunParameters> {
        let mut parameters = match &self.config {
            Some(path) => RunParameters::from_json_file(path)?,
            None => RunParameters::default(),
        };

        if let Some(rate) = self.mutation_rate {
            parameters.mutation_rate = Some(rate);
        }
        parameters.mutation_rate.get_or_insert(DEFAULT_MUTATION_RATE);

        if let Some(generations) = self.generations {
            parameters.max_generations = Some(generations);
        }
        if let Some(goal) = self.goal {
            parameters.goal_fitness = Some(goal);
        }
        if parameters.max_generations.is_none() && parameters.goal_fitness.is_none() {
            parameters.max_generations = Some(DEFAULT_GENERATIONS);
        }
        Ok(parameters)
    }
}

fn main() -> EvoResult<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let knapsack = Knapsack::random(
        cli.items,
        cli.weight_sigma,
        cli.value_sigma,
        cli.capacity,
        &mut rng,
    )?;
    let state = RunState::new(cli.parameters()?);
    info!(
        "Knapsack with {} items, capacity {}; parameters {:?}",
        knapsack.len(),
        knapsack.capacity(),
        state.parameters
    );

    let scale = knapsack.clone();
    let ga = GenerationalGA::builder()
        .selection(GaussianRankSelection::new())
        .crossover(SinglePointCrossover::new())
        .mutation(PerGeneMutation::boolean())
        .fitness(knapsack)
        .build()?;

    let genomes = (0..cli.population)
        .map(|_| scale.sparse_genome(&mut rng))
        .collect();
    let population = ga.evaluate_population(&state, genomes)?;

    let weights = scale.clone();
    let mut monitor = LogMonitor::create(&cli.output, display::<BitString>)?
        .with_metric(move |genome: &BitString| weights.total_weight(genome));

    let outcome = ga.run(&mut monitor, state, population, &mut rng)?;
    let elite = outcome.elite();
    println!(
        "generation {}: value {}, weight {} / {}, {} items packed",
        outcome.generations(),
        elite.fitness(),
        scale.total_weight(elite.genome()),
        scale.capacity(),
        elite.genome().count_ones()
    );
    Ok(())
}
