//! Logging monitor
//!
//! Writes one tab-separated line per generation to an owned sink and stops the
//! run when a termination criterion fires.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{EvoResult, EvolutionError};
use crate::genome::traits::Genome;
use crate::monitor::{GenomeWriter, Monitor, MonitorDecision};
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::state::RunState;
use crate::termination::{ConfiguredThresholds, TerminationCriterion};

/// Monitor that logs the elite of every generation
///
/// Each line holds the generation number, the elite's fitness, an optional
/// problem-specific metric, and the rendered elite genome, separated by tabs.
/// The sink is flushed after every line and released exactly once: when the
/// run terminates, or when the monitor is dropped after an aborted run.
pub struct LogMonitor<W: Write, G: Genome> {
    sink: Option<W>,
    genome_writer: GenomeWriter<G>,
    metric: Option<Box<dyn Fn(&G) -> f64>>,
    termination: Box<dyn TerminationCriterion<G>>,
    termination_reason: Option<&'static str>,
}

impl<G: Genome> LogMonitor<BufWriter<File>, G> {
    /// Create (or truncate) a log file and monitor into it
    pub fn create<P, F>(path: P, genome_writer: F) -> EvoResult<Self>
    where
        P: AsRef<Path>,
        F: Fn(&G) -> String + 'static,
    {
        let file = File::create(path.as_ref())?;
        debug!("Opened run log {}", path.as_ref().display());
        Ok(Self::new(BufWriter::new(file), genome_writer))
    }
}

impl<W: Write, G: Genome> LogMonitor<W, G> {
    /// Monitor into an already open sink
    pub fn new<F>(sink: W, genome_writer: F) -> Self
    where
        F: Fn(&G) -> String + 'static,
    {
        Self {
            sink: Some(sink),
            genome_writer: Box::new(genome_writer),
            metric: None,
            termination: Box::new(ConfiguredThresholds),
            termination_reason: None,
        }
    }

    /// Add a metric column (e.g. total weight) between fitness and genome
    pub fn with_metric<F>(mut self, metric: F) -> Self
    where
        F: Fn(&G) -> f64 + 'static,
    {
        self.metric = Some(Box::new(metric));
        self
    }

    /// Replace the default stop rule
    pub fn with_termination<T>(mut self, criterion: T) -> Self
    where
        T: TerminationCriterion<G> + 'static,
    {
        self.termination = Box::new(criterion);
        self
    }

    /// Whether the sink has been released
    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    /// Give back the sink if it has not been released yet
    pub fn into_sink(mut self) -> Option<W> {
        self.sink.take()
    }

    /// Why the run stopped, once it has
    pub fn termination_reason(&self) -> Option<&'static str> {
        self.termination_reason
    }

    fn format_line(&self, generation: usize, elite: &Individual<G>) -> String {
        let mut fields = vec![generation.to_string(), elite.fitness().to_string()];
        if let Some(metric) = &self.metric {
            fields.push(metric(elite.genome()).to_string());
        }
        fields.push((self.genome_writer)(elite.genome()));
        fields.join("\t")
    }

    fn close(&mut self) -> EvoResult<()> {
        if let Some(mut sink) = self.sink.take() {
            sink.flush()?;
            debug!("Run log closed");
        }
        Ok(())
    }
}

impl<W: Write, G: Genome> Monitor<G> for LogMonitor<W, G> {
    fn observe(
        &mut self,
        state: &mut RunState<G>,
        population: &Population<G>,
    ) -> EvoResult<MonitorDecision> {
        if self.sink.is_none() {
            return Err(EvolutionError::MonitorClosed);
        }

        state.elite = Some(population.elite().clone());
        let generation = state.advance_generation();
        let elite = population.elite();
        let line = self.format_line(generation, elite);

        if let Some(sink) = self.sink.as_mut() {
            writeln!(sink, "{}", line)?;
            sink.flush()?;
        }
        info!(
            "generation {}: elite fitness {} (mean {:.3})",
            generation,
            elite.fitness(),
            population.mean_fitness()
        );

        if self.termination.should_terminate(state) {
            let reason = self.termination.reason();
            self.termination_reason = Some(reason);
            info!("Stopping after generation {}: {}", generation, reason);
            self.close()?;
            return Ok(MonitorDecision::Terminate);
        }
        Ok(MonitorDecision::Continue)
    }
}

impl<W: Write, G: Genome> Drop for LogMonitor<W, G> {
    fn drop(&mut self) {
        if let Some(mut sink) = self.sink.take() {
            if let Err(e) = sink.flush() {
                warn!("Failed to flush run log on drop: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::bit_string::BitString;
    use crate::monitor::display;

    fn population(fitnesses: &[f64]) -> Population<BitString> {
        Population::new(
            fitnesses
                .iter()
                .enumerate()
                .map(|(i, &f)| Individual::new(BitString::new(vec![i % 2 == 0, true]), f))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_writes_one_line_per_generation() {
        let mut buffer: Vec<u8> = Vec::new();
        {
            let mut monitor = LogMonitor::new(&mut buffer, display::<BitString>);
            let mut state = RunState::default().with_max_generations(10);
            state.ensure_generation();

            let pop = population(&[1.0, 3.0]);
            assert_eq!(
                monitor.observe(&mut state, &pop).unwrap(),
                MonitorDecision::Continue
            );
            assert_eq!(
                monitor.observe(&mut state, &pop).unwrap(),
                MonitorDecision::Continue
            );
            assert_eq!(state.generation(), 2);
            assert_eq!(state.elite.as_ref().map(|e| e.fitness()), Some(3.0));
        }

        let log = String::from_utf8(buffer).unwrap();
        assert_eq!(log, "1\t3\t01\n2\t3\t01\n");
    }

    #[test]
    fn test_metric_column() {
        let mut buffer: Vec<u8> = Vec::new();
        {
            let mut monitor = LogMonitor::new(&mut buffer, display::<BitString>)
                .with_metric(|g: &BitString| g.count_ones() as f64 * 1.5);
            let mut state = RunState::default().with_max_generations(1);
            monitor.observe(&mut state, &population(&[2.5])).unwrap();
        }

        let log = String::from_utf8(buffer).unwrap();
        assert_eq!(log, "1\t2.5\t3\t11\n");
    }

    #[test]
    fn test_terminates_at_max_generations_and_closes() {
        let mut buffer: Vec<u8> = Vec::new();
        let mut monitor = LogMonitor::new(&mut buffer, display::<BitString>);
        let mut state = RunState::default().with_max_generations(2);
        let pop = population(&[0.0]);

        assert_eq!(
            monitor.observe(&mut state, &pop).unwrap(),
            MonitorDecision::Continue
        );
        assert!(!monitor.is_closed());
        assert_eq!(
            monitor.observe(&mut state, &pop).unwrap(),
            MonitorDecision::Terminate
        );
        assert!(monitor.is_closed());
        assert_eq!(
            monitor.termination_reason(),
            Some("Generation limit or goal fitness reached")
        );

        // No writes after release
        let again = monitor.observe(&mut state, &pop);
        assert!(matches!(again, Err(EvolutionError::MonitorClosed)));
        assert_eq!(state.generation(), 2);
    }

    #[test]
    fn test_terminates_at_goal_fitness() {
        let mut buffer: Vec<u8> = Vec::new();
        let mut monitor = LogMonitor::new(&mut buffer, display::<BitString>);
        let mut state = RunState::default().with_goal_fitness(5.0);

        assert_eq!(
            monitor.observe(&mut state, &population(&[4.9])).unwrap(),
            MonitorDecision::Continue
        );
        assert_eq!(
            monitor.observe(&mut state, &population(&[5.0])).unwrap(),
            MonitorDecision::Terminate
        );
    }

    #[test]
    fn test_custom_termination() {
        struct Never;
        impl TerminationCriterion<BitString> for Never {
            fn should_terminate(&self, _state: &RunState<BitString>) -> bool {
                false
            }
            fn reason(&self) -> &'static str {
                "never"
            }
        }

        let mut monitor =
            LogMonitor::new(std::io::sink(), display::<BitString>).with_termination(Never);
        let mut state = RunState::default().with_max_generations(1);
        assert_eq!(
            monitor.observe(&mut state, &population(&[1.0])).unwrap(),
            MonitorDecision::Continue
        );
    }

    #[test]
    fn test_create_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");

        let mut monitor = LogMonitor::create(&path, display::<BitString>).unwrap();
        let mut state = RunState::default().with_max_generations(1);
        let decision = monitor.observe(&mut state, &population(&[7.0])).unwrap();
        assert!(decision.is_terminal());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "1\t7\t11\n");
    }

    #[test]
    fn test_sink_flushed_when_dropped_early() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aborted.log");
        {
            let mut monitor = LogMonitor::create(&path, display::<BitString>).unwrap();
            let mut state = RunState::default().with_max_generations(100);
            monitor.observe(&mut state, &population(&[1.0])).unwrap();
            // Dropped here without a terminal signal
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "1\t1\t11\n");
    }

    #[test]
    fn test_into_sink() {
        let mut monitor = LogMonitor::new(Vec::new(), display::<BitString>);
        let mut state = RunState::default().with_max_generations(3);
        monitor.observe(&mut state, &population(&[4.0])).unwrap();

        let sink = monitor.into_sink().unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "1\t4\t11\n");
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_errors_propagate() {
        let mut monitor = LogMonitor::new(FailingSink, display::<BitString>);
        let mut state = RunState::default().with_max_generations(5);
        let result = monitor.observe(&mut state, &population(&[1.0]));
        assert!(matches!(result, Err(EvolutionError::Io(_))));
    }
}
