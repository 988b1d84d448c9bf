//! Run statistics and best-ever tracking.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{EvoError, Result};
use crate::genome::Genome;
use crate::individual::Individual;
use crate::operators::Operator;
use crate::population::Population;

/// One statistics record, emitted per generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StatsRecord {
    /// Generation index, counting from zero across the whole run.
    pub generation: usize,
    /// Minimum fitness in the population at observation time.
    pub min: f64,
    /// Maximum fitness in the population at observation time.
    pub max: f64,
    /// Mean fitness in the population at observation time.
    pub mean: f64,
    /// Fraction of distinct genomes, if the observing operator tracks it.
    pub diversity: Option<f64>,
    /// Best fitness seen at any point during the run so far.
    pub best_ever: f64,
}

impl StatsRecord {
    /// Renders the record as a tab-delimited report line, each numeric field
    /// with `decimal_places` fraction digits.
    pub fn render(&self, decimal_places: usize) -> String {
        let mut line = format!(
            "Gen: {}\t{:.p$}\t{:.p$}\t{:.p$}",
            self.generation,
            self.min,
            self.max,
            self.mean,
            p = decimal_places
        );
        if let Some(diversity) = self.diversity {
            line.push_str(&format!("\t{:.p$}", diversity, p = decimal_places));
        }
        line.push_str(&format!("\t{:.p$}", self.best_ever, p = decimal_places));
        line
    }
}

/// State a statistics operator retains across the whole run: the best-ever
/// individual and fitness, the generation counter, and the records emitted
/// so far. Shared between the operator (which lives inside the engine) and
/// any [`StatsHandle`]s the caller kept.
#[derive(Debug)]
pub(crate) struct StatsState<G: Genome> {
    best_ever_fitness: f64,
    best_ever: Option<Individual<G>>,
    generation: usize,
    records: Vec<StatsRecord>,
}

impl<G: Genome> StatsState<G> {
    pub(crate) fn new() -> Self {
        Self {
            best_ever_fitness: f64::NEG_INFINITY,
            best_ever: None,
            generation: 0,
            records: Vec::new(),
        }
    }

    pub(crate) fn best_ever(&self) -> Option<&Individual<G>> {
        self.best_ever.as_ref()
    }

    /// Scans the population, updates the best-ever bookkeeping, and appends
    /// one record. Only a strictly greater fitness replaces the incumbent
    /// best-ever, so ties keep the earlier individual.
    pub(crate) fn observe(
        &mut self,
        population: &Population<G>,
        diversity: Option<f64>,
    ) -> Result<StatsRecord> {
        if population.is_empty() {
            return Err(EvoError::EmptyPopulation);
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;

        for individual in population.iter() {
            let f = individual.fitness();
            if f < min {
                min = f;
            }
            if f > max {
                max = f;
            }
            if f > self.best_ever_fitness {
                self.best_ever_fitness = f;
                self.best_ever = Some(individual.clone());
            }
            sum += f;
        }

        let record = StatsRecord {
            generation: self.generation,
            min,
            max,
            mean: sum / population.len() as f64,
            diversity,
            best_ever: self.best_ever_fitness,
        };
        self.records.push(record.clone());
        self.generation += 1;

        Ok(record)
    }
}

/// A cloneable read handle onto a statistics operator's run-long state.
///
/// The operator itself is moved into the engine when registered; the handle
/// is how the caller reads the best-ever individual and the per-generation
/// records afterwards (or while the run is still going).
#[derive(Debug, Clone)]
pub struct StatsHandle<G: Genome> {
    state: Arc<Mutex<StatsState<G>>>,
}

impl<G: Genome> StatsHandle<G> {
    pub(crate) fn new(state: Arc<Mutex<StatsState<G>>>) -> Self {
        Self { state }
    }

    fn lock(&self) -> MutexGuard<'_, StatsState<G>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Best fitness seen so far, `f64::NEG_INFINITY` before any observation.
    pub fn best_ever_fitness(&self) -> f64 {
        self.lock().best_ever_fitness
    }

    /// Deep copy of the best individual seen so far, if any.
    pub fn best_ever_individual(&self) -> Option<Individual<G>> {
        self.lock().best_ever.clone()
    }

    /// All records emitted so far, one per observed generation.
    pub fn records(&self) -> Vec<StatsRecord> {
        self.lock().records.clone()
    }

    /// The most recent record, if any generation has been observed.
    pub fn last_record(&self) -> Option<StatsRecord> {
        self.lock().records.last().cloned()
    }
}

/// Standard population statistics: min, max, and mean fitness plus best-ever
/// tracking, one report line per generation.
///
/// Do not reuse an instance across runs; best-ever state spans the life of
/// the operator. Keep a [`StatsHandle`] (via [`StandardStats::handle`])
/// before registering the operator to read results after the run.
pub struct StandardStats<G: Genome> {
    decimal_places: usize,
    state: Arc<Mutex<StatsState<G>>>,
}

impl<G: Genome> StandardStats<G> {
    /// Default number of fraction digits in report lines.
    pub const DEFAULT_DECIMAL_PLACES: usize = 4;

    /// Creates the operator with the default report precision.
    pub fn new() -> Self {
        Self::with_precision(Self::DEFAULT_DECIMAL_PLACES)
    }

    /// Creates the operator rendering `decimal_places` fraction digits.
    pub fn with_precision(decimal_places: usize) -> Self {
        Self {
            decimal_places,
            state: Arc::new(Mutex::new(StatsState::new())),
        }
    }

    /// Returns a read handle onto the operator's run-long state.
    pub fn handle(&self) -> StatsHandle<G> {
        StatsHandle::new(Arc::clone(&self.state))
    }
}

impl<G: Genome> Default for StandardStats<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Genome> Operator<G> for StandardStats<G> {
    fn operate(&mut self, population: &mut Population<G>) -> Result<()> {
        let record = self
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .observe(population, None)?;
        tracing::info!(target: "evokit::stats", "{}", record.render(self.decimal_places));
        Ok(())
    }

    fn describe(&self) -> String {
        "StandardStats".to_string()
    }
}
