//! Diversity tracking and threshold-triggered re-seeding.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{EvoError, Result};
use crate::genome::Genome;
use crate::operators::crossover::check_probability;
use crate::operators::stats::{StatsHandle, StatsState};
use crate::operators::Operator;
use crate::population::Population;
use crate::problem::Problem;

/// When re-seeding injects fresh random individuals, who evaluates them.
///
/// The two variants encode a pipeline-ordering choice, not a behavioral
/// ambiguity: either the replacements carry real fitness before the
/// generation's selection step runs, or the pipeline must place an
/// evaluation operator after this one.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReseedEvaluation {
    /// Evaluate each fresh individual as it is injected (the default). The
    /// population leaves this operator with every fitness populated.
    Immediate,
    /// Leave fresh individuals at the unevaluated sentinel for a later
    /// evaluation operator in the pipeline.
    Deferred,
}

/// Population statistics plus diversity measurement and re-seeding.
///
/// Diversity is the fraction of distinct genomes in the population, in
/// `(0, 1]`: 1 when all N genomes pairwise differ, 1/N when all are
/// identical. Distinctness uses genome ordering only; fitness plays no part.
///
/// When diversity falls below the configured threshold, the population is
/// re-seeded: the first `floor(keep_fraction * N)` slots become deep copies
/// of the best-ever individual (or of one fresh random individual with
/// fitness pinned to `f64::MIN`, if no best-ever has been recorded yet), and
/// the remaining slots are filled with new random individuals from the
/// problem. Diversity is then recomputed for reporting, and the usual
/// min/max/mean/best-ever scan runs over the re-seeded population.
///
/// Do not reuse an instance across runs; best-ever state spans the life of
/// the operator.
pub struct DiversityThresholdStats<P: Problem> {
    decimal_places: usize,
    threshold: f64,
    keep_fraction: f64,
    reseed_evaluation: ReseedEvaluation,
    problem: Arc<P>,
    state: Arc<Mutex<StatsState<P::Genome>>>,
}

impl<P: Problem> DiversityThresholdStats<P> {
    /// Creates the operator.
    ///
    /// `decimal_places` is the report-line precision; `threshold` is the
    /// diversity below which the population is re-seeded; `keep_fraction` is
    /// the fraction of slots given to copies of the best-ever individual
    /// when that happens.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidParameter`](crate::error::EvoError) if
    /// `threshold` or `keep_fraction` is outside `[0, 1]`.
    pub fn new(
        decimal_places: usize,
        threshold: f64,
        keep_fraction: f64,
        problem: Arc<P>,
    ) -> Result<Self> {
        check_probability(threshold, "threshold")?;
        check_probability(keep_fraction, "keep_fraction")?;
        Ok(Self {
            decimal_places,
            threshold,
            keep_fraction,
            reseed_evaluation: ReseedEvaluation::Immediate,
            problem,
            state: Arc::new(Mutex::new(StatsState::new())),
        })
    }

    /// Chooses who evaluates re-seeded individuals. The default is
    /// [`ReseedEvaluation::Immediate`].
    pub fn with_reseed_evaluation(mut self, reseed_evaluation: ReseedEvaluation) -> Self {
        self.reseed_evaluation = reseed_evaluation;
        self
    }

    /// Returns a read handle onto the operator's run-long state.
    pub fn handle(&self) -> StatsHandle<P::Genome> {
        StatsHandle::new(Arc::clone(&self.state))
    }

    fn lock(&self) -> MutexGuard<'_, StatsState<P::Genome>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn reseed(&self, population: &mut Population<P::Genome>) -> Result<()> {
        let n = population.len();
        let keep = (self.keep_fraction * n as f64) as usize;

        let template = match self.lock().best_ever() {
            Some(best) => best.clone(),
            None => {
                let mut stand_in = self.problem.create_random_individual();
                stand_in.set_fitness(f64::MIN);
                stand_in
            }
        };

        for slot in 0..keep {
            population[slot] = template.clone();
        }
        for slot in keep..n {
            let mut fresh = self.problem.create_random_individual();
            if self.reseed_evaluation == ReseedEvaluation::Immediate {
                self.problem.evaluate(&mut fresh)?;
            }
            population[slot] = fresh;
        }

        Ok(())
    }
}

/// Fraction of distinct genomes in the population.
fn measure_diversity<G: Genome>(population: &Population<G>) -> f64 {
    let distinct: BTreeSet<&G> = population.iter().map(|ind| ind.genome()).collect();
    distinct.len() as f64 / population.len() as f64
}

impl<P: Problem> Operator<P::Genome> for DiversityThresholdStats<P> {
    fn operate(&mut self, population: &mut Population<P::Genome>) -> Result<()> {
        if population.is_empty() {
            return Err(EvoError::EmptyPopulation);
        }

        let mut diversity = measure_diversity(population);
        if diversity < self.threshold {
            tracing::debug!(
                target: "evokit::stats",
                diversity,
                threshold = self.threshold,
                "diversity collapsed, re-seeding population"
            );
            self.reseed(population)?;
            diversity = measure_diversity(population);
        }

        let record = self.lock().observe(population, Some(diversity))?;
        tracing::info!(target: "evokit::stats", "{}", record.render(self.decimal_places));
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "DiversityThresholdStats, threshold = {}, keep_fraction = {}",
            self.threshold, self.keep_fraction
        )
    }
}
