//! # Engine
//!
//! The [`Engine`] owns the population, the ordered operator list, and the
//! generation loop. Each generation applies every registered operator, in
//! registration order, to the population in place; operators observe the
//! output of the previous operator in the same generation. No operator is
//! ever skipped or reordered at run time.
//!
//! A run is one logical unit of background work: [`Engine::start`] moves the
//! engine onto a worker thread and hands back an [`EngineHandle`] the caller
//! can cancel and join. Interruption takes effect between generations (a
//! generation in flight completes first), so the population is always left
//! fully valid, and the outcome reports how far the run got.
//!
//! ## Example
//!
//! See the crate-level documentation for a complete pipeline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::error::{EvoError, Result};
use crate::operators::Operator;
use crate::population::Population;
use crate::problem::Problem;
use crate::rng::{RandomSource, SharedRandom};

/// How a run ended.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// All generations were executed.
    Completed,
    /// The run was cancelled; `generation` is the first generation that did
    /// not run.
    Interrupted {
        /// Index of the first generation skipped due to cancellation.
        generation: usize,
    },
}

/// The evolutionary engine: population, operator pipeline, generation count.
pub struct Engine<P: Problem> {
    problem: Arc<P>,
    population: Population<P::Genome>,
    operators: Vec<Box<dyn Operator<P::Genome>>>,
    num_generations: usize,
    rng: SharedRandom,
    cancel: Arc<AtomicBool>,
}

impl<P: Problem> Engine<P> {
    /// Creates an engine and its initial population of `population_size`
    /// random individuals drawn from the problem's factory.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidParameter`] if `population_size` or
    /// `num_generations` is zero.
    pub fn new(
        problem: Arc<P>,
        population_size: usize,
        num_generations: usize,
        rng: SharedRandom,
    ) -> Result<Self> {
        if population_size == 0 {
            return Err(EvoError::InvalidParameter(
                "population size must be at least 1".to_string(),
            ));
        }
        if num_generations == 0 {
            return Err(EvoError::InvalidParameter(
                "generation count must be at least 1".to_string(),
            ));
        }

        let population = Population::from_individuals(
            (0..population_size)
                .map(|_| problem.create_random_individual())
                .collect(),
        );

        Ok(Self {
            problem,
            population,
            operators: Vec::new(),
            num_generations,
            rng,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Appends an operator to the pipeline. Operators are applied in the
    /// order they were added, so add them in the order you want them run.
    pub fn add_operator(&mut self, operator: impl Operator<P::Genome> + 'static) {
        self.operators.push(Box::new(operator));
    }

    /// Borrows the current population.
    pub fn population(&self) -> &Population<P::Genome> {
        &self.population
    }

    /// Number of generations this engine will run.
    pub fn num_generations(&self) -> usize {
        self.num_generations
    }

    /// Produces the run manifest: problem description, one line per operator
    /// description, population size, generation count, and the PRNG seed in
    /// effect: everything needed to reproduce the run.
    pub fn tableau(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Problem: {}\n", self.problem.describe()));
        s.push_str("Operators:\n");
        for op in &self.operators {
            s.push_str(&format!("\t{}\n", op.describe()));
        }
        s.push_str(&format!("Population size: {}\n", self.population.len()));
        s.push_str(&format!("Generations: {}\n", self.num_generations));
        s.push_str(&format!("PRNG seed: {}\n", self.rng.seed()));
        s
    }

    /// Runs every generation on the calling thread.
    ///
    /// Returns [`RunOutcome::Interrupted`] if the engine's cancellation flag
    /// was raised (see [`EngineHandle::cancel`]); the check happens between
    /// generations, so a generation either fully applies its operator
    /// sequence or does not start.
    ///
    /// # Errors
    ///
    /// The first operator error aborts the run and is returned as-is;
    /// evaluation failures are therefore distinguishable from interruption.
    pub fn run_to_completion(&mut self) -> Result<RunOutcome> {
        tracing::info!(
            target: "evokit::engine",
            population = self.population.len(),
            generations = self.num_generations,
            operators = self.operators.len(),
            seed = self.rng.seed(),
            "starting run"
        );

        for generation in 0..self.num_generations {
            if self.cancel.load(Ordering::SeqCst) {
                tracing::warn!(
                    target: "evokit::engine",
                    generation,
                    "run interrupted"
                );
                return Ok(RunOutcome::Interrupted { generation });
            }

            tracing::trace!(target: "evokit::engine", generation, "applying operator pipeline");
            for operator in self.operators.iter_mut() {
                operator.operate(&mut self.population)?;
            }
        }

        tracing::info!(target: "evokit::engine", "run completed");
        Ok(RunOutcome::Completed)
    }
}

impl<P: Problem + 'static> Engine<P> {
    /// Starts the run as background work and returns a handle to it.
    pub fn start(self) -> EngineHandle<P> {
        let cancel = Arc::clone(&self.cancel);
        let thread = std::thread::spawn(move || {
            let mut engine = self;
            let outcome = engine.run_to_completion();
            (engine, outcome)
        });
        EngineHandle { cancel, thread }
    }
}

/// A running engine: join it, or ask it to stop.
pub struct EngineHandle<P: Problem> {
    cancel: Arc<AtomicBool>,
    thread: JoinHandle<(Engine<P>, Result<RunOutcome>)>,
}

impl<P: Problem> EngineHandle<P> {
    /// Requests interruption. The run stops before the next generation
    /// starts; the generation in flight, if any, completes first.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once the worker thread has finished.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Blocks until the run finishes and returns the engine along with how
    /// the run ended, so the caller can inspect the final population.
    ///
    /// # Errors
    ///
    /// Returns the operator error that aborted the run, or
    /// [`EvoError::Engine`] if the worker thread panicked.
    pub fn join(self) -> Result<(Engine<P>, RunOutcome)> {
        match self.thread.join() {
            Ok((engine, Ok(outcome))) => Ok((engine, outcome)),
            Ok((_, Err(e))) => Err(e),
            Err(_) => Err(EvoError::Engine(
                "engine worker thread panicked".to_string(),
            )),
        }
    }
}
