//! # evokit
//!
//! A pipeline-based evolutionary optimization engine. An [`Engine`](engine::Engine)
//! evolves a fixed-size population of candidate solutions over a bounded
//! number of generations by applying a configurable, ordered sequence of
//! [`Operator`](operators::Operator)s (crossover, mutation, evaluation,
//! selection, statistics) once per generation, in registration order.
//!
//! The engine is maximization-only: higher fitness is always better, and
//! problems that want minimization negate their objective. The optimization
//! problem itself lives behind the [`Problem`](problem::Problem) trait;
//! everything else ships with the crate: three genome encodings, the genetic
//! operator kit, tournament selection, sequential and fork-join parallel
//! evaluation, and diversity-triggered re-seeding.
//!
//! Runs are reproducible by construction: all randomness flows through one
//! shared, seeded stream (see [`rng`]), and the engine's
//! [`tableau`](engine::Engine::tableau) records everything needed to replay a
//! run, including the seed.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use evokit::engine::{Engine, RunOutcome};
//! use evokit::error::Result;
//! use evokit::genome::IntGenome;
//! use evokit::individual::Individual;
//! use evokit::operators::{
//!     ElitistTournamentSelection, Evaluate, PointCrossover, PointMutation, StandardStats,
//! };
//! use evokit::problem::Problem;
//! use evokit::rng::{Prng, SharedRandom};
//!
//! /// Maximize the number of ones in an 8-gene genome over {0, 1}.
//! struct OneMax {
//!     rng: SharedRandom,
//! }
//!
//! impl Problem for OneMax {
//!     type Genome = IntGenome;
//!
//!     fn create_random_individual(&self) -> Individual<IntGenome> {
//!         let genome = IntGenome::random(8, 0, 1, self.rng.as_ref())
//!             .expect("valid gene domain");
//!         Individual::new(genome)
//!     }
//!
//!     fn evaluate(&self, individual: &mut Individual<IntGenome>) -> Result<()> {
//!         let ones: i64 = (0..8).map(|i| individual.genome().gene(i)).sum();
//!         individual.set_fitness(ones as f64);
//!         Ok(())
//!     }
//!
//!     fn describe(&self) -> String {
//!         "one-max over 8 binary integer genes".to_string()
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let rng: SharedRandom = Arc::new(Prng::with_seed(1209432115));
//!     let problem = Arc::new(OneMax {
//!         rng: Arc::clone(&rng),
//!     });
//!
//!     let mut engine = Engine::new(Arc::clone(&problem), 30, 20, Arc::clone(&rng))?;
//!     engine.add_operator(PointCrossover::new(0.6, Arc::clone(&rng))?);
//!     engine.add_operator(PointMutation::new(0.02, Arc::clone(&rng))?);
//!     engine.add_operator(Evaluate::new(Arc::clone(&problem)));
//!     engine.add_operator(ElitistTournamentSelection::new(2, Arc::clone(&rng))?);
//!
//!     let stats = StandardStats::new();
//!     let tracker = stats.handle();
//!     engine.add_operator(stats);
//!
//!     println!("{}", engine.tableau());
//!
//!     let handle = engine.start();
//!     let (_engine, outcome) = handle.join()?;
//!
//!     assert_eq!(outcome, RunOutcome::Completed);
//!     let best = tracker.best_ever_individual().expect("stats observed every generation");
//!     assert!(best.fitness() <= 8.0);
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod genome;
pub mod individual;
pub mod operators;
pub mod population;
pub mod problem;
pub mod rng;

// Re-export commonly used types for convenience
pub use error::{EvoError, Result};
