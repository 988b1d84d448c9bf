//! # Operators
//!
//! An operator is a pure in-place transformation applied to the population
//! once per generation. The engine applies its registered operators in
//! registration order; a typical pipeline is crossover, mutation, evaluation,
//! selection, statistics.
//!
//! Stock operators, one file each:
//!
//! - [`PointCrossover`]: probabilistic single-point tail exchange,
//! - [`PointMutation`]: probabilistic single-locus resampling,
//! - [`TournamentSelection`] / [`ElitistTournamentSelection`],
//! - [`Evaluate`] / [`ParallelEvaluate`],
//! - [`StandardStats`] / [`DiversityThresholdStats`].

pub mod crossover;
pub mod diversity;
pub mod elitist;
pub mod evaluate;
pub mod mutation;
pub mod stats;
pub mod tournament;

pub use crossover::PointCrossover;
pub use diversity::{DiversityThresholdStats, ReseedEvaluation};
pub use elitist::ElitistTournamentSelection;
pub use evaluate::{Evaluate, ParallelEvaluate};
pub use mutation::PointMutation;
pub use stats::{StandardStats, StatsHandle, StatsRecord};
pub use tournament::TournamentSelection;

use crate::error::Result;
use crate::genome::Genome;
use crate::population::Population;

/// An operation performed on the population each generation.
///
/// Operators are parameterized over the genome encoding they understand, so
/// registering a bit-genome operator on an integer-genome engine is a type
/// error rather than a runtime cast failure.
pub trait Operator<G: Genome>: Send {
    /// Transforms the population in place. On error the generation is
    /// considered aborted; implementations must leave the population fully
    /// valid or not return at all.
    fn operate(&mut self, population: &mut Population<G>) -> Result<()>;

    /// One-line human-readable description (the operator's name and its
    /// parameters), used in the run manifest.
    fn describe(&self) -> String;
}
