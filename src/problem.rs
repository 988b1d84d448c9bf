//! # Problem
//!
//! The engine is problem-agnostic: the optimization problem itself lives
//! behind the [`Problem`] trait, consumed only by the engine (to build the
//! initial population), by the evaluation operators, and by the diversity
//! operator when it re-seeds collapsed populations.

use crate::error::Result;
use crate::genome::Genome;
use crate::individual::Individual;

/// An optimization problem the engine can run against.
///
/// Implementors choose a genome encoding, know how to create random
/// candidate solutions, and know how to score one. The engine maximizes
/// fitness; a problem that wants minimization negates its objective.
///
/// A problem typically holds a clone of the run's shared
/// [`SharedRandom`](crate::rng::SharedRandom) handle for use inside
/// [`create_random_individual`](Problem::create_random_individual). A problem
/// that wants per-evaluation noise must use its own separately seeded
/// generator instead, so the shared stream is never drawn from concurrently
/// during parallel evaluation.
pub trait Problem: Send + Sync {
    /// The genome encoding this problem's candidate solutions use. Every
    /// operator registered with the engine is typed against the same
    /// encoding, so a mismatched pipeline fails to compile.
    type Genome: Genome;

    /// Creates a random individual representing a potential solution. The
    /// genome must match what the registered operators expect: same length,
    /// same gene domain.
    fn create_random_individual(&self) -> Individual<Self::Genome>;

    /// Scores `individual` and stores the result via
    /// [`Individual::set_fitness`]. Must not mutate the genome.
    ///
    /// # Errors
    ///
    /// Any error aborts the run; the engine neither retries nor swallows
    /// evaluation failures.
    fn evaluate(&self, individual: &mut Individual<Self::Genome>) -> Result<()>;

    /// One-line human-readable description, used in the run manifest.
    fn describe(&self) -> String;
}
