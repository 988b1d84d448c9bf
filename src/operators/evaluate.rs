//! Fitness evaluation, sequential and parallel.

use std::sync::Arc;

use crate::error::{EvoError, Result};
use crate::individual::Individual;
use crate::operators::Operator;
use crate::population::Population;
use crate::problem::Problem;

/// Sequential fitness evaluation.
///
/// Invokes the problem's fitness function for every individual in population
/// order. The problem computes and stores each individual's fitness; any
/// evaluation error propagates and aborts the run.
pub struct Evaluate<P: Problem> {
    problem: Arc<P>,
}

impl<P: Problem> Evaluate<P> {
    /// Creates the operator around the given problem.
    pub fn new(problem: Arc<P>) -> Self {
        Self { problem }
    }
}

impl<P: Problem> Operator<P::Genome> for Evaluate<P> {
    fn operate(&mut self, population: &mut Population<P::Genome>) -> Result<()> {
        for individual in population.iter_mut() {
            self.problem.evaluate(individual)?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("Evaluate, using problem: {}", self.problem.describe())
    }
}

/// Parallel fitness evaluation via recursive fork-join.
///
/// The population's index range is split at its midpoint until a sub-range's
/// size falls below the split threshold; that sub-range is then evaluated
/// sequentially. The two halves of every split run concurrently on rayon's
/// worker pool, and the operator returns only after both halves complete: a
/// structured join, never fire-and-forget.
///
/// Concurrent workers share nothing but disjoint windows of the population
/// slice, so no locking is involved. Correctness requires the problem's
/// fitness function to touch only the individual it is handed; for any
/// deterministic problem the assigned fitness is identical to
/// [`Evaluate`]'s, independent of the threshold.
pub struct ParallelEvaluate<P: Problem> {
    problem: Arc<P>,
    threshold: usize,
}

impl<P: Problem> ParallelEvaluate<P> {
    /// Default split threshold: sub-ranges smaller than this are evaluated
    /// sequentially.
    pub const DEFAULT_THRESHOLD: usize = 10;

    /// Creates the operator with the default split threshold
    /// [`DEFAULT_THRESHOLD`](Self::DEFAULT_THRESHOLD).
    pub fn new(problem: Arc<P>) -> Self {
        Self {
            problem,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    /// Creates the operator with an explicit split threshold.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidParameter`] if `threshold` is zero.
    pub fn with_threshold(problem: Arc<P>, threshold: usize) -> Result<Self> {
        if threshold == 0 {
            return Err(EvoError::InvalidParameter(
                "split threshold must be at least 1".to_string(),
            ));
        }
        Ok(Self { problem, threshold })
    }

    /// Current split threshold.
    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl<P: Problem> Operator<P::Genome> for ParallelEvaluate<P> {
    fn operate(&mut self, population: &mut Population<P::Genome>) -> Result<()> {
        evaluate_split(
            self.problem.as_ref(),
            population.as_mut_slice(),
            self.threshold,
        )
    }

    fn describe(&self) -> String {
        format!(
            "ParallelEvaluate, threshold = {}, using problem: {}",
            self.threshold,
            self.problem.describe()
        )
    }
}

fn evaluate_split<P: Problem>(
    problem: &P,
    section: &mut [Individual<P::Genome>],
    threshold: usize,
) -> Result<()> {
    // A one-element section can no longer be split, whatever the threshold.
    if section.len() < threshold || section.len() <= 1 {
        for individual in section.iter_mut() {
            problem.evaluate(individual)?;
        }
        return Ok(());
    }

    let mid = section.len() / 2;
    let (left, right) = section.split_at_mut(mid);
    let (left_result, right_result) = rayon::join(
        || evaluate_split(problem, left, threshold),
        || evaluate_split(problem, right, threshold),
    );
    left_result?;
    right_result?;
    Ok(())
}
