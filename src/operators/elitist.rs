//! Elitist tournament selection.

use std::marker::PhantomData;

use crate::error::{EvoError, Result};
use crate::genome::Genome;
use crate::operators::tournament::{check_tournament_size, run_tournaments};
use crate::operators::Operator;
use crate::population::Population;
use crate::rng::SharedRandom;

/// k-tournament selection with a reserved elite slot.
///
/// Identical to [`TournamentSelection`](crate::operators::TournamentSelection),
/// except that slot 0 of the successor population is filled, before the
/// tournament loop, with a deep copy of the individual holding the single
/// greatest fitness in the current population (first occurrence on ties).
/// Slots `1..N` are then filled by ordinary k-tournament.
///
/// This guarantees the best individual of generation g survives selection
/// into generation g + 1 unchanged; operators earlier in a later generation's
/// pipeline may still alter it.
#[derive(Debug, Clone)]
pub struct ElitistTournamentSelection<G: Genome> {
    k: usize,
    rng: SharedRandom,
    _genome: PhantomData<fn() -> G>,
}

impl<G: Genome> ElitistTournamentSelection<G> {
    /// Default tournament size.
    pub const DEFAULT_K: usize = 2;

    /// Creates the operator with tournament size `k`.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidParameter`] if `k` is zero.
    pub fn new(k: usize, rng: SharedRandom) -> Result<Self> {
        check_tournament_size(k)?;
        Ok(Self {
            k,
            rng,
            _genome: PhantomData,
        })
    }

    /// Creates the operator with the default size [`DEFAULT_K`](Self::DEFAULT_K).
    pub fn with_default_size(rng: SharedRandom) -> Self {
        Self {
            k: Self::DEFAULT_K,
            rng,
            _genome: PhantomData,
        }
    }

    /// Current tournament size.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Replaces the tournament size.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidParameter`] if `k` is zero.
    pub fn set_k(&mut self, k: usize) -> Result<()> {
        check_tournament_size(k)?;
        self.k = k;
        Ok(())
    }
}

impl<G: Genome> Operator<G> for ElitistTournamentSelection<G> {
    fn operate(&mut self, population: &mut Population<G>) -> Result<()> {
        if population.is_empty() {
            return Err(EvoError::EmptyPopulation);
        }

        // Strict-improvement scan from index 0: the first occurrence of the
        // maximum fitness wins ties.
        let mut best = 0;
        for i in 1..population.len() {
            if population[i].fitness() > population[best].fitness() {
                best = i;
            }
        }

        let mut successor = Vec::with_capacity(population.len());
        successor.push(population[best].clone());
        successor.extend(run_tournaments(population, self.k, 1, &self.rng)?);

        population.replace(successor)
    }

    fn describe(&self) -> String {
        format!("ElitistTournamentSelection, k = {}", self.k)
    }
}
