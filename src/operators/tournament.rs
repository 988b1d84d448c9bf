//! Tournament selection.

use std::marker::PhantomData;

use crate::error::{EvoError, Result};
use crate::genome::Genome;
use crate::individual::Individual;
use crate::operators::Operator;
use crate::population::Population;
use crate::rng::{RandomSource, SharedRandom};

/// k-tournament selection.
///
/// Builds a new population of the same size: for each of the N output slots
/// independently, k individuals are sampled uniformly with replacement from
/// the *current* population, and a deep copy of the sample's best goes into
/// the slot. The first candidate drawn is the running best; later candidates
/// replace it only on strictly greater fitness, so the first individual
/// encountered wins ties. The successor replaces the old population only
/// after every slot is filled.
///
/// A tournament size of 1 degenerates to uniform random resampling with
/// replacement: no fitness pressure at all. Larger sizes push harder toward
/// the fittest individuals.
#[derive(Debug, Clone)]
pub struct TournamentSelection<G: Genome> {
    k: usize,
    rng: SharedRandom,
    _genome: PhantomData<fn() -> G>,
}

impl<G: Genome> TournamentSelection<G> {
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

impl<G: Genome> Operator<G> for TournamentSelection<G> {
    fn operate(&mut self, population: &mut Population<G>) -> Result<()> {
        let successor = run_tournaments(population, self.k, 0, &self.rng)?;
        population.replace(successor)
    }

    fn describe(&self) -> String {
        format!("TournamentSelection, k = {}", self.k)
    }
}

pub(crate) fn check_tournament_size(k: usize) -> Result<()> {
    if k == 0 {
        return Err(EvoError::InvalidParameter(
            "tournament size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Runs one k-tournament per successor slot in `[first_slot, N)` and returns
/// the winners as deep copies, in slot order. The elitist variant passes
/// `first_slot = 1` after reserving slot 0 for the incumbent best.
pub(crate) fn run_tournaments<G: Genome>(
    population: &Population<G>,
    k: usize,
    first_slot: usize,
    rng: &SharedRandom,
) -> Result<Vec<Individual<G>>> {
    let n = population.len();
    if n == 0 {
        return Err(EvoError::EmptyPopulation);
    }

    let mut successor = Vec::with_capacity(n - first_slot);
    for _slot in first_slot..n {
        let mut winner = rng.next_int(0, n as i64 - 1)? as usize;
        for _ in 1..k {
            let challenger = rng.next_int(0, n as i64 - 1)? as usize;
            if population[challenger].fitness() > population[winner].fitness() {
                winner = challenger;
            }
        }
        successor.push(population[winner].clone());
    }

    Ok(successor)
}
