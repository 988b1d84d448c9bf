//! Single-locus mutation.

use std::marker::PhantomData;

use crate::error::Result;
use crate::genome::Genome;
use crate::operators::crossover::check_probability;
use crate::operators::Operator;
use crate::population::Population;
use crate::rng::{RandomSource, SharedRandom};

/// Probabilistic single-locus mutation.
///
/// The operator visits each individual independently. With probability `mu`,
/// one locus is drawn uniformly over `[0, L - 1]` and resampled from its
/// domain: a bit is flipped, an integer or real gene is redrawn uniformly
/// from `[lo, hi]`. At most one locus is touched per mutated individual per
/// generation.
#[derive(Debug, Clone)]
pub struct PointMutation<G: Genome> {
    mu: f64,
    rng: SharedRandom,
    _genome: PhantomData<fn() -> G>,
}

impl<G: Genome> PointMutation<G> {
    /// Default mutation probability.
    pub const DEFAULT_MU: f64 = 0.01;

    /// Creates the operator with mutation probability `mu`.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidParameter`](crate::error::EvoError) if `mu`
    /// is outside `[0, 1]`.
    pub fn new(mu: f64, rng: SharedRandom) -> Result<Self> {
        check_probability(mu, "mu")?;
        Ok(Self {
            mu,
            rng,
            _genome: PhantomData,
        })
    }

    /// Creates the operator with the default probability
    /// [`DEFAULT_MU`](Self::DEFAULT_MU).
    pub fn with_default_mu(rng: SharedRandom) -> Self {
        Self {
            mu: Self::DEFAULT_MU,
            rng,
            _genome: PhantomData,
        }
    }

    /// Current mutation probability.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Replaces the mutation probability.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidParameter`](crate::error::EvoError) if `mu`
    /// is outside `[0, 1]`.
    pub fn set_mu(&mut self, mu: f64) -> Result<()> {
        check_probability(mu, "mu")?;
        self.mu = mu;
        Ok(())
    }
}

impl<G: Genome> Operator<G> for PointMutation<G> {
    fn operate(&mut self, population: &mut Population<G>) -> Result<()> {
        for individual in population.iter_mut() {
            if self.rng.next_double() > self.mu {
                continue;
            }

            let length = individual.genome().len();
            let locus = self.rng.next_int(0, length as i64 - 1)? as usize;
            individual
                .genome_mut()
                .resample_locus(locus, self.rng.as_ref())?;
        }

        Ok(())
    }

    fn describe(&self) -> String {
        format!("PointMutation, mu = {}", self.mu)
    }
}
