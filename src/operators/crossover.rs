//! Single-point crossover.

use std::marker::PhantomData;

use crate::error::{EvoError, Result};
use crate::genome::Genome;
use crate::operators::Operator;
use crate::population::Population;
use crate::rng::{RandomSource, SharedRandom};

/// Probabilistic single-point crossover.
///
/// The operator visits each individual in population order. With probability
/// `chi`, the individual picks a mate uniformly at random from the whole
/// population, a crossover point `p` uniformly over `[0, L - 1]`, and the two
/// exchange all genome positions in `[p, L - 1]`. The exchange is a symmetric
/// in-place swap: both individuals are changed.
///
/// An individual may draw itself as its mate; the exchange is then a
/// guaranteed no-op, kept intentionally rather than special-cased away.
/// `p = 0` exchanges the entire genome, `p = L - 1` only the last position.
#[derive(Debug, Clone)]
pub struct PointCrossover<G: Genome> {
    chi: f64,
    rng: SharedRandom,
    _genome: PhantomData<fn() -> G>,
}

impl<G: Genome> PointCrossover<G> {
    /// Default crossover probability, matching the classic single-point
    /// operator configuration.
    pub const DEFAULT_CHI: f64 = 0.6;

    /// Creates the operator with crossover probability `chi`.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidParameter`] if `chi` is outside `[0, 1]`.
    pub fn new(chi: f64, rng: SharedRandom) -> Result<Self> {
        check_probability(chi, "chi")?;
        Ok(Self {
            chi,
            rng,
            _genome: PhantomData,
        })
    }

    /// Creates the operator with the default probability
    /// [`DEFAULT_CHI`](Self::DEFAULT_CHI).
    pub fn with_default_chi(rng: SharedRandom) -> Self {
        Self {
            chi: Self::DEFAULT_CHI,
            rng,
            _genome: PhantomData,
        }
    }

    /// Current crossover probability.
    pub fn chi(&self) -> f64 {
        self.chi
    }

    /// Replaces the crossover probability.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidParameter`] if `chi` is outside `[0, 1]`.
    pub fn set_chi(&mut self, chi: f64) -> Result<()> {
        check_probability(chi, "chi")?;
        self.chi = chi;
        Ok(())
    }
}

impl<G: Genome> Operator<G> for PointCrossover<G> {
    fn operate(&mut self, population: &mut Population<G>) -> Result<()> {
        let n = population.len();

        for i in 0..n {
            if self.rng.next_double() > self.chi {
                continue;
            }

            let mate = self.rng.next_int(0, n as i64 - 1)? as usize;
            let length = population[i].genome().len();
            let point = self.rng.next_int(0, length as i64 - 1)? as usize;

            // None means the individual mated with itself; swapping a tail
            // with itself changes nothing.
            if let Some((a, b)) = population.pair_mut(i, mate) {
                G::swap_tail(a.genome_mut(), b.genome_mut(), point);
            }
        }

        Ok(())
    }

    fn describe(&self) -> String {
        format!("PointCrossover, chi = {}", self.chi)
    }
}

pub(crate) fn check_probability(value: f64, name: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(EvoError::InvalidParameter(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}
