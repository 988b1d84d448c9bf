//! Fixed-length bounded-real genome.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{EvoError, Result};
use crate::genome::Genome;
use crate::rng::RandomSource;

/// A fixed-length vector of reals, each in a shared inclusive `[lo, hi]`
/// domain fixed for the whole genome.
///
/// The genome carries a display precision (number of fraction digits) used
/// only when rendering; comparisons always use the full `f64` values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct RealGenome {
    genes: Vec<f64>,
    lo: f64,
    hi: f64,
    frac_digits: usize,
}

impl RealGenome {
    /// Creates a genome of `length` genes, each drawn uniformly from
    /// `[lo, hi]`, rendering with `frac_digits` fraction digits.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidRange`] if `lo > hi` or either bound is not
    /// finite.
    pub fn random(
        length: usize,
        lo: f64,
        hi: f64,
        frac_digits: usize,
        rng: &dyn RandomSource,
    ) -> Result<Self> {
        Self::check_domain(lo, hi)?;
        let genes = (0..length).map(|_| rng.next_double_in(lo, hi)).collect();
        Ok(Self {
            genes,
            lo,
            hi,
            frac_digits,
        })
    }

    /// Creates a genome from explicit gene values.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidRange`] if `lo > hi`, or
    /// [`EvoError::InvalidParameter`] if any gene falls outside `[lo, hi]`.
    pub fn from_genes(genes: Vec<f64>, lo: f64, hi: f64, frac_digits: usize) -> Result<Self> {
        Self::check_domain(lo, hi)?;
        for &g in &genes {
            if !(lo..=hi).contains(&g) {
                return Err(EvoError::InvalidParameter(format!(
                    "gene value {} outside domain [{}, {}]",
                    g, lo, hi
                )));
            }
        }
        Ok(Self {
            genes,
            lo,
            hi,
            frac_digits,
        })
    }

    fn check_domain(lo: f64, hi: f64) -> Result<()> {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(EvoError::InvalidRange(format!(
                "gene domain requires finite lo <= hi, got [{}, {}]",
                lo, hi
            )));
        }
        Ok(())
    }

    /// Returns the gene at `index`.
    pub fn gene(&self, index: usize) -> f64 {
        self.genes[index]
    }

    /// Sets the gene at `index` to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidParameter`] if `value` is outside the
    /// genome's `[lo, hi]` domain.
    pub fn set_gene(&mut self, index: usize, value: f64) -> Result<()> {
        if !(self.lo..=self.hi).contains(&value) {
            return Err(EvoError::InvalidParameter(format!(
                "gene value {} outside domain [{}, {}]",
                value, self.lo, self.hi
            )));
        }
        self.genes[index] = value;
        Ok(())
    }

    /// Low end of the gene domain.
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// High end of the gene domain.
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Number of fraction digits used when rendering the genome.
    pub fn display_precision(&self) -> usize {
        self.frac_digits
    }
}

impl fmt::Display for RealGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, gene) in self.genes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.*}", self.frac_digits, gene)?;
        }
        write!(f, "]")
    }
}

// Ordering is over gene values only, via total_cmp so that every pair of
// genomes has a defined order.
impl PartialEq for RealGenome {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RealGenome {}

impl PartialOrd for RealGenome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RealGenome {
    fn cmp(&self, other: &Self) -> Ordering {
        self.genes.len().cmp(&other.genes.len()).then_with(|| {
            for (a, b) in self.genes.iter().zip(&other.genes) {
                let ord = a.total_cmp(b);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        })
    }
}

impl Genome for RealGenome {
    fn len(&self) -> usize {
        self.genes.len()
    }

    fn swap_tail(a: &mut Self, b: &mut Self, point: usize) {
        a.genes[point..].swap_with_slice(&mut b.genes[point..]);
    }

    fn resample_locus(&mut self, locus: usize, rng: &dyn RandomSource) -> Result<()> {
        self.genes[locus] = rng.next_double_in(self.lo, self.hi);
        Ok(())
    }
}
