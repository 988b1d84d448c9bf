//! # Genome Encodings
//!
//! A genome is the encoded representation of one candidate solution. The
//! engine ships three encodings, each a fixed-length vector with a fixed
//! per-gene domain:
//!
//! - [`BitGenome`]: a vector of booleans,
//! - [`IntGenome`]: a vector of integers in a shared inclusive range,
//! - [`RealGenome`]: a vector of reals in a shared inclusive range.
//!
//! The [`Genome`] trait is the seam the genetic operators work through. An
//! operator is parameterized over a concrete genome type, so the kind of
//! population it accepts is a compile-time contract rather than a runtime
//! check. Crossover and mutation are written once, generically, in terms of
//! [`Genome::swap_tail`] and [`Genome::resample_locus`].
//!
//! ## Ordering
//!
//! Genomes are totally ordered for diversity counting and deterministic tie
//! handling: genomes of unequal length compare by length, and genomes of
//! equal length compare lexicographically over genes in index order (reals
//! use `f64::total_cmp`). Fitness is never part of genome comparison.

mod bit;
mod int;
mod real;

pub use bit::BitGenome;
pub use int::IntGenome;
pub use real::RealGenome;

use std::fmt::{Debug, Display};

use crate::error::Result;
use crate::rng::RandomSource;

/// Trait implemented by every genome encoding.
///
/// `Clone` must produce fully independent backing storage (all stock genomes
/// own plain `Vec`s, so a clone never aliases the source). The `Ord` bound
/// carries the length-then-lexicographic ordering described in the module
/// documentation.
pub trait Genome: Clone + Debug + Display + Ord + Send + Sync + 'static {
    /// Number of gene positions in the genome.
    fn len(&self) -> usize;

    /// Returns `true` if the genome has no gene positions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exchanges all positions in `[point, len)` between two genomes of equal
    /// length, leaving `[0, point)` untouched. The exchange is a symmetric
    /// swap that mutates both genomes in place.
    ///
    /// A `point` of zero exchanges the entire genome; `len - 1` exchanges
    /// only the last position. Both genomes must have the same length.
    fn swap_tail(a: &mut Self, b: &mut Self, point: usize);

    /// Resamples the single gene at `locus` from its domain: flip the bit, or
    /// draw a fresh value uniformly from the genome's `[lo, hi]` range.
    ///
    /// # Errors
    ///
    /// Propagates [`EvoError::InvalidRange`](crate::error::EvoError) from the
    /// underlying draw.
    fn resample_locus(&mut self, locus: usize, rng: &dyn RandomSource) -> Result<()>;
}
