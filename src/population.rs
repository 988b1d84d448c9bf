//! # Population
//!
//! A [`Population`] is an ordered sequence of exactly N individuals, N fixed
//! for the life of a run. Order only matters insofar as operators read and
//! write by index; no meaning attaches to a position across generations
//! except where an operator (elitism) explicitly assigns a slot.

use std::ops::{Index, IndexMut};
use std::slice::{Iter, IterMut};

use crate::error::{EvoError, Result};
use crate::genome::Genome;
use crate::individual::Individual;

/// A fixed-size ordered collection of individuals.
#[derive(Debug, Clone)]
pub struct Population<G: Genome> {
    slots: Vec<Individual<G>>,
}

impl<G: Genome> Population<G> {
    /// Wraps a vector of individuals. The vector's length becomes the
    /// population size for the rest of the run.
    pub fn from_individuals(slots: Vec<Individual<G>>) -> Self {
        Self { slots }
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the population holds no individuals.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over the individuals in index order.
    pub fn iter(&self) -> Iter<'_, Individual<G>> {
        self.slots.iter()
    }

    /// Mutably iterates over the individuals in index order.
    pub fn iter_mut(&mut self) -> IterMut<'_, Individual<G>> {
        self.slots.iter_mut()
    }

    /// Borrows the individuals as a slice.
    pub fn as_slice(&self) -> &[Individual<G>] {
        &self.slots
    }

    /// Mutably borrows the individuals as a slice. The parallel evaluator
    /// splits this into disjoint windows.
    pub fn as_mut_slice(&mut self) -> &mut [Individual<G>] {
        &mut self.slots
    }

    /// Mutably borrows two distinct slots at once, or `None` when `i == j`.
    ///
    /// Crossover uses this to swap genome material between an individual and
    /// its mate; a `None` is the self-mating case, where the exchange is a
    /// guaranteed no-op.
    pub fn pair_mut(
        &mut self,
        i: usize,
        j: usize,
    ) -> Option<(&mut Individual<G>, &mut Individual<G>)> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => {
                let (head, tail) = self.slots.split_at_mut(j);
                Some((&mut head[i], &mut tail[0]))
            }
            std::cmp::Ordering::Greater => {
                let (head, tail) = self.slots.split_at_mut(i);
                Some((&mut tail[0], &mut head[j]))
            }
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Replaces the whole population with a fully built successor of the same
    /// size. Selection operators build their output off to the side and swap
    /// it in atomically, so no slot ever reads a partially updated
    /// population.
    ///
    /// # Errors
    ///
    /// Returns [`EvoError::InvalidParameter`] if the successor's size differs.
    pub fn replace(&mut self, successor: Vec<Individual<G>>) -> Result<()> {
        if successor.len() != self.slots.len() {
            return Err(EvoError::InvalidParameter(format!(
                "successor population has {} individuals, expected {}",
                successor.len(),
                self.slots.len()
            )));
        }
        self.slots = successor;
        Ok(())
    }
}

impl<G: Genome> Index<usize> for Population<G> {
    type Output = Individual<G>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.slots[index]
    }
}

impl<G: Genome> IndexMut<usize> for Population<G> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.slots[index]
    }
}

impl<'a, G: Genome> IntoIterator for &'a Population<G> {
    type Item = &'a Individual<G>;
    type IntoIter = Iter<'a, Individual<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::IntGenome;

    fn pop_of(genes: &[i64]) -> Population<IntGenome> {
        let slots = genes
            .iter()
            .map(|&g| Individual::new(IntGenome::from_genes(vec![g], 0, 9).unwrap()))
            .collect();
        Population::from_individuals(slots)
    }

    #[test]
    fn pair_mut_returns_disjoint_slots() {
        let mut pop = pop_of(&[1, 2, 3]);

        let (a, b) = pop.pair_mut(0, 2).unwrap();
        assert_eq!(a.genome().gene(0), 1);
        assert_eq!(b.genome().gene(0), 3);

        let (a, b) = pop.pair_mut(2, 0).unwrap();
        assert_eq!(a.genome().gene(0), 3);
        assert_eq!(b.genome().gene(0), 1);
    }

    #[test]
    fn pair_mut_refuses_self_pairing() {
        let mut pop = pop_of(&[1, 2, 3]);
        assert!(pop.pair_mut(1, 1).is_none());
    }

    #[test]
    fn replace_enforces_fixed_size() {
        let mut pop = pop_of(&[1, 2, 3]);

        let smaller = vec![Individual::new(IntGenome::from_genes(vec![0], 0, 9).unwrap())];
        assert!(pop.replace(smaller).is_err());
        assert_eq!(pop.len(), 3);

        let same_size = (0..3)
            .map(|g| Individual::new(IntGenome::from_genes(vec![g], 0, 9).unwrap()))
            .collect();
        assert!(pop.replace(same_size).is_ok());
        assert_eq!(pop[0].genome().gene(0), 0);
    }
}
