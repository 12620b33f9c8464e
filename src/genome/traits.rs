//! Core genome traits
//!
//! The engine never looks inside a gene. It only needs a genome to behave as a
//! fixed-length sequence that can be sliced and rebuilt, which is what
//! [`Genome`] captures. [`GeneDomain`] describes where fresh gene values come
//! from when a mutation operator replaces a gene.

use std::fmt::Debug;

use rand::Rng;

use crate::error::GenomeError;

/// Fixed-length, indexable sequence of genes.
///
/// All genomes inside one population share the same length; the engine checks
/// this after every crossover and mutation.
pub trait Genome: Clone + Debug + 'static {
    /// The allele type for individual genes
    type Gene: Clone + PartialEq + Debug;

    /// Get the genes as a slice
    fn genes(&self) -> &[Self::Gene];

    /// Get the genes as a mutable slice
    fn genes_mut(&mut self) -> &mut [Self::Gene];

    /// Rebuild a genome from an owned gene vector
    fn from_genes(genes: Vec<Self::Gene>) -> Self;

    /// Number of genes
    fn len(&self) -> usize {
        self.genes().len()
    }

    /// Check if the genome has no genes
    fn is_empty(&self) -> bool {
        self.genes().is_empty()
    }
}

impl<T> Genome for Vec<T>
where
    T: Clone + PartialEq + Debug + 'static,
{
    type Gene = T;

    fn genes(&self) -> &[T] {
        self
    }

    fn genes_mut(&mut self) -> &mut [T] {
        self
    }

    fn from_genes(genes: Vec<T>) -> Self {
        genes
    }
}

/// Source of uniformly random gene values
pub trait GeneDomain<T> {
    /// Draw one gene value uniformly from the domain
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T;
}

/// The boolean gene domain `{true, false}`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Booleans;

impl GeneDomain<bool> for Booleans {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen()
    }
}

/// A finite set of symbols, each equally likely
#[derive(Clone, Debug, PartialEq)]
pub struct Alphabet<T> {
    symbols: Vec<T>,
}

impl<T: Clone> Alphabet<T> {
    /// Create an alphabet from a non-empty list of symbols
    pub fn new(symbols: Vec<T>) -> Result<Self, GenomeError> {
        if symbols.is_empty() {
            return Err(GenomeError::InvalidStructure(
                "Alphabet must contain at least one symbol".to_string(),
            ));
        }
        Ok(Self { symbols })
    }

    /// The symbols of this alphabet
    pub fn symbols(&self) -> &[T] {
        &self.symbols
    }
}

impl<T: Clone> GeneDomain<T> for Alphabet<T> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.symbols[rng.gen_range(0..self.symbols.len())].clone()
    }
}
