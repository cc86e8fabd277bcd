//! Canonical, triangle-only distance matrix

use itertools::Itertools;
use ndarray::Array2;
use std::mem;

/// One entry of the upper triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairDistance<'a> {
    pub sample1: &'a str,
    pub sample2: &'a str,
    pub distance: u32,
}

/// Validated pairwise distances between samples.
///
/// Samples are held in lexicographic order and only the strict upper triangle
/// is stored, row-major: for `i < j` the entry lives at
/// `i * n - i * (i + 1) / 2 + (j - i - 1)`. Self-distance is always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    samples: Vec<String>,
    condensed: Vec<u32>,
    label: String,
}

impl DistanceMatrix {
    /// Build from a square array whose rows and columns already follow `samples`
    /// order and whose diagonal and symmetry have been checked.
    pub(crate) fn from_square(samples: Vec<String>, square: &Array2<u32>, label: &str) -> Self {
        let n = samples.len();
        debug_assert_eq!(square.dim(), (n, n));

        let condensed = (0..n)
            .tuple_combinations()
            .map(|(i, j)| square[[i, j]])
            .collect();

        Self {
            samples,
            condensed,
            label: label.to_string(),
        }
    }

    /// Sample names in canonical order
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Label attached to the distance values
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Canonical index of a sample
    pub fn index_of(&self, sample: &str) -> Option<usize> {
        self.samples
            .binary_search_by(|probe| probe.as_str().cmp(sample))
            .ok()
    }

    /// Distance between two samples by canonical index
    pub fn distance_at(&self, i: usize, j: usize) -> u32 {
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Less => self.condensed[self.condensed_index(i, j)],
            std::cmp::Ordering::Greater => self.condensed[self.condensed_index(j, i)],
        }
    }

    /// Distance between two samples by name; `None` if either is unknown
    pub fn distance(&self, a: &str, b: &str) -> Option<u32> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.distance_at(i, j))
    }

    /// Number of stored pairs, `n * (n - 1) / 2`
    pub fn pair_count(&self) -> usize {
        self.condensed.len()
    }

    /// Iterate the upper triangle in canonical row-major order
    pub fn pairs(&self) -> impl Iterator<Item = PairDistance<'_>> + '_ {
        (0..self.samples.len())
            .tuple_combinations()
            .zip(self.condensed.iter())
            .map(move |((i, j), &distance)| PairDistance {
                sample1: &self.samples[i],
                sample2: &self.samples[j],
                distance,
            })
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let names = self.samples.iter().map(|s| s.capacity()).sum::<usize>()
            + self.samples.capacity() * mem::size_of::<String>();
        let values = self.condensed.capacity() * mem::size_of::<u32>();

        base + names + values + self.label.capacity()
    }

    fn condensed_index(&self, i: usize, j: usize) -> usize {
        let n = self.samples.len();
        i * n - i * (i + 1) / 2 + (j - i - 1)
    }
}
