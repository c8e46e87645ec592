//! Recombination operators over equal-length genomes.
//!
//! All operators are pure: parents are read-only and offspring are freshly
//! allocated, so a parent's stored genome can never alias an offspring
//! buffer. Offspring always come in complementary pairs of the parents'
//! length.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::Genome;

/// The closed set of recombination operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CrossoverMethod {
    /// One cut point; tails swap parents.
    #[default]
    SinglePoint,
    /// Two distinct cut points; the middle segment swaps parents.
    TwoPoint,
    /// Each index independently swaps parents with probability 0.5.
    Uniform,
}

impl CrossoverMethod {
    /// Apply this operator to a parent pair.
    pub fn apply<R: Rng>(self, p0: &Genome, p1: &Genome, rng: &mut R) -> (Genome, Genome) {
        match self {
            Self::SinglePoint => single_point(p0, p1, rng),
            Self::TwoPoint => two_point(p0, p1, rng),
            Self::Uniform => uniform(p0, p1, rng),
        }
    }
}

/// Copy `p0`/`p1` into offspring, swapping source parents inside `[from, to)`.
fn swap_segment(p0: &Genome, p1: &Genome, from: usize, to: usize) -> (Genome, Genome) {
    let mut c0 = Vec::with_capacity(p0.len());
    let mut c1 = Vec::with_capacity(p1.len());
    for i in 0..p0.len() {
        if i >= from && i < to {
            c0.push(p1[i]);
            c1.push(p0[i]);
        } else {
            c0.push(p0[i]);
            c1.push(p1[i]);
        }
    }
    (c0, c1)
}

/// Single-point crossover: a cut index is drawn uniformly in `[0, len)` and
/// everything from the cut onward swaps parents.
///
/// Parents must have equal length.
pub fn single_point<R: Rng>(p0: &Genome, p1: &Genome, rng: &mut R) -> (Genome, Genome) {
    debug_assert_eq!(p0.len(), p1.len());
    let cut = rng.random_range(0..p0.len());
    swap_segment(p0, p1, cut, p0.len())
}

/// Two-point crossover: two distinct cut indices are drawn uniformly in
/// `[0, len)` (resampled until distinct) and the segment between them swaps
/// parents.
///
/// Parents must have equal length of at least 2, or the distinctness
/// resampling cannot terminate.
pub fn two_point<R: Rng>(p0: &Genome, p1: &Genome, rng: &mut R) -> (Genome, Genome) {
    debug_assert_eq!(p0.len(), p1.len());
    debug_assert!(p0.len() >= 2);

    let cut0 = rng.random_range(0..p0.len());
    let mut cut1 = cut0;
    while cut1 == cut0 {
        cut1 = rng.random_range(0..p0.len());
    }

    let (from, to) = if cut0 < cut1 { (cut0, cut1) } else { (cut1, cut0) };
    swap_segment(p0, p1, from, to)
}

/// Uniform crossover: each index independently keeps or swaps the parents'
/// values with probability 0.5.
///
/// Parents must have equal length.
pub fn uniform<R: Rng>(p0: &Genome, p1: &Genome, rng: &mut R) -> (Genome, Genome) {
    debug_assert_eq!(p0.len(), p1.len());
    let mut c0 = Vec::with_capacity(p0.len());
    let mut c1 = Vec::with_capacity(p1.len());
    for i in 0..p0.len() {
        if rng.random::<bool>() {
            c0.push(p0[i]);
            c1.push(p1[i]);
        } else {
            c0.push(p1[i]);
            c1.push(p0[i]);
        }
    }
    (c0, c1)
}
