//! Mutation operators over genomes.
//!
//! Like the recombination operators, these are pure functions: the input
//! genome is read-only and a fresh vector is returned, length preserved.
//!
//! All three operators are driven by the single configured
//! `mutation_magnitude` value. For [`perturb`] it is the shift magnitude;
//! for [`invert`] and [`randomize`] it is the per-element probability.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::Genome;

/// The closed set of mutation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MutationMethod {
    /// Shift every element by `uniform(-1, 1) * magnitude`.
    #[default]
    Perturb,
    /// Negate each element with probability `rate`.
    Invert,
    /// Replace each element with `uniform(-1, 1)` with probability `rate`.
    Randomize,
}

impl MutationMethod {
    /// Apply this operator to a genome.
    ///
    /// `parameter` is the configured mutation magnitude; its meaning depends
    /// on the operator (shift magnitude for `Perturb`, per-element
    /// probability for the others).
    pub fn apply<R: Rng>(self, genome: &Genome, parameter: f32, rng: &mut R) -> Genome {
        match self {
            Self::Perturb => perturb(genome, parameter, rng),
            Self::Invert => invert(genome, parameter, rng),
            Self::Randomize => randomize(genome, parameter, rng),
        }
    }
}

/// Shift every element by an independent `uniform(-1, 1) * magnitude` draw.
///
/// There is no per-element gate: the whole genome is perturbed every call,
/// so each element moves by at most `magnitude`.
pub fn perturb<R: Rng>(genome: &Genome, magnitude: f32, rng: &mut R) -> Genome {
    genome
        .iter()
        .map(|&w| w + (rng.random::<f32>() * 2.0 - 1.0) * magnitude)
        .collect()
}

/// Negate each element independently with probability `rate`.
pub fn invert<R: Rng>(genome: &Genome, rate: f32, rng: &mut R) -> Genome {
    genome
        .iter()
        .map(|&w| if rng.random::<f32>() <= rate { -w } else { w })
        .collect()
}

/// Replace each element with a fresh `uniform(-1, 1)` draw, independently
/// with probability `rate`.
pub fn randomize<R: Rng>(genome: &Genome, rate: f32, rng: &mut R) -> Genome {
    genome
        .iter()
        .map(|&w| {
            if rng.random::<f32>() <= rate {
                rng.random::<f32>() * 2.0 - 1.0
            } else {
                w
            }
        })
        .collect()
}
