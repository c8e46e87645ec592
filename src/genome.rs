//! Flat weight-vector genomes.
//!
//! A genome is nothing more than an ordered sequence of `f32` weights whose
//! length must equal its topology's [`weight_count`](crate::LayerTopology::weight_count).
//! The assignment order (layer-major, then neuron, then weight index) is the
//! wire format shared between [`Network::build`](crate::Network::build) and
//! the genetic operators; both sides consume genomes strictly sequentially.
//!
//! Genomes are immutable values: the operators in [`crate::crossover`] and
//! [`crate::mutation`] always return fresh vectors, so a parent's stored
//! genome is never aliased by an offspring buffer.

use rand::Rng;

use crate::topology::LayerTopology;

/// An ordered sequence of real-valued weights encoding one network instance.
pub type Genome = Vec<f32>;

/// Generate a random genome for `topology`, each weight drawn uniformly
/// from `[-1, 1]`.
#[must_use]
pub fn random_genome<R: Rng>(topology: &LayerTopology, rng: &mut R) -> Genome {
    (0..topology.weight_count())
        .map(|_| rng.random::<f32>() * 2.0 - 1.0)
        .collect()
}
