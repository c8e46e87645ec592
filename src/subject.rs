//! Evaluated individuals.
//!
//! A [`Subject`] pairs a genome with the network built from it, an
//! externally-driven fitness accumulator, and an active/inactive latch. The
//! simulation host reads sensors from its environment, feeds them through
//! [`Subject::actuate`], applies the outputs as control forces, and calls
//! [`Subject::reward`] each tick while the subject is still alive; when the
//! subject fails its task the host calls [`Subject::deactivate`]. Once every
//! subject in a population is inactive the generation is ready for an epoch.

use rand::Rng;

use crate::genome::{random_genome, Genome};
use crate::network::{Network, NetworkError};
use crate::topology::LayerTopology;

/// One individual: genome, compiled network, fitness accumulator, active flag.
#[derive(Debug, Clone)]
pub struct Subject {
    topology: LayerTopology,
    genome: Genome,
    network: Network,
    fitness: f32,
    active: bool,
}

impl Subject {
    /// Create a subject with a fresh random genome for `topology`.
    #[must_use]
    pub fn random<R: Rng>(topology: LayerTopology, rng: &mut R) -> Self {
        let genome = random_genome(&topology, rng);
        Self::from_genome(topology, genome)
            .expect("random genome matches its topology's weight count")
    }

    /// Create a subject from an existing genome.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::GenomeLength`] when the genome does not match
    /// the topology's weight count.
    pub fn from_genome(topology: LayerTopology, genome: Genome) -> Result<Self, NetworkError> {
        let network = Network::build(&topology, &genome)?;
        Ok(Self {
            topology,
            genome,
            network,
            fitness: 0.0,
            active: true,
        })
    }

    /// Run the subject's sensors through its network.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InputWidth`] when `sensors` does not match the
    /// network's input width.
    pub fn actuate(&self, sensors: &[f32]) -> Result<Vec<f32>, NetworkError> {
        self.network.forward(sensors)
    }

    /// Accumulate fitness. Ignored once the subject is inactive.
    pub fn reward(&mut self, delta: f32) {
        if self.active {
            self.fitness += delta;
        }
    }

    /// Latch the subject inactive. There is no way back: a failed subject
    /// stays failed until the next generation replaces it.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Whether the subject is still being evaluated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The accumulated fitness.
    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// The subject's genome.
    #[must_use]
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// The topology the subject's network was built from.
    #[must_use]
    pub fn topology(&self) -> &LayerTopology {
        &self.topology
    }

    /// The compiled network.
    #[must_use]
    pub fn network(&self) -> &Network {
        &self.network
    }
}
