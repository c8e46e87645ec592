//! # Evonet
//!
//! A neuroevolution engine for fixed-topology feed-forward controllers.
//! Populations of flat weight-vector genomes are scored by an external
//! simulation and bred with classic genetic operators; no gradients, no
//! backpropagation.
//!
//! ## Features
//!
//! - **String-encoded architectures**: `"452"` + `"tt"` describes a 4-input
//!   network with a 5-neuron tanh hidden layer and a 2-output tanh layer
//! - **Three of everything**: single-point/two-point/uniform crossover,
//!   perturb/invert/randomize mutation, best/roulette/random selection,
//!   all dispatched through closed enums chosen in the experiment config
//! - **Pull-based evaluation**: the embedding simulation drives subjects
//!   tick by tick and the population epochs once every subject is inactive
//! - **Deterministic runs**: one seedable `ChaCha8Rng` owned by the
//!   population; a fixed seed reproduces every offspring exactly
//!
//! ## Quick Start
//!
//! ```rust
//! use evonet::{EvolutionConfig, Population, SimulationHost, Subject};
//!
//! // A toy task: stay alive as long as the first output stays positive.
//! struct ToyHost;
//! impl SimulationHost for ToyHost {
//!     fn advance(&mut self, subjects: &mut [Subject]) {
//!         for subject in subjects.iter_mut().filter(|s| s.is_active()) {
//!             let outputs = subject.actuate(&[0.3, -0.1, 0.5, 0.2]).unwrap();
//!             if outputs[0] > 0.0 {
//!                 subject.reward(1.0);
//!             } else {
//!                 subject.deactivate();
//!             }
//!             if subject.fitness() >= 50.0 {
//!                 subject.deactivate();
//!             }
//!         }
//!     }
//! }
//!
//! let config = EvolutionConfig {
//!     population_size: 20,
//!     seed: 42,
//!     ..EvolutionConfig::default()
//! };
//! let mut population = Population::new(config).unwrap();
//! let mut host = ToyHost;
//!
//! for _ in 0..5 {
//!     let stats = population.run_generation(&mut host);
//!     println!(
//!         "generation {}: avg {:.2}, best {:.2}",
//!         stats.generation, stats.average_fitness, stats.best_fitness
//!     );
//! }
//! ```
//!
//! ## Architecture
//!
//! The genome is the unit of inheritance: a flat `Vec<f32>` whose length is
//! fully determined by the topology string ([`LayerTopology::weight_count`]).
//! Networks are compiled once per subject from `(topology, genome)` and never
//! mutated afterwards; every generation builds fresh subjects from offspring
//! genomes. Genetic operators treat genomes as immutable values and return
//! new vectors, so parent and offspring buffers never alias.

pub mod activation;
pub mod crossover;
pub mod genome;
pub mod mutation;
pub mod network;
pub mod population;
pub mod selection;
pub mod subject;
pub mod topology;

// Re-exports for convenience
pub use activation::Activation;
pub use crossover::CrossoverMethod;
pub use genome::{random_genome, Genome};
pub use mutation::MutationMethod;
pub use network::{Network, NetworkError};
pub use population::{EvolutionConfig, GenerationStats, Population, SimulationHost};
pub use selection::SelectionMethod;
pub use subject::Subject;
pub use topology::{LayerTopology, TopologyError};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_genome_network_roundtrip() {
        let topology = LayerTopology::parse("452", "tt").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let genome = random_genome(&topology, &mut rng);

        let network = Network::build(&topology, &genome).unwrap();
        let outputs = network.forward(&[0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(outputs.len(), 2);
    }

    #[test]
    fn test_operator_enums_serialize() {
        let config = EvolutionConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: EvolutionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.crossover_method, config.crossover_method);
        assert_eq!(restored.mutation_method, config.mutation_method);
        assert_eq!(restored.selection_method, config.selection_method);
        assert_eq!(restored.neuron_topology, config.neuron_topology);
    }

    #[test]
    fn test_population_smoke() {
        let config = EvolutionConfig {
            population_size: 6,
            neuron_topology: "221".to_string(),
            activation_topology: "ss".to_string(),
            seed: 7,
            ..EvolutionConfig::default()
        };
        let mut population = Population::new(config).unwrap();

        for subject in population.subjects_mut() {
            subject.reward(1.0);
            subject.deactivate();
        }
        let stats = population.epoch();
        assert_eq!(stats.generation, 1);
        assert_eq!(population.subjects().len(), 6);
    }
}
