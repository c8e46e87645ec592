//! Feed-forward networks built from a topology and a flat genome.
//!
//! A [`Network`] is compiled once from a `(LayerTopology, Genome)` pair and
//! is immutable afterwards; evolution never mutates a live network, it builds
//! a fresh one from each offspring genome. Genome weights are assigned in
//! layer order, then neuron order within the layer, then weight-index order
//! within the neuron, consuming the genome strictly sequentially. Crossover
//! and mutation rely on that fixed ordering staying put.

use crate::activation::Activation;
use crate::genome::Genome;
use crate::topology::LayerTopology;

/// Error type for network construction and evaluation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The genome length does not match the topology's weight count.
    ///
    /// This is fatal: a partially-filled network is never constructed.
    GenomeLength {
        /// Weights the topology requires.
        expected: usize,
        /// Weights the genome supplied.
        actual: usize,
    },
    /// The input vector's width does not match the network's declared
    /// (bias-exclusive) input width.
    InputWidth {
        /// The network's input width.
        expected: usize,
        /// The width supplied to [`Network::forward`].
        actual: usize,
    },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::GenomeLength { expected, actual } => {
                write!(
                    f,
                    "genome length {actual} does not match topology weight count {expected}"
                )
            }
            NetworkError::InputWidth { expected, actual } => {
                write!(
                    f,
                    "input size {actual} does not equal network input size of {expected}"
                )
            }
        }
    }
}

impl std::error::Error for NetworkError {}

/// A single neuron: its ordered weights, bias weight last.
#[derive(Debug, Clone)]
struct Neuron {
    weights: Vec<f32>,
}

/// A layer of equal-fan-in neurons sharing one activation function.
#[derive(Debug, Clone)]
struct Layer {
    neurons: Vec<Neuron>,
    activation: Activation,
}

impl Layer {
    fn feed(&self, inputs: &[f32]) -> Vec<f32> {
        let mut outputs = Vec::with_capacity(self.neurons.len());
        for neuron in &self.neurons {
            // Every weight multiplies every input and the products
            // accumulate pairwise in this loop order. NOT a per-index
            // dot product; offspring fitness depends on this staying put.
            let mut sum = 0.0;
            for &weight in &neuron.weights {
                for &input in inputs {
                    sum += weight * input;
                }
            }
            outputs.push(self.activation.apply(sum));
        }
        outputs
    }
}

/// A compiled feed-forward network.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    input_width: usize,
}

impl Network {
    /// Build a network from a topology and a genome of exactly
    /// [`weight_count`](LayerTopology::weight_count) weights.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::GenomeLength`] when the genome length differs
    /// from the topology's weight count.
    pub fn build(topology: &LayerTopology, genome: &Genome) -> Result<Self, NetworkError> {
        let expected = topology.weight_count();
        if genome.len() != expected {
            return Err(NetworkError::GenomeLength {
                expected,
                actual: genome.len(),
            });
        }

        let counts = topology.neuron_counts();
        let activations = topology.activations();
        let mut genes = genome.iter().copied();

        let mut layers = Vec::with_capacity(counts.len() - 1);
        for i in 1..counts.len() {
            let fan_in = counts[i - 1] as usize + 1; // + 1 for the bias input
            let neurons = (0..counts[i] as usize)
                .map(|_| Neuron {
                    weights: genes.by_ref().take(fan_in).collect(),
                })
                .collect();
            layers.push(Layer {
                neurons,
                activation: activations[i - 1],
            });
        }

        Ok(Self {
            layers,
            input_width: topology.input_width(),
        })
    }

    /// The declared, bias-exclusive input width.
    #[must_use]
    pub fn input_width(&self) -> usize {
        self.input_width
    }

    /// The output vector width.
    #[must_use]
    pub fn output_width(&self) -> usize {
        self.layers.last().map_or(0, |layer| layer.neurons.len())
    }

    /// Evaluate the network on an input vector.
    ///
    /// A constant bias value of `1.0` is appended to the running value vector
    /// before each layer is evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InputWidth`] when `inputs` does not match the
    /// declared input width; the caller must check before using the output.
    pub fn forward(&self, inputs: &[f32]) -> Result<Vec<f32>, NetworkError> {
        if inputs.len() != self.input_width {
            return Err(NetworkError::InputWidth {
                expected: self.input_width,
                actual: inputs.len(),
            });
        }

        let mut values = inputs.to_vec();
        for layer in &self.layers {
            values.push(1.0);
            values = layer.feed(&values);
        }
        Ok(values)
    }
}
