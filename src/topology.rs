//! String-encoded network architecture.
//!
//! A [`LayerTopology`] is parsed from two compact ASCII strings: `neurons`
//! holds one decimal digit per layer (the digit is that layer's neuron count,
//! input layer included), and `activations` holds one activation code per
//! layer after the input layer. `"452"` with `"tt"` describes a 4-input
//! network with a 5-neuron tanh hidden layer and a 2-neuron tanh output
//! layer.
//!
//! The one-digit-per-layer encoding caps any single layer at 9 neurons. That
//! is a limitation of the encoding itself, not something to extend silently.

use serde::{Deserialize, Serialize};

use crate::activation::Activation;

/// Error type for topology parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A character in the neuron string is not a decimal digit.
    InvalidDigit {
        /// Byte index of the offending character.
        index: usize,
        /// The character found there.
        found: char,
    },
    /// The neuron string describes fewer than two layers, which cannot form
    /// a network (no weights, no defined input width).
    Empty,
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::InvalidDigit { index, found } => {
                write!(
                    f,
                    "neuron topology contains non-digit {found:?} at index {index}"
                )
            }
            TopologyError::Empty => {
                write!(f, "neuron topology needs at least an input and an output layer")
            }
        }
    }
}

impl std::error::Error for TopologyError {}

/// An immutable description of a layered feed-forward architecture.
///
/// Constructed once via [`LayerTopology::parse`]; networks, genomes and
/// subjects all derive their dimensions from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerTopology {
    /// Neuron count per layer, input layer first.
    neurons: Vec<u8>,
    /// Activation per layer after the input layer.
    activations: Vec<Activation>,
}

impl LayerTopology {
    /// Parse the two topology strings.
    ///
    /// If the activation string's length does not equal `neurons.len() - 1`,
    /// the whole string is discarded and replaced with all-sigmoid codes.
    /// The replacement is built one code per layer INCLUDING the input layer,
    /// one more than is ever consumed; only the first `neurons.len() - 1`
    /// codes are read.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InvalidDigit`] for a non-digit neuron-count
    /// character and [`TopologyError::Empty`] for fewer than two layers.
    pub fn parse(neurons: &str, activations: &str) -> Result<Self, TopologyError> {
        let mut counts = Vec::with_capacity(neurons.len());
        for (index, ch) in neurons.chars().enumerate() {
            let digit = ch
                .to_digit(10)
                .ok_or(TopologyError::InvalidDigit { index, found: ch })?;
            counts.push(digit as u8);
        }

        if counts.len() < 2 {
            return Err(TopologyError::Empty);
        }

        let codes: Vec<char> = if activations.chars().count() == counts.len() - 1 {
            activations.chars().collect()
        } else {
            // Mismatch recovery: all-sigmoid fallback, one code per layer.
            std::iter::repeat('s').take(counts.len()).collect()
        };

        let resolved = codes
            .iter()
            .take(counts.len() - 1)
            .map(|&c| Activation::from_code(c))
            .collect();

        Ok(Self {
            neurons: counts,
            activations: resolved,
        })
    }

    /// Total number of weights a genome for this topology must carry.
    ///
    /// Each neuron in layer `i` takes `neurons[i - 1] + 1` weights, the `+ 1`
    /// being the bias input appended during the forward pass.
    #[must_use]
    pub fn weight_count(&self) -> usize {
        self.neurons
            .windows(2)
            .map(|pair| (pair[0] as usize + 1) * pair[1] as usize)
            .sum()
    }

    /// The network's declared input width (bias-exclusive).
    #[must_use]
    pub fn input_width(&self) -> usize {
        self.neurons[0] as usize
    }

    /// Neuron counts per layer, input layer first.
    #[must_use]
    pub fn neuron_counts(&self) -> &[u8] {
        &self.neurons
    }

    /// Activation functions per layer after the input layer.
    #[must_use]
    pub fn activations(&self) -> &[Activation] {
        &self.activations
    }

    /// Number of layers, input layer included.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.neurons.len()
    }
}
