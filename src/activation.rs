//! Activation functions for evolved feed-forward networks.
//!
//! Topology strings refer to activation functions by a one-character code
//! (see [`Activation::from_code`]), so the set is closed and small. Unknown
//! codes resolve to [`Activation::Sigmoid`] rather than failing: a topology
//! string is experiment configuration, and a typo there degrades to the
//! default nonlinearity instead of aborting the experiment.

use serde::{Deserialize, Serialize};

/// Activation function types selectable per network layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Activation {
    /// Sigmoid: f(x) = 1 / (1 + e^(-x))
    #[default]
    Sigmoid,
    /// Hyperbolic tangent: f(x) = tanh(x)
    Tanh,
    /// Rectified Linear Unit: f(x) = max(0, x)
    ReLU,
    /// Identity function: f(x) = x
    Identity,
}

impl Activation {
    /// All available activation functions.
    pub const ALL: [Self; 4] = [Self::Sigmoid, Self::Tanh, Self::ReLU, Self::Identity];

    /// Resolve a topology-string code to an activation function.
    ///
    /// Recognized codes are `'s'` (sigmoid), `'t'` (tanh), `'r'` (ReLU) and
    /// `'l'` (linear/identity). Any other character resolves to sigmoid.
    #[must_use]
    pub fn from_code(code: char) -> Self {
        match code {
            't' => Self::Tanh,
            'r' => Self::ReLU,
            'l' => Self::Identity,
            _ => Self::Sigmoid,
        }
    }

    /// The code character this activation is written as in a topology string.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Sigmoid => 's',
            Self::Tanh => 't',
            Self::ReLU => 'r',
            Self::Identity => 'l',
        }
    }

    /// Apply this activation function to an input value.
    #[inline]
    #[must_use]
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Self::Tanh => x.tanh(),
            Self::ReLU => x.max(0.0),
            Self::Identity => x,
        }
    }
}
