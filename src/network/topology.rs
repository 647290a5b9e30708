use crate::activation::Activation;
use crate::error::{NetworkError, Result};

/// Validated architecture description: ordered layer sizes plus one
/// activation per layer, separate from any trained parameters.
///
/// The activation at index 0 belongs to the input layer; it is carried for
/// symmetry (and persistence) but never applied, since the input layer
/// echoes the raw input.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    node_per_layer: Vec<usize>,
    activations: Vec<Activation>,
}

impl Topology {
    pub fn new(node_per_layer: Vec<usize>, activations: Vec<Activation>) -> Result<Topology> {
        if node_per_layer.len() < 2 {
            return Err(NetworkError::ShapeMismatch(format!(
                "a network needs at least 2 layers, got {}",
                node_per_layer.len()
            )));
        }
        if let Some(layer) = node_per_layer.iter().position(|&size| size == 0) {
            return Err(NetworkError::ShapeMismatch(format!(
                "layer {layer} has no nodes"
            )));
        }
        if activations.len() != node_per_layer.len() {
            return Err(NetworkError::ShapeMismatch(format!(
                "{} layers but {} activation functions",
                node_per_layer.len(),
                activations.len()
            )));
        }
        Ok(Topology {
            node_per_layer,
            activations,
        })
    }

    pub fn layer_total(&self) -> usize {
        self.node_per_layer.len()
    }

    /// Number of adjacent layer boundaries (= bias count).
    pub fn boundary_total(&self) -> usize {
        self.node_per_layer.len() - 1
    }

    pub fn node_total(&self) -> usize {
        self.node_per_layer.iter().sum()
    }

    /// Sum over adjacent layer pairs of size[i] * size[i+1].
    pub fn weight_total(&self) -> usize {
        self.node_per_layer
            .windows(2)
            .map(|pair| pair[0] * pair[1])
            .sum()
    }

    pub fn node_per_layer(&self) -> &[usize] {
        &self.node_per_layer
    }

    pub fn layer_size(&self, layer: usize) -> usize {
        self.node_per_layer[layer]
    }

    pub fn input_size(&self) -> usize {
        self.node_per_layer[0]
    }

    pub fn output_size(&self) -> usize {
        self.node_per_layer[self.node_per_layer.len() - 1]
    }

    pub fn activations(&self) -> &[Activation] {
        &self.activations
    }

    pub fn activation(&self, layer: usize) -> Activation {
        self.activations[layer]
    }
}
