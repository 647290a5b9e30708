use rand::prelude::*;

use crate::activation::Activation;
use crate::error::{NetworkError, Result};
use crate::loss::Loss;
use crate::math::{LayerBuffer, WeightTensor};
use crate::network::topology::Topology;

/// A dense feedforward network: topology, loss selection, and every owned
/// parameter buffer.
///
/// Storage layout:
/// - `weights` — one weight per (source, destination) node pair across each
///   adjacent layer boundary, addressed `[layer][dest][src]`.
/// - `biases`  — ONE scalar per layer boundary, shared by every destination
///   node of that boundary. Not a per-node bias vector; do not read it as
///   one.
/// - `nodes`   — the most recent forward-pass activation of every node,
///   input layer (raw input echo) through output layer.
/// - `deltas`  — per-node error terms, scratch state of the backward pass;
///   never persisted.
///
/// `Clone` deep-copies every buffer.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    loss: Loss,
    weights: WeightTensor,
    biases: Vec<f64>,
    nodes: LayerBuffer,
    deltas: LayerBuffer,
}

impl Network {
    /// Builds a network from named loss/activation identifiers and seeds
    /// weights and biases uniformly in [-1, 1).
    ///
    /// `activation_names` needs one entry per layer; the first entry
    /// belongs to the input layer and is never applied.
    pub fn new(
        loss_name: &str,
        node_per_layer: Vec<usize>,
        activation_names: &[&str],
    ) -> Result<Network> {
        let loss = Loss::from_name(loss_name)?;
        let activations = activation_names
            .iter()
            .map(|name| Activation::from_name(name))
            .collect::<Result<Vec<_>>>()?;
        let topology = Topology::new(node_per_layer, activations)?;
        let mut network = Network::from_parts(topology, loss);
        network.randomize();
        Ok(network)
    }

    /// Builds a network from raw loss/activation function pairs (each pair
    /// is the function and its derivative). The custom construction path;
    /// such a network cannot be saved, since its functions have no names.
    pub fn with_functions(
        node_per_layer: Vec<usize>,
        loss: (fn(f64, f64) -> f64, fn(f64, f64) -> f64),
        activations: Vec<(fn(f64) -> f64, fn(f64) -> f64)>,
    ) -> Result<Network> {
        let activations = activations
            .into_iter()
            .map(|(f, df)| Activation::Custom { f, df })
            .collect();
        let topology = Topology::new(node_per_layer, activations)?;
        let loss = Loss::Custom {
            f: loss.0,
            df: loss.1,
        };
        let mut network = Network::from_parts(topology, loss);
        network.randomize();
        Ok(network)
    }

    /// Allocates every buffer zeroed for the given topology.
    pub(crate) fn from_parts(topology: Topology, loss: Loss) -> Network {
        let sizes = topology.node_per_layer().to_vec();
        Network {
            weights: WeightTensor::zeros(&sizes),
            biases: vec![0.0; topology.boundary_total()],
            nodes: LayerBuffer::zeros(&sizes),
            deltas: LayerBuffer::zeros(&sizes),
            topology,
            loss,
        }
    }

    fn randomize(&mut self) {
        self.weights = WeightTensor::random(self.topology.node_per_layer());
        let mut rng = rand::thread_rng();
        for b in &mut self.biases {
            *b = rng.gen::<f64>() * 2.0 - 1.0;
        }
    }

    /// Computes node activations for `layer` (1-indexed from the first
    /// hidden layer) from the activations already present in `layer - 1`.
    ///
    /// Softmax layers are normalized across the whole destination layer
    /// after every raw weighted sum is known.
    fn compute_layer(&mut self, layer: usize) -> Result<()> {
        let boundary = layer - 1;
        let src_size = self.topology.layer_size(boundary);
        let dst_size = self.topology.layer_size(layer);
        let source = self.nodes.layer(boundary);

        let mut raw = vec![0.0; dst_size];
        for (dest, r) in raw.iter_mut().enumerate() {
            let mut sum = self.biases[boundary];
            for (src, &value) in source.iter().enumerate().take(src_size) {
                sum += self.weights.get(boundary, dest, src) * value;
            }
            *r = sum;
        }

        let activation = self.topology.activation(layer);
        if matches!(activation, Activation::Softmax) {
            Activation::softmax_in_place(&mut raw);
        } else {
            for r in raw.iter_mut() {
                *r = activation.apply(*r)?;
            }
        }

        self.nodes.layer_mut(layer).copy_from_slice(&raw);
        Ok(())
    }

    /// Runs a forward pass: seeds the input layer with `input`, computes
    /// every subsequent layer in order, and returns a copy of the output
    /// layer. Weights, biases, and deltas are untouched.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.topology.input_size() {
            return Err(NetworkError::ShapeMismatch(format!(
                "input has {} values but the input layer has {} nodes",
                input.len(),
                self.topology.input_size()
            )));
        }
        self.nodes.layer_mut(0).copy_from_slice(input);
        for layer in 1..self.topology.layer_total() {
            self.compute_layer(layer)?;
        }
        Ok(self.nodes.layer(self.topology.layer_total() - 1).to_vec())
    }

    /// One gradient-descent step against `expected`, assuming `predict`
    /// has already populated the node buffer for the current example.
    ///
    /// Output-layer delta per node: loss derivative at (predicted,
    /// expected) times the activation derivative at the node's own
    /// activation value. Hidden deltas propagate backward through the
    /// pre-update weights; only then are weights and biases stepped.
    /// The per-boundary scalar bias steps by the MEAN of the destination
    /// layer's deltas, scaled by the learning rate.
    pub fn update(&mut self, learning_rate: f64, expected: &[f64]) -> Result<()> {
        let last = self.topology.layer_total() - 1;
        if expected.len() != self.topology.output_size() {
            return Err(NetworkError::ShapeMismatch(format!(
                "expected output has {} values but the output layer has {} nodes",
                expected.len(),
                self.topology.output_size()
            )));
        }

        let output_activation = self.topology.activation(last);
        for (node, &target) in expected.iter().enumerate() {
            let predicted = self.nodes.get(last, node);
            let delta = self.loss.derivative(predicted, target)
                * output_activation.derivative(predicted);
            self.deltas.set(last, node, delta);
        }

        for layer in (1..last).rev() {
            let activation = self.topology.activation(layer);
            let downstream = self.topology.layer_size(layer + 1);
            for node in 0..self.topology.layer_size(layer) {
                let mut sum = 0.0;
                for dest in 0..downstream {
                    sum += self.weights.get(layer, dest, node) * self.deltas.get(layer + 1, dest);
                }
                let delta = activation.derivative(self.nodes.get(layer, node)) * sum;
                self.deltas.set(layer, node, delta);
            }
        }

        for boundary in 0..self.topology.boundary_total() {
            let dst_size = self.topology.layer_size(boundary + 1);
            let src_size = self.topology.layer_size(boundary);
            let mut delta_sum = 0.0;
            for dest in 0..dst_size {
                let delta = self.deltas.get(boundary + 1, dest);
                delta_sum += delta;
                for src in 0..src_size {
                    let step = learning_rate * delta * self.nodes.get(boundary, src);
                    self.weights.add(boundary, dest, src, -step);
                }
            }
            self.biases[boundary] -= learning_rate * delta_sum / dst_size as f64;
        }

        Ok(())
    }

    /// Overwrites weights and biases in place from flat slices: weights in
    /// canonical `[layer][dest][src]` order, biases in boundary order.
    /// Fails without mutating anything when either length disagrees with
    /// the topology.
    pub fn load_wb(&mut self, weights: &[f64], biases: &[f64]) -> Result<()> {
        if weights.len() != self.topology.weight_total() {
            return Err(NetworkError::ShapeMismatch(format!(
                "{} weights supplied but the topology declares {}",
                weights.len(),
                self.topology.weight_total()
            )));
        }
        if biases.len() != self.topology.boundary_total() {
            return Err(NetworkError::ShapeMismatch(format!(
                "{} biases supplied but the topology declares {}",
                biases.len(),
                self.topology.boundary_total()
            )));
        }
        self.weights.copy_from_slice(weights);
        self.biases.copy_from_slice(biases);
        Ok(())
    }

    // ── Introspection ──────────────────────────────────────────────────

    pub fn layer_total(&self) -> usize {
        self.topology.layer_total()
    }

    pub fn node_total(&self) -> usize {
        self.topology.node_total()
    }

    pub fn weight_total(&self) -> usize {
        self.topology.weight_total()
    }

    pub fn node_per_layer(&self) -> &[usize] {
        self.topology.node_per_layer()
    }

    pub fn activations(&self) -> &[Activation] {
        self.topology.activations()
    }

    pub fn loss(&self) -> &Loss {
        &self.loss
    }

    /// The loss identifier; `None` for a custom loss.
    pub fn loss_name(&self) -> Option<&'static str> {
        self.loss.name()
    }

    pub(crate) fn biases(&self) -> &[f64] {
        &self.biases
    }

    pub(crate) fn weights(&self) -> &WeightTensor {
        &self.weights
    }

    /// The weight connecting source node `src` in `layer` to destination
    /// node `dest` in `layer + 1`.
    pub fn weight(&self, layer: usize, dest: usize, src: usize) -> Result<f64> {
        if layer >= self.topology.boundary_total()
            || dest >= self.topology.layer_size(layer + 1)
            || src >= self.topology.layer_size(layer)
        {
            return Err(NetworkError::OutOfRange(format!(
                "no weight at ({layer}, {dest}, {src})"
            )));
        }
        Ok(self.weights.get(layer, dest, src))
    }

    /// The shared bias of the boundary between `layer` and `layer + 1`.
    pub fn bias(&self, layer: usize) -> Result<f64> {
        if layer >= self.topology.boundary_total() {
            return Err(NetworkError::OutOfRange(format!("no bias at {layer}")));
        }
        Ok(self.biases[layer])
    }

    /// Prints topology, function selections, and every parameter value.
    pub fn info(&self) {
        println!(
            "dense network: {} layers, {} nodes, {} weights",
            self.layer_total(),
            self.node_total(),
            self.weight_total()
        );
        println!("loss: {}", self.loss_name().unwrap_or("<custom>"));
        for (layer, &size) in self.node_per_layer().iter().enumerate() {
            println!(
                "  layer {layer}: {size} nodes, activation {}",
                self.topology.activation(layer).name().unwrap_or("<custom>")
            );
        }
        for boundary in 0..self.topology.boundary_total() {
            println!("  bias[{boundary}] = {}", self.biases[boundary]);
            for dest in 0..self.topology.layer_size(boundary + 1) {
                for src in 0..self.topology.layer_size(boundary) {
                    println!(
                        "  weight[{boundary}][{dest}][{src}] = {}",
                        self.weights.get(boundary, dest, src)
                    );
                }
            }
        }
    }

    /// Prints the node buffer as of the most recent forward pass.
    pub fn print_nodes(&self) {
        for layer in 0..self.layer_total() {
            println!("layer {layer}: {:?}", self.nodes.layer(layer));
        }
    }
}
