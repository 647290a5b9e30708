use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::activation::Activation;
use crate::error::{NetworkError, Result};
use crate::loss::Loss;
use crate::network::network::Network;
use crate::network::topology::Topology;

/// The persisted form of a trained network: a self-describing record of
/// the loss identifier, layer sizes, per-layer activation identifiers,
/// every weight in canonical `[layer][dest][src]` order, and every bias in
/// boundary order. Written as pretty-printed JSON, so a save/load/save
/// cycle is byte-identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedModel {
    pub loss: String,
    pub layers: Vec<usize>,
    pub activations: Vec<String>,
    pub weights: Vec<f64>,
    pub biases: Vec<f64>,
}

impl SavedModel {
    /// Snapshots a network. Fails when the network carries custom
    /// (unnamed) loss or activation functions, since those cannot be
    /// restored from identifiers.
    pub fn from_network(network: &Network) -> Result<SavedModel> {
        let loss = network
            .loss_name()
            .ok_or_else(|| {
                NetworkError::Format("a custom loss function cannot be saved".to_string())
            })?
            .to_string();
        let activations = network
            .activations()
            .iter()
            .map(|activation| {
                activation.name().map(str::to_string).ok_or_else(|| {
                    NetworkError::Format(
                        "a custom activation function cannot be saved".to_string(),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SavedModel {
            loss,
            layers: network.node_per_layer().to_vec(),
            activations,
            weights: network.weights().as_slice().to_vec(),
            biases: network.biases().to_vec(),
        })
    }

    /// Reconstructs a network, validating internal consistency first; a
    /// declared-size disagreement is a format error, never a truncation.
    pub fn into_network(self) -> Result<Network> {
        let loss = Loss::from_name(&self.loss)?;
        let activations = self
            .activations
            .iter()
            .map(|name| Activation::from_name(name))
            .collect::<Result<Vec<_>>>()?;
        let topology = Topology::new(self.layers, activations).map_err(|err| {
            NetworkError::Format(format!("inconsistent topology: {err}"))
        })?;
        if self.weights.len() != topology.weight_total() {
            return Err(NetworkError::Format(format!(
                "{} weights in file but the declared layer sizes need {}",
                self.weights.len(),
                topology.weight_total()
            )));
        }
        if self.biases.len() != topology.boundary_total() {
            return Err(NetworkError::Format(format!(
                "{} biases in file but the declared layer sizes need {}",
                self.biases.len(),
                topology.boundary_total()
            )));
        }
        let mut network = Network::from_parts(topology, loss);
        network.load_wb(&self.weights, &self.biases)?;
        Ok(network)
    }
}

impl Network {
    /// Serializes the network to a pretty-printed JSON text file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let model = SavedModel::from_network(self)?;
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &model)?;
        Ok(())
    }

    /// Reconstructs a network from a file previously written by `save`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Network> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let model: SavedModel = serde_json::from_reader(reader)?;
        model.into_network()
    }

    /// Replaces this network with the one persisted at `path`. On any
    /// error the existing network is left untouched.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        *self = Network::from_file(path)?;
        Ok(())
    }
}
