use rand::prelude::*;

/// Weights for every adjacent layer boundary, stored as one contiguous
/// buffer with per-boundary offsets.
///
/// Boundary `l` connects layer `l` (source) to layer `l + 1` (destination).
/// The weight from source node `src` to destination node `dest` lives at
/// `offsets[l] + dest * src_size[l] + src`, so the flat buffer enumerates
/// weights in `[layer][dest][src]` order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTensor {
    data: Vec<f64>,
    offsets: Vec<usize>,
    src_sizes: Vec<usize>,
    dst_sizes: Vec<usize>,
}

impl WeightTensor {
    /// Allocates a zeroed tensor for the given layer sizes.
    pub fn zeros(node_per_layer: &[usize]) -> WeightTensor {
        let boundaries = node_per_layer.len().saturating_sub(1);
        let mut offsets = Vec::with_capacity(boundaries);
        let mut src_sizes = Vec::with_capacity(boundaries);
        let mut dst_sizes = Vec::with_capacity(boundaries);
        let mut total = 0;
        for l in 0..boundaries {
            offsets.push(total);
            src_sizes.push(node_per_layer[l]);
            dst_sizes.push(node_per_layer[l + 1]);
            total += node_per_layer[l] * node_per_layer[l + 1];
        }
        WeightTensor {
            data: vec![0.0; total],
            offsets,
            src_sizes,
            dst_sizes,
        }
    }

    /// Allocates a tensor with every weight drawn uniformly from [-1, 1).
    pub fn random(node_per_layer: &[usize]) -> WeightTensor {
        let mut tensor = WeightTensor::zeros(node_per_layer);
        let mut rng = rand::thread_rng();
        for w in &mut tensor.data {
            *w = rng.gen::<f64>() * 2.0 - 1.0;
        }
        tensor
    }

    fn index(&self, layer: usize, dest: usize, src: usize) -> usize {
        debug_assert!(layer < self.offsets.len());
        debug_assert!(dest < self.dst_sizes[layer]);
        debug_assert!(src < self.src_sizes[layer]);
        self.offsets[layer] + dest * self.src_sizes[layer] + src
    }

    pub fn get(&self, layer: usize, dest: usize, src: usize) -> f64 {
        self.data[self.index(layer, dest, src)]
    }

    pub fn set(&mut self, layer: usize, dest: usize, src: usize, value: f64) {
        let i = self.index(layer, dest, src);
        self.data[i] = value;
    }

    pub fn add(&mut self, layer: usize, dest: usize, src: usize, value: f64) {
        let i = self.index(layer, dest, src);
        self.data[i] += value;
    }

    /// Total number of weights across all boundaries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All weights in canonical `[layer][dest][src]` order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Overwrites every weight from a flat slice in canonical order.
    /// The caller validates the length beforehand.
    pub fn copy_from_slice(&mut self, weights: &[f64]) {
        self.data.copy_from_slice(weights);
    }
}

/// One scalar per node, for every layer, stored as one contiguous buffer
/// with per-layer offsets. Used for both node activations and deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerBuffer {
    data: Vec<f64>,
    offsets: Vec<usize>,
    sizes: Vec<usize>,
}

impl LayerBuffer {
    pub fn zeros(node_per_layer: &[usize]) -> LayerBuffer {
        let mut offsets = Vec::with_capacity(node_per_layer.len());
        let mut total = 0;
        for &size in node_per_layer {
            offsets.push(total);
            total += size;
        }
        LayerBuffer {
            data: vec![0.0; total],
            offsets,
            sizes: node_per_layer.to_vec(),
        }
    }

    pub fn layer(&self, layer: usize) -> &[f64] {
        let start = self.offsets[layer];
        &self.data[start..start + self.sizes[layer]]
    }

    pub fn layer_mut(&mut self, layer: usize) -> &mut [f64] {
        let start = self.offsets[layer];
        &mut self.data[start..start + self.sizes[layer]]
    }

    pub fn get(&self, layer: usize, node: usize) -> f64 {
        debug_assert!(node < self.sizes[layer]);
        self.data[self.offsets[layer] + node]
    }

    pub fn set(&mut self, layer: usize, node: usize, value: f64) {
        debug_assert!(node < self.sizes[layer]);
        self.data[self.offsets[layer] + node] = value;
    }

    /// Total number of nodes across all layers.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_tensor_layout() {
        // 2-3-1 topology: boundary 0 has 3x2 = 6 weights, boundary 1 has 1x3 = 3.
        let mut t = WeightTensor::zeros(&[2, 3, 1]);
        assert_eq!(t.len(), 9);

        t.set(0, 2, 1, 0.5);
        t.set(1, 0, 2, -0.25);
        assert_eq!(t.get(0, 2, 1), 0.5);
        assert_eq!(t.get(1, 0, 2), -0.25);

        // Boundary 0 enumerates dest-major: [d0s0, d0s1, d1s0, d1s1, d2s0, d2s1].
        assert_eq!(t.as_slice()[5], 0.5);
        assert_eq!(t.as_slice()[8], -0.25);
    }

    #[test]
    fn weight_tensor_copy_from_slice() {
        let mut t = WeightTensor::zeros(&[2, 2]);
        t.copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(t.get(0, 0, 0), 1.0);
        assert_eq!(t.get(0, 0, 1), 2.0);
        assert_eq!(t.get(0, 1, 0), 3.0);
        assert_eq!(t.get(0, 1, 1), 4.0);
    }

    #[test]
    fn weight_tensor_random_in_range() {
        let t = WeightTensor::random(&[4, 8, 2]);
        assert_eq!(t.len(), 4 * 8 + 8 * 2);
        assert!(t.as_slice().iter().all(|w| (-1.0..1.0).contains(w)));
    }

    #[test]
    fn layer_buffer_layout() {
        let mut b = LayerBuffer::zeros(&[2, 3]);
        assert_eq!(b.len(), 5);

        b.layer_mut(1).copy_from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(b.layer(0), &[0.0, 0.0]);
        assert_eq!(b.layer(1), &[1.0, 2.0, 3.0]);
        assert_eq!(b.get(1, 2), 3.0);

        b.set(0, 1, 9.0);
        assert_eq!(b.layer(0), &[0.0, 9.0]);
    }
}
