pub mod tensor;

pub use tensor::{LayerBuffer, WeightTensor};
