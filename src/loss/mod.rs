pub mod loss;

pub use loss::Loss;
