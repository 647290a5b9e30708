pub mod network;
pub mod saved;
pub mod topology;

pub use network::Network;
pub use saved::SavedModel;
pub use topology::Topology;
