pub mod network;
pub mod persistence;

pub use network::Network;
