pub mod model;
pub mod distribution;

pub use distribution::Distribution;
pub use model::{LinkGraph, LinkGraphBuilder, NodeKey};
