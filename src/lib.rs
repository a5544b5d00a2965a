pub mod error;
pub mod config;
pub mod graph;
pub mod algorithms;
pub mod report;
pub mod corpus;
pub mod concurrent;

pub use crate::algorithms::{iterate_rank, sample_rank, transition_model};
pub use crate::concurrent::rank_concurrently;
pub use crate::config::RankConfig;
pub use crate::error::{RankError, Result};
pub use crate::graph::{Distribution, LinkGraph, NodeKey};
pub use crate::report::{RankComparison, RankReport};
