pub mod weighted;
pub mod transition;
pub mod sampling;
pub mod iteration;

pub use weighted::CumulativeWeights;
pub use transition::{transition_model, transition_row};
pub use sampling::{sample_rank, SampleResult, SamplingEstimator};
pub use iteration::{iterate_rank, iterate_rank_default, IterationResult, IterativeEstimator};
