//! 错误类型
//!
//! 所有输入校验错误都在计算开始之前返回，算法本身对合法输入是全函数

use std::path::PathBuf;
use thiserror::Error;

/// 排名计算错误
#[derive(Debug, Error)]
pub enum RankError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("damping factor must lie in (0, 1), got {0}")]
    InvalidDamping(f64),

    #[error("sample count must be at least 1, got {0}")]
    InvalidSampleCount(usize),

    #[error("convergence epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f64),

    #[error("walk count must be between 1 and the sample count ({samples}), got {walks}")]
    InvalidWalkCount { walks: usize, samples: usize },

    #[error("link from {from} points to {to}, which is not a node of the graph")]
    DanglingLink { from: String, to: String },

    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    #[error("distribution covers {found} nodes, graph has {expected}")]
    DistributionMismatch { expected: usize, found: usize },

    #[error("failed to read corpus at {}: {source}", path.display())]
    Corpus {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid link pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("ranking task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, RankError>;

/// 校验阻尼系数，必须位于开区间 (0, 1)
pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(RankError::InvalidDamping(damping))
    }
}

pub(crate) fn check_epsilon(epsilon: f64) -> Result<()> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(())
    } else {
        Err(RankError::InvalidEpsilon(epsilon))
    }
}

pub(crate) fn check_samples(samples: usize) -> Result<()> {
    if samples >= 1 {
        Ok(())
    } else {
        Err(RankError::InvalidSampleCount(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damping_bounds() {
        assert!(check_damping(0.85).is_ok());
        assert!(matches!(check_damping(0.0), Err(RankError::InvalidDamping(_))));
        assert!(matches!(check_damping(1.0), Err(RankError::InvalidDamping(_))));
        assert!(check_damping(f64::NAN).is_err());
    }

    #[test]
    fn test_epsilon_bounds() {
        assert!(check_epsilon(0.001).is_ok());
        assert!(check_epsilon(0.0).is_err());
        assert!(check_epsilon(-1.0).is_err());
        assert!(check_epsilon(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = RankError::DanglingLink {
            from: "\"a\"".into(),
            to: "\"z\"".into(),
        };
        assert_eq!(
            err.to_string(),
            "link from \"a\" points to \"z\", which is not a node of the graph"
        );
        assert_eq!(check_samples(0).unwrap_err().to_string(), "sample count must be at least 1, got 0");
    }
}
