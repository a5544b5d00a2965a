//! 排名配置
//!
//! 阻尼系数、采样数、收敛阈值是仅有的可调参数；
//! seed / walks / max_iterations 只影响执行方式，不改变估计的量

use crate::error::{check_damping, check_epsilon, check_samples, RankError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_SAMPLES: usize = 10_000;
pub const DEFAULT_EPSILON: f64 = 0.001;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// 排名配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// 阻尼系数，开区间 (0, 1)
    pub damping: f64,

    /// 随机游走采样步数
    pub samples: usize,

    /// 迭代收敛阈值（相邻两轮的最大绝对差）
    pub epsilon: f64,

    /// 随机种子，None 时从系统熵初始化
    pub seed: Option<u64>,

    /// 把采样拆成多少条独立游走
    pub walks: usize,

    /// 迭代轮数上限
    pub max_iterations: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
            epsilon: DEFAULT_EPSILON,
            seed: None,
            walks: 1,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RankConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_walks(mut self, walks: usize) -> Self {
        self.walks = walks;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// 校验全部参数
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        check_samples(self.samples)?;
        check_epsilon(self.epsilon)?;
        if self.walks == 0 || self.walks > self.samples {
            return Err(RankError::InvalidWalkCount {
                walks: self.walks,
                samples: self.samples,
            });
        }
        Ok(())
    }
}
