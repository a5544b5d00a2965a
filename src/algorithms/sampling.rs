//! 随机游走采样估计
//!
//! 按转移模型模拟一条马尔可夫链，用各节点的访问频率估计 PageRank

use super::transition::transition_row;
use super::weighted::CumulativeWeights;
use crate::config::RankConfig;
use crate::error::{check_damping, check_samples, RankError, Result};
use crate::graph::{Distribution, LinkGraph, NodeKey};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// 采样结果
#[derive(Debug, Clone)]
pub struct SampleResult<N: NodeKey> {
    /// 估计值 = 访问次数 / 采样数
    pub ranks: Distribution<N>,
    /// 每个节点的访问次数，总和等于采样数
    pub visits: BTreeMap<N, u64>,
    pub samples: usize,
    pub walks: usize,
}

/// 随机游走采样估计器
#[derive(Debug, Clone)]
pub struct SamplingEstimator {
    /// 阻尼系数
    pub damping: f64,
    /// 采样总步数
    pub samples: usize,
    /// 随机种子
    pub seed: Option<u64>,
    /// 独立游走条数
    pub walks: usize,
}

impl Default for SamplingEstimator {
    fn default() -> Self {
        Self::from_config(&RankConfig::default())
    }
}

impl SamplingEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            samples: config.samples,
            seed: config.seed,
            walks: config.walks,
        }
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// 固定随机种子，使结果可复现
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 把采样预算拆成 `walks` 条独立的短游走并行执行
    ///
    /// 前 `samples % walks` 条游走多走一步，访问次数相加，期望频率不变。
    pub fn with_walks(mut self, walks: usize) -> Self {
        self.walks = walks;
        self
    }

    fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        check_samples(self.samples)?;
        if self.walks == 0 || self.walks > self.samples {
            return Err(RankError::InvalidWalkCount {
                walks: self.walks,
                samples: self.samples,
            });
        }
        Ok(())
    }

    /// 运行采样
    pub fn run<N: NodeKey>(&self, graph: &LinkGraph<N>) -> Result<SampleResult<N>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(graph, &mut rng)
    }

    /// 使用调用方提供的随机源运行采样
    ///
    /// 单条游走直接使用 `rng`；多条游走时从 `rng` 取一个基础种子，
    /// 第 i 条游走使用 `base + i`。
    pub fn run_with_rng<N: NodeKey, R: Rng + ?Sized>(
        &self,
        graph: &LinkGraph<N>,
        rng: &mut R,
    ) -> Result<SampleResult<N>> {
        self.validate()?;

        let n = graph.node_count();
        let mut visits = vec![0u64; n];

        if self.walks == 1 {
            walk(graph, self.damping, self.samples, rng, &mut visits)?;
        } else {
            let base: u64 = rng.gen();
            let per_walk = self.samples / self.walks;
            let extra = self.samples % self.walks;

            let partials = (0..self.walks)
                .into_par_iter()
                .map(|i| {
                    let steps = per_walk + usize::from(i < extra);
                    let mut walk_rng = StdRng::seed_from_u64(base.wrapping_add(i as u64));
                    let mut counts = vec![0u64; n];
                    walk(graph, self.damping, steps, &mut walk_rng, &mut counts)?;
                    Ok(counts)
                })
                .collect::<Result<Vec<Vec<u64>>>>()?;

            for counts in partials {
                for (total, c) in visits.iter_mut().zip(counts) {
                    *total += c;
                }
            }
        }

        debug_assert_eq!(visits.iter().sum::<u64>(), self.samples as u64);
        debug!(
            samples = self.samples,
            walks = self.walks,
            nodes = n,
            "random walk finished"
        );

        let total = self.samples as f64;
        let ranks: Vec<f64> = visits.iter().map(|&v| v as f64 / total).collect();

        Ok(SampleResult {
            ranks: Distribution::from_dense(graph, &ranks),
            visits: graph.nodes().iter().cloned().zip(visits).collect(),
            samples: self.samples,
            walks: self.walks,
        })
    }
}

/// 走 `steps` 步，把落点计入 `counts`
///
/// 第一步在全部节点中均匀选择，之后每一步都按转移模型加权抽取。
fn walk<N: NodeKey, R: Rng + ?Sized>(
    graph: &LinkGraph<N>,
    damping: f64,
    steps: usize,
    rng: &mut R,
    counts: &mut [u64],
) -> Result<()> {
    if steps == 0 {
        return Ok(());
    }

    let n = graph.node_count();
    let mut row = Vec::with_capacity(n);
    let mut table = CumulativeWeights::with_capacity(n);

    let mut current = rng.gen_range(0..n);
    counts[current] += 1;

    for _ in 1..steps {
        transition_row(graph, current, damping, &mut row);
        table.rebuild(&row)?;
        current = table.sample(rng).ok_or_else(|| {
            RankError::InvalidWeights("transition row is empty".to_string())
        })?;
        counts[current] += 1;
    }

    Ok(())
}

/// 以默认种子策略对图做 `n_samples` 步采样，返回估计分布
pub fn sample_rank<N: NodeKey>(
    graph: &LinkGraph<N>,
    damping: f64,
    n_samples: usize,
) -> Result<Distribution<N>> {
    SamplingEstimator::new()
        .with_damping(damping)
        .with_samples(n_samples)
        .run(graph)
        .map(|result| result.ranks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sample_lands_on_one_node() {
        let graph = LinkGraph::from_links(vec![("a", vec!["b"]), ("b", vec![])]).unwrap();
        let result = SamplingEstimator::new()
            .with_samples(1)
            .with_seed(1)
            .run(&graph)
            .unwrap();

        assert_eq!(result.visits.values().sum::<u64>(), 1);
        assert_eq!(result.ranks.sum(), 1.0);
    }

    #[test]
    fn test_uneven_split_keeps_total() {
        let graph = LinkGraph::from_links(vec![("a", vec!["b"]), ("b", vec!["a"])]).unwrap();
        let result = SamplingEstimator::new()
            .with_samples(1001)
            .with_walks(4)
            .with_seed(9)
            .run(&graph)
            .unwrap();

        assert_eq!(result.visits.values().sum::<u64>(), 1001);
        assert_eq!(result.walks, 4);
    }
}
