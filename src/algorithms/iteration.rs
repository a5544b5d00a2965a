//! 迭代法 PageRank
//!
//! 从均匀分布出发反复松弛，直到相邻两轮的最大绝对差小于阈值。
//! 每一轮都基于上一轮的完整快照计算（Jacobi 式同步更新），
//! 新值写入第二个缓冲区，轮次结束时交换。

use crate::config::{RankConfig, DEFAULT_EPSILON};
use crate::error::{check_damping, check_epsilon, RankError, Result};
use crate::graph::{Distribution, LinkGraph, NodeKey};
use rayon::prelude::*;
use tracing::{debug, trace, warn};

/// 迭代结果
#[derive(Debug, Clone)]
pub struct IterationResult<N: NodeKey> {
    pub ranks: Distribution<N>,
    /// 实际执行的轮数
    pub iterations: usize,
    /// 最后一轮的最大绝对差
    pub delta: f64,
    /// 是否在轮数上限之前收敛
    pub converged: bool,
}

/// 迭代估计器
#[derive(Debug, Clone)]
pub struct IterativeEstimator {
    /// 阻尼系数
    pub damping: f64,
    /// 收敛阈值
    pub epsilon: f64,
    /// 最大轮数
    pub max_iterations: usize,
    /// 每一轮内部是否按节点并行
    pub parallel: bool,
}

impl Default for IterativeEstimator {
    fn default() -> Self {
        Self::from_config(&RankConfig::default())
    }
}

impl IterativeEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            epsilon: config.epsilon,
            max_iterations: config.max_iterations,
            parallel: true,
        }
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// 从均匀分布 `1/N` 开始迭代
    pub fn run<N: NodeKey>(&self, graph: &LinkGraph<N>) -> Result<IterationResult<N>> {
        let n = graph.node_count();
        self.iterate(graph, vec![1.0 / n as f64; n])
    }

    /// 从给定分布开始迭代，分布必须恰好覆盖图中所有节点
    pub fn run_from<N: NodeKey>(
        &self,
        graph: &LinkGraph<N>,
        initial: &Distribution<N>,
    ) -> Result<IterationResult<N>> {
        let start = initial
            .to_dense(graph)
            .ok_or(RankError::DistributionMismatch {
                expected: graph.node_count(),
                found: initial.len(),
            })?;
        self.iterate(graph, start)
    }

    fn iterate<N: NodeKey>(
        &self,
        graph: &LinkGraph<N>,
        mut ranks: Vec<f64>,
    ) -> Result<IterationResult<N>> {
        check_damping(self.damping)?;
        check_epsilon(self.epsilon)?;

        let mut next = vec![0.0; ranks.len()];
        let mut iterations = 0;
        let mut delta = f64::INFINITY;

        while iterations < self.max_iterations {
            iterations += 1;

            self.pass(graph, &ranks, &mut next);

            delta = ranks
                .iter()
                .zip(next.iter())
                .map(|(old, new)| (old - new).abs())
                .fold(0.0, f64::max);

            let sum: f64 = next.iter().sum();
            trace!(iteration = iterations, delta, sum, "pass finished");
            debug_assert!((sum - 1.0).abs() < 1e-6, "rank mass drifted to {}", sum);

            // 收敛时返回新值；否则新值成为下一轮的快照
            std::mem::swap(&mut ranks, &mut next);
            if delta < self.epsilon {
                break;
            }
        }

        let converged = delta < self.epsilon;
        if converged {
            debug!(iterations, delta, "iteration converged");
        } else {
            warn!(
                iterations,
                delta,
                epsilon = self.epsilon,
                "iteration stopped at the pass limit before converging"
            );
        }

        Ok(IterationResult {
            ranks: Distribution::from_dense(graph, &ranks),
            iterations,
            delta,
            converged,
        })
    }

    /// 计算一轮：`next` 完全由只读快照 `ranks` 决定
    fn pass<N: NodeKey>(&self, graph: &LinkGraph<N>, ranks: &[f64], next: &mut [f64]) {
        let n = graph.node_count() as f64;
        let damping = self.damping;

        // 汇点把全部质量均摊到所有节点
        let sink_share: f64 = graph.sinks().iter().map(|&s| ranks[s]).sum::<f64>() / n;
        let base = (1.0 - damping) / n;

        let update = |p: usize| -> f64 {
            let incoming: f64 = graph
                .in_links(p)
                .iter()
                .map(|&q| ranks[q] / graph.out_degree(q) as f64)
                .sum();
            base + damping * (incoming + sink_share)
        };

        if self.parallel {
            next.par_iter_mut()
                .enumerate()
                .for_each(|(p, value)| *value = update(p));
        } else {
            for (p, value) in next.iter_mut().enumerate() {
                *value = update(p);
            }
        }
    }
}

/// 以默认轮数上限迭代到收敛，返回排名分布
pub fn iterate_rank<N: NodeKey>(
    graph: &LinkGraph<N>,
    damping: f64,
    epsilon: f64,
) -> Result<Distribution<N>> {
    IterativeEstimator::new()
        .with_damping(damping)
        .with_epsilon(epsilon)
        .run(graph)
        .map(|result| result.ranks)
}

/// 使用默认阈值 0.001 的 [`iterate_rank`]
pub fn iterate_rank_default<N: NodeKey>(
    graph: &LinkGraph<N>,
    damping: f64,
) -> Result<Distribution<N>> {
    iterate_rank(graph, damping, DEFAULT_EPSILON)
}
