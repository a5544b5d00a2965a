//! 排名报告
//!
//! 按标识符排序，保留 4 位小数输出；同时提供两种估计结果的一致性比较

use crate::algorithms::{IterationResult, SampleResult};
use crate::graph::{Distribution, NodeKey};
use serde::Serialize;
use std::fmt;

/// 报告中的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub node: String,
    pub rank: f64,
}

/// 带标题的排名报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankReport {
    pub title: String,
    pub entries: Vec<ReportEntry>,
}

impl RankReport {
    pub fn new<N: NodeKey + fmt::Display>(title: impl Into<String>, ranks: &Distribution<N>) -> Self {
        Self {
            title: title.into(),
            entries: ranks
                .iter()
                .map(|(node, rank)| ReportEntry {
                    node: node.to_string(),
                    rank,
                })
                .collect(),
        }
    }

    /// 采样结果报告，标题中带采样数
    pub fn sampled<N: NodeKey + fmt::Display>(result: &SampleResult<N>) -> Self {
        Self::new(
            format!("PageRank Results from Sampling (n = {})", result.samples),
            &result.ranks,
        )
    }

    pub fn iterated<N: NodeKey + fmt::Display>(result: &IterationResult<N>) -> Self {
        Self::new("PageRank Results from Iteration", &result.ranks)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RankReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for entry in &self.entries {
            writeln!(f, "  {}: {:.4}", entry.node, entry.rank)?;
        }
        Ok(())
    }
}

/// 两种估计结果放在一起比较，但从不合并
#[derive(Debug, Clone)]
pub struct RankComparison<N: NodeKey> {
    pub sampled: SampleResult<N>,
    pub iterated: IterationResult<N>,
}

impl<N: NodeKey> RankComparison<N> {
    pub fn new(sampled: SampleResult<N>, iterated: IterationResult<N>) -> Self {
        Self { sampled, iterated }
    }

    /// 分歧最大的节点及其绝对差
    pub fn max_divergence(&self) -> Option<(&N, f64)> {
        self.iterated
            .ranks
            .iter()
            .map(|(node, exact)| {
                let estimate = self.sampled.ranks.get(node).unwrap_or(0.0);
                (node, (exact - estimate).abs())
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// 每个节点的差都不超过 `tolerance`
    pub fn agrees_within(&self, tolerance: f64) -> bool {
        self.max_divergence()
            .map_or(true, |(_, diff)| diff <= tolerance)
    }
}

impl<N: NodeKey + fmt::Display> RankComparison<N> {
    pub fn reports(&self) -> [RankReport; 2] {
        [
            RankReport::sampled(&self.sampled),
            RankReport::iterated(&self.iterated),
        ]
    }
}
