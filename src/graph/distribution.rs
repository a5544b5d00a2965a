//! 概率分布
//!
//! 节点到非负实数的有序映射，转移模型和两种估计器都返回它

use crate::graph::model::{LinkGraph, NodeKey};
use serde::Serialize;
use std::collections::BTreeMap;

/// 节点上的概率分布，按标识符有序
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Distribution<N: NodeKey> {
    values: BTreeMap<N, f64>,
}

impl<N: NodeKey> Distribution<N> {
    /// 按图的节点顺序把稠密数组转换成分布
    pub(crate) fn from_dense(graph: &LinkGraph<N>, values: &[f64]) -> Self {
        Self {
            values: graph
                .nodes()
                .iter()
                .cloned()
                .zip(values.iter().copied())
                .collect(),
        }
    }

    /// 按图的节点顺序展开成稠密数组，缺失的节点记为 None
    pub(crate) fn to_dense(&self, graph: &LinkGraph<N>) -> Option<Vec<f64>> {
        if self.values.len() != graph.node_count() {
            return None;
        }
        graph
            .nodes()
            .iter()
            .map(|id| self.values.get(id).copied())
            .collect()
    }

    pub fn get(&self, node: &N) -> Option<f64> {
        self.values.get(node).copied()
    }

    /// 按标识符升序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&N, f64)> {
        self.values.iter().map(|(k, &v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.values.values().sum()
    }

    /// 两个分布在公共节点上的最大绝对差
    ///
    /// 只出现在一侧的节点按另一侧取 0 计算。
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        let left = self
            .values
            .iter()
            .map(|(k, &v)| (v - other.get(k).unwrap_or(0.0)).abs());
        let right = other
            .values
            .iter()
            .filter(|(k, _)| !self.values.contains_key(*k))
            .map(|(_, &v)| v.abs());
        left.chain(right).fold(0.0, f64::max)
    }

    /// 排名最高的前 n 个节点，分数相同时按标识符升序
    pub fn top_n(&self, n: usize) -> Vec<(&N, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    pub fn into_map(self) -> BTreeMap<N, f64> {
        self.values
    }
}
