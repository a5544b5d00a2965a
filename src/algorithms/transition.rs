use crate::error::{check_damping, RankError, Result};
use crate::graph::{Distribution, LinkGraph, NodeKey};

/// 计算从 `node` 出发的下一跳分布
///
/// - 汇点（没有出链）：所有节点均为 `1/N`，忽略阻尼系数
/// - 其他节点：非目标节点为 `(1-d)/N`，出链目标为 `(1-d)/N + d/|out|`
///
/// 结果总和为 1。
pub fn transition_model<N: NodeKey>(
    graph: &LinkGraph<N>,
    node: &N,
    damping: f64,
) -> Result<Distribution<N>> {
    check_damping(damping)?;
    let index = graph
        .index_of(node)
        .ok_or_else(|| RankError::UnknownNode(format!("{:?}", node)))?;

    let mut row = Vec::with_capacity(graph.node_count());
    transition_row(graph, index, damping, &mut row);
    Ok(Distribution::from_dense(graph, &row))
}

/// 按下标把转移概率写入 `row`，调用方负责校验参数
pub fn transition_row<N: NodeKey>(
    graph: &LinkGraph<N>,
    index: usize,
    damping: f64,
    row: &mut Vec<f64>,
) {
    let n = graph.node_count();
    let targets = graph.out_links(index);

    row.clear();
    if targets.is_empty() {
        row.resize(n, 1.0 / n as f64);
        return;
    }

    let teleport = (1.0 - damping) / n as f64;
    let follow = damping / targets.len() as f64;

    row.resize(n, teleport);
    for &t in targets {
        row[t] += follow;
    }
}
