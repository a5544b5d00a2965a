use crate::error::{RankError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// 节点标识符约束：可哈希、可比较、可跨线程共享
pub trait NodeKey: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T: Clone + Eq + Hash + Ord + Debug + Send + Sync> NodeKey for T {}

/// 有向链接图
///
/// 不变式：
/// - 所有链接目标都是图中的节点
/// - 出链集合不含节点自身
/// - 出链集合无重复，按下标升序
/// - 节点按标识符升序编号，下标顺序与标识符顺序一致
/// - 构造后不可修改
#[derive(Debug, Clone)]
pub struct LinkGraph<N: NodeKey> {
    ids: Vec<N>,
    index: HashMap<N, usize>,
    out_links: Vec<Vec<usize>>,
    in_links: Vec<Vec<usize>>,
    sinks: Vec<usize>,
}

impl<N: NodeKey> LinkGraph<N> {
    /// 从 “节点 -> 出链集合” 映射构造图
    ///
    /// 自链接会被丢弃，重复链接合并；同一个源节点出现多次时出链取并集。
    /// 目标不在节点集合中时返回 [`RankError::DanglingLink`]。
    pub fn from_links<I, L>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, L)>,
        L: IntoIterator<Item = N>,
    {
        let mut adjacency: BTreeMap<N, BTreeSet<N>> = BTreeMap::new();
        for (source, targets) in links {
            let entry = adjacency.entry(source.clone()).or_default();
            entry.extend(targets.into_iter().filter(|t| *t != source));
        }

        for (source, targets) in &adjacency {
            if let Some(missing) = targets.iter().find(|t| !adjacency.contains_key(*t)) {
                return Err(RankError::DanglingLink {
                    from: format!("{:?}", source),
                    to: format!("{:?}", missing),
                });
            }
        }

        Self::from_adjacency(adjacency)
    }

    /// 创建构建器
    pub fn builder() -> LinkGraphBuilder<N> {
        LinkGraphBuilder::new()
    }

    fn from_adjacency(adjacency: BTreeMap<N, BTreeSet<N>>) -> Result<Self> {
        if adjacency.is_empty() {
            return Err(RankError::EmptyGraph);
        }

        let ids: Vec<N> = adjacency.keys().cloned().collect();
        let index: HashMap<N, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let n = ids.len();
        let mut out_links = Vec::with_capacity(n);
        let mut in_links = vec![Vec::new(); n];

        // BTreeSet 有序，且 ids 与 index 同序，所以出链下标天然升序
        for (source, (_, targets)) in adjacency.iter().enumerate() {
            let row: Vec<usize> = targets.iter().map(|t| index[t]).collect();
            for &target in &row {
                in_links[target].push(source);
            }
            out_links.push(row);
        }

        let sinks: Vec<usize> = (0..n).filter(|&i| out_links[i].is_empty()).collect();

        let graph = Self {
            ids,
            index,
            out_links,
            in_links,
            sinks,
        };

        debug!(
            nodes = graph.node_count(),
            links = graph.link_count(),
            sinks = graph.sinks.len(),
            "link graph built"
        );

        Ok(graph)
    }

    // ========== 按标识符访问 ==========

    /// 节点数量（恒大于 0）
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// 链接总数
    pub fn link_count(&self) -> usize {
        self.out_links.iter().map(Vec::len).sum()
    }

    /// 按标识符升序排列的全部节点
    pub fn nodes(&self) -> &[N] {
        &self.ids
    }

    pub fn contains(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.index.get(node).copied()
    }

    /// 节点的出链集合（标识符升序）
    pub fn links_from(&self, node: &N) -> Option<Vec<&N>> {
        self.index_of(node)
            .map(|i| self.out_links[i].iter().map(|&t| &self.ids[t]).collect())
    }

    /// 节点是否链接到目标
    pub fn has_link(&self, from: &N, to: &N) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(f), Some(t)) => self.out_links[f].binary_search(&t).is_ok(),
            _ => false,
        }
    }

    pub fn is_sink(&self, node: &N) -> Option<bool> {
        self.index_of(node).map(|i| self.out_links[i].is_empty())
    }

    // ========== 按下标访问（供算法使用） ==========

    pub fn node(&self, index: usize) -> &N {
        &self.ids[index]
    }

    pub fn out_links(&self, index: usize) -> &[usize] {
        &self.out_links[index]
    }

    /// 指向该节点的所有节点
    pub fn in_links(&self, index: usize) -> &[usize] {
        &self.in_links[index]
    }

    pub fn out_degree(&self, index: usize) -> usize {
        self.out_links[index].len()
    }

    /// 出度为 0 的节点
    pub fn sinks(&self) -> &[usize] {
        &self.sinks
    }
}

/// 增量构建链接图
///
/// 与 [`LinkGraph::from_links`] 不同，`add_link` 会自动创建缺失的端点，
/// 因此构建结果不会有悬空链接。
#[derive(Debug, Clone)]
pub struct LinkGraphBuilder<N: NodeKey> {
    adjacency: BTreeMap<N, BTreeSet<N>>,
}

impl<N: NodeKey> Default for LinkGraphBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> LinkGraphBuilder<N> {
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }

    /// 添加节点（已存在时无操作）
    pub fn add_node(&mut self, node: N) -> &mut Self {
        self.adjacency.entry(node).or_default();
        self
    }

    /// 添加一条链接，自链接只登记节点
    pub fn add_link(&mut self, from: N, to: N) -> &mut Self {
        self.adjacency.entry(to.clone()).or_default();
        let targets = self.adjacency.entry(from.clone()).or_default();
        if from != to {
            targets.insert(to);
        }
        self
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn build(self) -> Result<LinkGraph<N>> {
        LinkGraph::from_adjacency(self.adjacency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_order_follows_identifier_order() {
        let graph = LinkGraph::from_links(vec![
            ("c", vec!["a"]),
            ("a", vec!["b"]),
            ("b", vec![]),
        ])
        .unwrap();

        assert_eq!(graph.nodes(), &["a", "b", "c"]);
        assert_eq!(graph.index_of(&"c"), Some(2));
        assert_eq!(graph.in_links(0), &[2]);
        assert_eq!(graph.sinks(), &[1]);
    }

    #[test]
    fn test_repeated_source_is_unioned() {
        let graph = LinkGraph::from_links(vec![
            (1u32, vec![2]),
            (1, vec![3]),
            (2, vec![]),
            (3, vec![]),
        ])
        .unwrap();

        assert_eq!(graph.out_degree(0), 2);
        assert_eq!(graph.link_count(), 2);
    }

    #[test]
    fn test_builder_creates_missing_endpoints() {
        let mut builder = LinkGraph::builder();
        builder.add_link("x", "y").add_link("y", "y");
        let graph = builder.build().unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.is_sink(&"y"), Some(true));
        assert!(graph.has_link(&"x", &"y"));
    }
}
