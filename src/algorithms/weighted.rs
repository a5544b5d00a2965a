use crate::error::{RankError, Result};
use rand::Rng;

/// 累积权重表：一次性构建，再用二分查找把均匀随机数映射到下标
#[derive(Debug, Clone)]
pub struct CumulativeWeights {
    cumulative: Vec<f64>,
}

impl CumulativeWeights {
    /// 从权重构建，权重必须有限、非负且总和大于 0
    pub fn new(weights: &[f64]) -> Result<Self> {
        let mut table = Self::with_capacity(weights.len());
        table.rebuild(weights)?;
        Ok(table)
    }

    /// 创建空表，调用 [`rebuild`](Self::rebuild) 之后才能抽样
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cumulative: Vec::with_capacity(capacity),
        }
    }

    /// 复用已有缓冲区重建权重表
    ///
    /// 权重不合法时返回错误，原有的表保持不变。
    pub fn rebuild(&mut self, weights: &[f64]) -> Result<()> {
        if let Some((i, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(RankError::InvalidWeights(format!(
                "weight {} at position {} is not a finite non-negative number",
                w, i
            )));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(RankError::InvalidWeights(
                "weights must have a positive total".to_string(),
            ));
        }

        self.cumulative.clear();
        let mut running = 0.0;
        for &w in weights {
            running += w;
            self.cumulative.push(running);
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// 把 [0, 1) 中的 `u` 映射到一个下标
    ///
    /// 返回第一个累积权重严格大于 `u * total` 的位置，权重为 0 的项永远不会被选中。
    /// 空表返回 None。
    pub fn pick(&self, u: f64) -> Option<usize> {
        let last = self.cumulative.len().checked_sub(1)?;
        let target = u * self.total();
        let idx = self.cumulative.partition_point(|&c| c <= target);
        Some(idx.min(last))
    }

    /// 按权重随机抽取一个下标
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        self.pick(rng.gen::<f64>())
    }
}
