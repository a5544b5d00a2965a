use crate::algorithms::{IterativeEstimator, SamplingEstimator};
use crate::config::RankConfig;
use crate::error::{RankError, Result};
use crate::graph::{LinkGraph, NodeKey};
use crate::report::RankComparison;
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::info;

/// 同时运行两种估计器
///
/// 两个估计器都是纯计算，各自放到 tokio 的阻塞线程池中执行，
/// 共享同一个只读图：
/// - 采样估计器在自己的线程中顺序游走（或按 walks 拆分后并行）
/// - 迭代估计器在每一轮内部按节点并行
pub async fn rank_concurrently<N: NodeKey + 'static>(
    graph: Arc<LinkGraph<N>>,
    config: RankConfig,
) -> Result<RankComparison<N>> {
    config.validate()?;

    let sampler = SamplingEstimator::from_config(&config);
    let iterator = IterativeEstimator::from_config(&config);

    let sample_graph = Arc::clone(&graph);
    let sample_task = tokio::task::spawn_blocking(move || sampler.run(&sample_graph));

    let iterate_graph = Arc::clone(&graph);
    let iterate_task = tokio::task::spawn_blocking(move || iterator.run(&iterate_graph));

    let (sampled, iterated) = tokio::join!(sample_task, iterate_task);
    let sampled = sampled.map_err(task_error)??;
    let iterated = iterated.map_err(task_error)??;

    info!(
        nodes = graph.node_count(),
        samples = sampled.samples,
        iterations = iterated.iterations,
        converged = iterated.converged,
        "ranking finished"
    );

    Ok(RankComparison::new(sampled, iterated))
}

fn task_error(err: JoinError) -> RankError {
    RankError::Task(err.to_string())
}
