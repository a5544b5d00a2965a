// 两种估计器的一致性测试
// 足够多的采样下，每个节点的差都应在 0.02 以内

use rs_pagerank::algorithms::{IterativeEstimator, SamplingEstimator};
use rs_pagerank::{iterate_rank, LinkGraph, RankComparison};

fn agreement_graphs() -> Vec<LinkGraph<String>> {
    let mixed = LinkGraph::from_links(
        vec![
            ("a", vec!["b", "c", "d"]),
            ("b", vec!["c"]),
            ("c", vec!["a"]),
            ("d", vec![]),
            ("e", vec!["a", "d"]),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.into_iter().map(String::from).collect::<Vec<_>>())),
    )
    .unwrap();

    // 1 -> 2, 2 -> 1,3, 3 -> 2,4, 4 -> 2
    let chain = LinkGraph::from_links(vec![
        ("1.html".to_string(), vec!["2.html".to_string()]),
        (
            "2.html".to_string(),
            vec!["1.html".to_string(), "3.html".to_string()],
        ),
        (
            "3.html".to_string(),
            vec!["2.html".to_string(), "4.html".to_string()],
        ),
        ("4.html".to_string(), vec!["2.html".to_string()]),
    ])
    .unwrap();

    vec![mixed, chain]
}

#[test]
fn test_sampling_agrees_with_iteration() {
    for (i, graph) in agreement_graphs().iter().enumerate() {
        let sampled = SamplingEstimator::new()
            .with_damping(0.85)
            .with_samples(200_000)
            .with_seed(100 + i as u64)
            .run(graph)
            .unwrap();
        let iterated = iterate_rank(graph, 0.85, 0.001).unwrap();

        for (node, exact) in iterated.iter() {
            let estimate = sampled.ranks.get(node).unwrap();
            assert!(
                (estimate - exact).abs() < 0.02,
                "graph {} node {}: sampled {} vs iterated {}",
                i,
                node,
                estimate,
                exact
            );
        }
    }
}

#[test]
fn test_sink_graph_agreement() {
    let graph = LinkGraph::from_links(vec![("A", vec!["B"]), ("B", vec![])]).unwrap();
    let sampled = SamplingEstimator::new()
        .with_samples(100_000)
        .with_seed(7)
        .run(&graph)
        .unwrap();
    let iterated = IterativeEstimator::new().run(&graph).unwrap();

    let comparison = RankComparison::new(sampled, iterated);
    assert!(comparison.agrees_within(0.02));

    let (_, worst) = comparison.max_divergence().unwrap();
    assert!(worst < 0.02);
}

#[test]
fn test_comparison_flags_divergence() {
    let graph = LinkGraph::from_links(vec![("A", vec!["B"]), ("B", vec![])]).unwrap();

    // 极少的采样几乎不可能落在不动点附近
    let sampled = SamplingEstimator::new()
        .with_samples(1)
        .with_seed(1)
        .run(&graph)
        .unwrap();
    let iterated = IterativeEstimator::new().run(&graph).unwrap();

    let comparison = RankComparison::new(sampled, iterated);
    assert!(!comparison.agrees_within(0.02));
    assert!(comparison.max_divergence().unwrap().1 > 0.3);
}
