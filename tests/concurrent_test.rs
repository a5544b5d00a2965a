// 并发运行与报告测试

use rs_pagerank::{rank_concurrently, LinkGraph, RankConfig, RankError, RankReport};
use std::sync::Arc;

fn corpus_graph() -> Arc<LinkGraph<String>> {
    let mut builder = LinkGraph::builder();
    for (from, to) in [
        ("1.html", "2.html"),
        ("2.html", "1.html"),
        ("2.html", "3.html"),
        ("3.html", "2.html"),
        ("3.html", "4.html"),
        ("4.html", "2.html"),
    ] {
        builder.add_link(from.to_string(), to.to_string());
    }
    Arc::new(builder.build().unwrap())
}

// ==================== 并发运行 ====================

#[tokio::test]
async fn test_rank_concurrently_agrees() {
    let config = RankConfig::new().with_samples(100_000).with_seed(17);
    let comparison = rank_concurrently(corpus_graph(), config).await.unwrap();

    assert_eq!(comparison.sampled.samples, 100_000);
    assert!(comparison.iterated.converged);
    assert!(comparison.agrees_within(0.02));
}

#[tokio::test]
async fn test_rank_concurrently_shares_graph() {
    let graph = corpus_graph();
    let config = RankConfig::new().with_samples(1000).with_seed(1).with_walks(4);

    let comparison = rank_concurrently(Arc::clone(&graph), config).await.unwrap();

    // 两个任务结束后只剩调用方持有图
    assert_eq!(Arc::strong_count(&graph), 1);
    assert_eq!(comparison.sampled.ranks.len(), graph.node_count());
    assert_eq!(comparison.iterated.ranks.len(), graph.node_count());
}

#[tokio::test]
async fn test_rank_concurrently_validates_config() {
    let result = rank_concurrently(corpus_graph(), RankConfig::new().with_damping(1.0)).await;
    assert!(matches!(result, Err(RankError::InvalidDamping(_))));
}

// ==================== 报告 ====================

#[tokio::test]
async fn test_reports_follow_output_format() {
    let config = RankConfig::new().with_samples(10_000).with_seed(8);
    let comparison = rank_concurrently(corpus_graph(), config).await.unwrap();
    let [sampled, iterated] = comparison.reports();

    assert_eq!(sampled.title, "PageRank Results from Sampling (n = 10000)");
    assert_eq!(iterated.title, "PageRank Results from Iteration");

    let text = iterated.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("  1.html: 0."));
    assert!(lines[4].starts_with("  4.html: 0."));

    for line in &lines[1..] {
        let value = line.rsplit(": ").next().unwrap();
        assert_eq!(value.len(), 6, "four decimals expected in {:?}", line);
    }
}

#[test]
fn test_report_json() {
    let graph = LinkGraph::from_links(vec![
        ("x".to_string(), vec!["y".to_string()]),
        ("y".to_string(), vec!["x".to_string()]),
    ])
    .unwrap();
    let ranks = rs_pagerank::iterate_rank(&graph, 0.85, 0.001).unwrap();
    let report = RankReport::new("Ranks", &ranks);

    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["title"], "Ranks");
    assert_eq!(value["entries"][0]["node"], "x");
    assert!((value["entries"][1]["rank"].as_f64().unwrap() - 0.5).abs() < 1e-4);
}
