//! rs-pagerank 命令行
//!
//! ```bash
//! rs-pagerank corpus0
//! rs-pagerank corpus0 --samples 200000 --seed 42 --json
//! ```

use clap::Parser;
use rs_pagerank::config::{DEFAULT_DAMPING, DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS, DEFAULT_SAMPLES};
use rs_pagerank::{corpus, rank_concurrently, RankConfig, RankError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVE: &str = "rs_pagerank=info";

#[derive(Parser)]
#[command(name = "rs-pagerank")]
#[command(about = "Rank the pages of an HTML corpus by sampling and by iteration", long_about = None)]
struct Cli {
    /// Directory containing the corpus `.html` files
    corpus: PathBuf,

    /// Probability of following a link instead of jumping to a random page
    #[arg(long, default_value_t = DEFAULT_DAMPING)]
    damping: f64,

    /// Number of random-walk samples
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,

    /// Convergence threshold for the iterative estimator
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// Seed for a reproducible random walk
    #[arg(long)]
    seed: Option<u64>,

    /// Split the sample budget into this many independent walks
    #[arg(long, default_value_t = 1)]
    walks: usize,

    /// Upper bound on iteration passes
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Print the reports as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> RankConfig {
        RankConfig {
            damping: self.damping,
            samples: self.samples,
            epsilon: self.epsilon,
            seed: self.seed,
            walks: self.walks,
            max_iterations: self.max_iterations,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` 存在且合法时完全以它为准，否则只输出本 crate 的 info 日志
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

async fn run(cli: Cli) -> Result<(), RankError> {
    let config = cli.config();
    config.validate()?;

    let graph = Arc::new(corpus::crawl(&cli.corpus)?);
    info!(pages = graph.node_count(), links = graph.link_count(), "corpus loaded");

    let comparison = rank_concurrently(graph, config).await?;
    let [sampled, iterated] = comparison.reports();

    if cli.json {
        let json = serde_json::json!({ "sampling": sampled, "iteration": iterated });
        println!("{:#}", json);
    } else {
        print!("{}", sampled);
        print!("{}", iterated);
    }

    Ok(())
}
