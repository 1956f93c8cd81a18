use anyhow::{anyhow, Result};
use clap::Parser;
use feedsearch_cli::{demo_requests, load_requests, run};
use feedsearch_core::SearchConfig;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "feedsearch")]
#[command(about = "Index a batch of feed documents in memory and run boolean searches", long_about = None)]
struct Cli {
    /// Document batch (JSON array or JSON Lines)
    input: Option<PathBuf>,
    /// Maximum hits per search (overrides FEEDSEARCH_MAX_HITS)
    #[arg(long)]
    max_hits: Option<usize>,
    /// Drop English stop words at index time (overrides FEEDSEARCH_STOPWORDS)
    #[arg(long, default_value_t = false)]
    stopwords: bool,
    /// JSON array of search requests to run instead of the demonstration set
    #[arg(long)]
    queries: Option<PathBuf>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let input = cli
        .input
        .ok_or_else(|| anyhow!("the path of a document batch file has to be passed as a command line argument"))?;

    let mut config = SearchConfig::from_env();
    if let Some(n) = cli.max_hits {
        config.max_hits = n.max(1);
    }
    if cli.stopwords {
        config.english_stopwords = true;
    }

    let requests = match &cli.queries {
        Some(path) => load_requests(path)?,
        None => demo_requests(),
    };
    let stdout = std::io::stdout();
    run(&config, &input, &requests, &mut stdout.lock())
}
