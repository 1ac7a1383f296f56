use anyhow::{Context, Result};
use clap::Parser;
use shared::{fallback_news, snapshot, Config, NewsCollector, QueryOutcome};

#[derive(Parser)]
#[command(name = "collect-news")]
#[command(about = "Collect news from the Google News RSS search feed into a raw CSV snapshot")]
struct Args {
    /// Search query (repeatable; defaults to the configured topic variants)
    #[arg(short, long)]
    query: Vec<String>,

    /// Maximum number of unique items to collect
    #[arg(short, long)]
    max_items: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;

    let queries = if args.query.is_empty() {
        config.queries.clone()
    } else {
        args.query
    };
    let max_items = args.max_items.unwrap_or(config.max_items);

    println!("🔍 Collecting news for {} queries...", queries.len());
    let collector = NewsCollector::new(config.collector.clone())?;
    let report = collector.collect(&queries, max_items).await;

    for outcome in &report.outcomes {
        match outcome {
            QueryOutcome::Fetched {
                query,
                fetched,
                kept,
            } => println!("  ✓ \"{}\": {} fetched, {} kept", query, fetched, kept),
            QueryOutcome::Failed { query, error } => {
                println!("  ✗ \"{}\": {}", query, error)
            }
        }
    }

    let items = if report.items.is_empty() {
        println!("⚠ No news found. Writing the example records instead.");
        fallback_news()
    } else {
        println!("✓ Collected {} unique items", report.items.len());
        report.items
    };

    let path = config.raw_snapshot_path();
    snapshot::write_raw(&path, &items).context("Failed to write raw snapshot")?;
    println!("💾 {} items saved to {}", items.len(), path.display());

    Ok(())
}
