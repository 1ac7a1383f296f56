use anyhow::Result;
use clap::Parser;
use shared::{Config, Pipeline};

#[derive(Parser)]
#[command(name = "run-pipeline")]
#[command(about = "Run the full pipeline: collect, clean, classify, persist")]
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
    let mut config = Config::from_env()?;

    if !args.query.is_empty() {
        config.queries = args.query;
    }
    if let Some(max_items) = args.max_items {
        config.max_items = max_items;
    }

    println!("🚀 Running the news sentiment pipeline...");
    println!(
        "  {} queries, up to {} items, data dir: {}",
        config.queries.len(),
        config.max_items,
        config.data_dir.display()
    );

    let raw_path = config.raw_snapshot_path();
    let processed_path = config.processed_snapshot_path();

    let pipeline = Pipeline::new(config)?;
    let report = pipeline.run().await?;

    if report.failed_queries > 0 {
        println!("⚠ {} queries failed and were skipped", report.failed_queries);
    }
    if report.used_fallback {
        println!("⚠ No news collected; the example records were used");
    }
    println!("✓ Collected {} items → {}", report.collected, raw_path.display());
    if report.skipped_empty > 0 {
        println!(
            "⚠ Skipped {} items with no text left after cleaning",
            report.skipped_empty
        );
    }
    println!(
        "✓ Classified {} items: {} positive, {} negative, {} neutral",
        report.processed, report.positive, report.negative, report.neutral
    );
    println!("💾 Processed snapshot: {}", processed_path.display());
    println!("✅ Pipeline finished");

    Ok(())
}
