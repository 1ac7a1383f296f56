use anyhow::{Context, Result};
use clap::Parser;
use shared::{snapshot, Config, NewsProcessor, Sentiment};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "process-news")]
#[command(about = "Clean and classify a raw news snapshot into the processed CSV")]
struct Args {
    /// Path to the raw snapshot (defaults to the configured data dir)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path for the processed snapshot (defaults to the configured data dir)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;

    let input = args.input.unwrap_or_else(|| config.raw_snapshot_path());
    let output = args
        .output
        .unwrap_or_else(|| config.processed_snapshot_path());

    println!("📖 Reading raw snapshot: {}", input.display());
    let items = snapshot::read_raw(&input)
        .context("Run collect-news first to produce the raw snapshot")?;
    println!("✓ Loaded {} items", items.len());

    println!("⚙️ Cleaning and classifying...");
    let processor = NewsProcessor::new();
    let result = processor.process(&items);

    if result.skipped_empty > 0 {
        println!(
            "⚠ Skipped {} items with no text left after cleaning",
            result.skipped_empty
        );
    }

    let (mut positive, mut negative, mut neutral) = (0, 0, 0);
    for record in &result.records {
        match record.sentiment {
            Sentiment::Positive => positive += 1,
            Sentiment::Negative => negative += 1,
            Sentiment::Neutral => neutral += 1,
        }
    }
    println!(
        "✓ Classified {} items: {} positive, {} negative, {} neutral",
        result.records.len(),
        positive,
        negative,
        neutral
    );

    snapshot::write_processed(&output, &result.records)
        .context("Failed to write processed snapshot")?;
    println!("💾 Saved to {}", output.display());

    Ok(())
}
