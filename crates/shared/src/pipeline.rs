use anyhow::{Context, Result};
use chrono::Utc;

use crate::cleaner::TextCleaner;
use crate::collector::NewsCollector;
use crate::config::Config;
use crate::models::{
    NewsItem, ProcessedNewsItem, Sentiment, PLACEHOLDER_LINK, TIMESTAMP_FORMAT,
};
use crate::sentiment::SentimentLexicon;
use crate::snapshot;

/// Literal example records substituted when a collection run comes back
/// empty. Documented behavior, not an error: the dashboard always gets a
/// valid processed snapshot to read.
pub fn fallback_news() -> Vec<NewsItem> {
    let today = Utc::now().format("%Y-%m-%d").to_string();
    let now = Utc::now().format(TIMESTAMP_FORMAT).to_string();

    vec![
        NewsItem {
            title: "Governo do Piauí investe em IA".to_string(),
            link: PLACEHOLDER_LINK.to_string(),
            pub_date: today.clone(),
            description: "Novo investimento em tecnologia".to_string(),
            source: "exemplo".to_string(),
            collected_at: now.clone(),
            search_query: String::new(),
        },
        NewsItem {
            title: "Startup de IA no Piauí cresce".to_string(),
            link: PLACEHOLDER_LINK.to_string(),
            pub_date: today,
            description: "Empresa local recebe funding".to_string(),
            source: "exemplo".to_string(),
            collected_at: now,
            search_query: String::new(),
        },
    ]
}

/// Substitutes the fallback dataset when collection yielded nothing.
/// Returns the items to process and whether the fallback was used.
pub(crate) fn ensure_items(items: Vec<NewsItem>) -> (Vec<NewsItem>, bool) {
    if items.is_empty() {
        (fallback_news(), true)
    } else {
        (items, false)
    }
}

/// Output of the NORMALIZE + CLASSIFY stages.
#[derive(Debug)]
pub struct ProcessOutput {
    pub records: Vec<ProcessedNewsItem>,
    /// Items dropped because nothing remained after cleaning.
    pub skipped_empty: usize,
}

/// Runs cleaning and classification over collected items. Classification
/// only ever sees text that has been through the cleaner.
pub struct NewsProcessor {
    cleaner: TextCleaner,
    lexicon: SentimentLexicon,
}

impl NewsProcessor {
    pub fn new() -> Self {
        Self::with_parts(TextCleaner::new(), SentimentLexicon::default_pt())
    }

    pub fn with_parts(cleaner: TextCleaner, lexicon: SentimentLexicon) -> Self {
        Self { cleaner, lexicon }
    }

    pub fn process(&self, items: &[NewsItem]) -> ProcessOutput {
        let processed_at = Utc::now().format(TIMESTAMP_FORMAT).to_string();

        let mut records = Vec::with_capacity(items.len());
        let mut skipped_empty = 0;

        for item in items {
            match self.process_item(item, &processed_at) {
                Some(record) => records.push(record),
                None => skipped_empty += 1,
            }
        }

        ProcessOutput {
            records,
            skipped_empty,
        }
    }

    fn process_item(&self, item: &NewsItem, processed_at: &str) -> Option<ProcessedNewsItem> {
        let cleaned_title = self.cleaner.clean(&item.title);
        let cleaned_description = self.cleaner.clean(&item.description);

        let combined_text = format!("{} {}", cleaned_title, cleaned_description)
            .trim()
            .to_string();
        if combined_text.is_empty() {
            return None;
        }

        let sentiment = self.lexicon.classify(&combined_text);

        Some(ProcessedNewsItem {
            title: item.title.clone(),
            link: item.link.clone(),
            pub_date: item.pub_date.clone(),
            description: item.description.clone(),
            source: item.source.clone(),
            collected_at: item.collected_at.clone(),
            search_query: item.search_query.clone(),
            cleaned_title,
            cleaned_description,
            combined_text,
            sentiment,
            processed_at: processed_at.to_string(),
        })
    }
}

impl Default for NewsProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of one end-to-end run, for the binaries' status output.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub collected: usize,
    pub failed_queries: usize,
    pub used_fallback: bool,
    pub skipped_empty: usize,
    pub processed: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

/// End-to-end orchestrator: COLLECT → NORMALIZE → CLASSIFY → PERSIST.
/// Stage order is fixed; each stage consumes the whole output of the
/// previous one.
pub struct Pipeline {
    collector: NewsCollector,
    processor: NewsProcessor,
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        let collector = NewsCollector::new(config.collector.clone())?;
        Ok(Self {
            collector,
            processor: NewsProcessor::new(),
            config,
        })
    }

    pub async fn run(&self) -> Result<PipelineReport> {
        // COLLECT
        let collect_report = self
            .collector
            .collect(&self.config.queries, self.config.max_items)
            .await;
        let failed_queries = collect_report.failed_queries();
        let (items, used_fallback) = ensure_items(collect_report.items);

        snapshot::write_raw(&self.config.raw_snapshot_path(), &items)
            .context("Failed to write raw snapshot")?;

        // NORMALIZE + CLASSIFY
        let output = self.processor.process(&items);

        // PERSIST
        snapshot::write_processed(&self.config.processed_snapshot_path(), &output.records)
            .context("Failed to write processed snapshot")?;

        let mut report = PipelineReport {
            collected: items.len(),
            failed_queries,
            used_fallback,
            skipped_empty: output.skipped_empty,
            processed: output.records.len(),
            ..PipelineReport::default()
        };
        for record in &output.records {
            match record.sentiment {
                Sentiment::Positive => report.positive += 1,
                Sentiment::Negative => report.negative += 1,
                Sentiment::Neutral => report.neutral += 1,
            }
        }

        Ok(report)
    }
}
