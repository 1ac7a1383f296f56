// Public modules
pub mod cleaner;
pub mod collector;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod sentiment;
pub mod snapshot;

// Re-export commonly used types
pub use cleaner::{MarkupStripper, ScraperStripper, TextCleaner};
pub use collector::{CollectReport, NewsCollector, QueryOutcome};
pub use config::{CollectorConfig, Config};
pub use error::{CollectError, SnapshotError};
pub use models::{NewsItem, ProcessedNewsItem, Sentiment};
pub use pipeline::{fallback_news, NewsProcessor, Pipeline, PipelineReport};
pub use sentiment::SentimentLexicon;
