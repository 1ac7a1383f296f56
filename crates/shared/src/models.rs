use serde::{Deserialize, Serialize};

/// Link value used by fallback records and feed items without a link.
pub const PLACEHOLDER_LINK: &str = "#";

/// Timestamp format shared by the collected_at and processed_at columns.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One news item as fetched from the feed. Field order matches the raw
/// snapshot columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub description: String,
    pub source: String,
    pub collected_at: String,
    pub search_query: String,
}

/// A news item after cleaning and classification. Field order matches the
/// processed snapshot columns: the raw columns followed by the derived ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedNewsItem {
    pub title: String,
    pub link: String,
    pub pub_date: String,
    pub description: String,
    pub source: String,
    pub collected_at: String,
    pub search_query: String,
    pub cleaned_title: String,
    pub cleaned_description: String,
    pub combined_text: String,
    pub sentiment: Sentiment,
    pub processed_at: String,
}

/// Three-way sentiment label. The snapshot column only ever contains these
/// three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
