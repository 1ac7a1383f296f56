use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Tunables for the Google News collector. Defaults match the Brazilian
/// Portuguese edition of the feed.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// `hl` request parameter (interface language).
    pub language: String,
    /// `gl` request parameter (region).
    pub region: String,
    /// `ceid` request parameter (edition channel id).
    pub channel_id: String,
    /// Per-request timeout in seconds. A timed-out query is skipped, not
    /// retried.
    pub request_timeout_secs: u64,
    /// Courtesy pause between consecutive queries, in milliseconds.
    pub query_delay_ms: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            language: "pt-BR".to_string(),
            region: "BR".to_string(),
            channel_id: "BR:pt-419".to_string(),
            request_timeout_secs: 10,
            query_delay_ms: 2000,
        }
    }
}

/// Pipeline configuration. Every value has a default so the pipeline runs
/// with no environment set up at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub collector: CollectorConfig,
    /// Directory holding the snapshot files.
    pub data_dir: PathBuf,
    /// Cap on unique items kept per collection run.
    pub max_items: usize,
    /// Topic query variants sent to the search endpoint.
    pub queries: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let collector = CollectorConfig {
            language: env::var("NEWS_LANGUAGE").unwrap_or_else(|_| "pt-BR".to_string()),
            region: env::var("NEWS_REGION").unwrap_or_else(|_| "BR".to_string()),
            channel_id: env::var("NEWS_CHANNEL_ID").unwrap_or_else(|_| "BR:pt-419".to_string()),
            request_timeout_secs: parse_env("NEWS_TIMEOUT_SECS", 10)?,
            query_delay_ms: parse_env("NEWS_QUERY_DELAY_MS", 2000)?,
        };

        let data_dir = env::var("NEWS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let max_items = parse_env("NEWS_MAX_ITEMS", 50)?;

        let queries = match env::var("NEWS_QUERIES") {
            Ok(raw) => raw
                .split(',')
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty())
                .collect(),
            Err(_) => Self::default_queries(),
        };

        Ok(Self {
            collector,
            data_dir,
            max_items,
            queries,
        })
    }

    /// Topic variants for the AI-in-Piauí beat.
    pub fn default_queries() -> Vec<String> {
        [
            "Inteligência Artificial Piauí",
            "IA Piauí",
            "SIA Piauí",
            "Tecnologia Piauí",
            "Inovação Piauí",
        ]
        .iter()
        .map(|q| q.to_string())
        .collect()
    }

    pub fn raw_snapshot_path(&self) -> PathBuf {
        self.data_dir.join("raw_news.csv")
    }

    pub fn processed_snapshot_path(&self) -> PathBuf {
        self.data_dir.join("processed_news.csv")
    }

    fn try_load_dotenv() {
        // Try locations in order of preference:

        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/news-sentiment/.env (standard config location)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("news-sentiment").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env (home directory)
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }

        // If none found, that's okay - every setting has a default
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collector: CollectorConfig::default(),
            data_dir: PathBuf::from("data"),
            max_items: 50,
            queries: Self::default_queries(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("Invalid value for {}: {}", key, raw)),
        Err(_) => Ok(default),
    }
}
