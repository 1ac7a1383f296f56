use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use rss::Channel;
use std::collections::HashSet;

use crate::config::CollectorConfig;
use crate::error::CollectError;
use crate::models::{NewsItem, TIMESTAMP_FORMAT};

const SEARCH_ENDPOINT: &str = "https://news.google.com/rss/search";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// How a single query fared. Failures are values, not log lines, so callers
/// and tests can inspect partial-failure behavior directly.
#[derive(Debug)]
pub enum QueryOutcome {
    Fetched {
        query: String,
        /// Items the feed returned.
        fetched: usize,
        /// Items kept after title dedup and the count cap.
        kept: usize,
    },
    Failed {
        query: String,
        error: CollectError,
    },
}

/// The result of one collection run: deduplicated items plus one outcome
/// per attempted query.
#[derive(Debug, Default)]
pub struct CollectReport {
    pub items: Vec<NewsItem>,
    pub outcomes: Vec<QueryOutcome>,
}

impl CollectReport {
    pub fn failed_queries(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, QueryOutcome::Failed { .. }))
            .count()
    }
}

/// Fetches the Google News RSS search feed for each topic query and unions
/// the results, deduplicating by title.
pub struct NewsCollector {
    client: Client,
    config: CollectorConfig,
    base_url: String,
}

impl NewsCollector {
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            base_url: SEARCH_ENDPOINT.to_string(),
        })
    }

    /// Points the collector at a different RSS search endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Runs every query in order, skipping failed ones, and stops early once
    /// `max_items` unique titles have been collected.
    pub async fn collect(&self, queries: &[String], max_items: usize) -> CollectReport {
        let mut report = CollectReport::default();
        let mut seen_titles = HashSet::new();

        for (i, query) in queries.iter().enumerate() {
            if report.items.len() >= max_items {
                break;
            }

            // Courtesy pause between queries, not after the last one
            if i > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(
                    self.config.query_delay_ms,
                ))
                .await;
            }

            match self.fetch_query(query).await {
                Ok(fetched) => {
                    let fetched_count = fetched.len();
                    let kept = merge_items(&mut report.items, &mut seen_titles, fetched, max_items);
                    report.outcomes.push(QueryOutcome::Fetched {
                        query: query.clone(),
                        fetched: fetched_count,
                        kept,
                    });
                }
                Err(error) => {
                    eprintln!("Warning: query \"{}\" failed: {}", query, error);
                    report.outcomes.push(QueryOutcome::Failed {
                        query: query.clone(),
                        error,
                    });
                }
            }
        }

        report
    }

    async fn fetch_query(&self, query: &str) -> Result<Vec<NewsItem>, CollectError> {
        let url = self.search_url(query);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CollectError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectError::Transport(format!("HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CollectError::Transport(e.to_string()))?;

        let channel =
            Channel::read_from(&body[..]).map_err(|e| CollectError::Parse(e.to_string()))?;

        let collected_at = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        Ok(channel
            .items()
            .iter()
            .map(|item| item_from_rss(item, query, &collected_at))
            .collect())
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}?q={}&hl={}&gl={}&ceid={}",
            self.base_url,
            urlencoding::encode(query),
            self.config.language,
            self.config.region,
            self.config.channel_id
        )
    }
}

/// Maps one RSS item to a NewsItem, defaulting every missing sub-element to
/// the empty string instead of failing.
fn item_from_rss(item: &rss::Item, query: &str, collected_at: &str) -> NewsItem {
    NewsItem {
        title: item.title().unwrap_or_default().to_string(),
        link: item.link().unwrap_or_default().to_string(),
        pub_date: item.pub_date().unwrap_or_default().to_string(),
        description: item.description().unwrap_or_default().to_string(),
        source: item
            .source()
            .and_then(|s| s.title())
            .unwrap_or_default()
            .to_string(),
        collected_at: collected_at.to_string(),
        search_query: query.to_string(),
    }
}

/// Appends fetched items, skipping titles already seen in this run and
/// stopping at the cap. Returns how many items were kept.
fn merge_items(
    items: &mut Vec<NewsItem>,
    seen_titles: &mut HashSet<String>,
    fetched: Vec<NewsItem>,
    max_items: usize,
) -> usize {
    let mut kept = 0;
    for item in fetched {
        if items.len() >= max_items {
            break;
        }
        if !seen_titles.insert(item.title.clone()) {
            continue;
        }
        items.push(item);
        kept += 1;
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, link: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            link: link.to_string(),
            pub_date: String::new(),
            description: String::new(),
            source: String::new(),
            collected_at: "2026-01-01 12:00:00".to_string(),
            search_query: "IA Piauí".to_string(),
        }
    }

    #[test]
    fn test_missing_elements_default_to_placeholder() {
        let rss_item = rss::Item::default();
        let news = item_from_rss(&rss_item, "IA Piauí", "2026-01-01 12:00:00");
        assert_eq!(news.title, "");
        assert_eq!(news.link, "");
        assert_eq!(news.pub_date, "");
        assert_eq!(news.description, "");
        assert_eq!(news.source, "");
        assert_eq!(news.search_query, "IA Piauí");
    }

    #[test]
    fn test_parses_feed_items() {
        let xml = r#"<?xml version="1.0"?>
            <rss version="2.0"><channel>
              <title>busca</title>
              <link>https://news.example/rss</link>
              <description>resultados</description>
              <item>
                <title>Governo investe em IA</title>
                <link>https://example.com/a</link>
                <pubDate>Mon, 24 Aug 2026 10:00:00 GMT</pubDate>
                <description>Novo investimento</description>
                <source url="https://example.com">Diário</source>
              </item>
              <item>
                <title>Sem link nem descrição</title>
              </item>
            </channel></rss>"#;

        let channel = Channel::read_from(xml.as_bytes()).unwrap();
        let items: Vec<NewsItem> = channel
            .items()
            .iter()
            .map(|i| item_from_rss(i, "IA Piauí", "2026-01-01 12:00:00"))
            .collect();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Governo investe em IA");
        assert_eq!(items[0].source, "Diário");
        assert_eq!(items[1].title, "Sem link nem descrição");
        assert_eq!(items[1].link, "");
        assert_eq!(items[1].pub_date, "");
    }

    #[test]
    fn test_dedup_by_title_keeps_first() {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let kept = merge_items(
            &mut items,
            &mut seen,
            vec![
                item("Mesma manchete", "https://a.example"),
                item("Mesma manchete", "https://b.example"),
            ],
            10,
        );
        assert_eq!(kept, 1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "https://a.example");
    }

    #[test]
    fn test_dedup_spans_queries() {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        merge_items(&mut items, &mut seen, vec![item("A", "l1"), item("B", "l2")], 10);
        let kept = merge_items(&mut items, &mut seen, vec![item("B", "l3"), item("C", "l4")], 10);
        assert_eq!(kept, 1);
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_count_cap_is_respected() {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        let fetched: Vec<NewsItem> = (0..5)
            .map(|i| item(&format!("Notícia {}", i), "l"))
            .collect();
        let kept = merge_items(&mut items, &mut seen, fetched, 3);
        assert_eq!(kept, 3);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_search_url_carries_locale_parameters() {
        let collector = NewsCollector::new(CollectorConfig::default()).unwrap();
        let url = collector.search_url("IA Piauí");
        assert!(url.starts_with("https://news.google.com/rss/search?q=IA%20Piau%C3%AD"));
        assert!(url.contains("hl=pt-BR"));
        assert!(url.contains("gl=BR"));
        assert!(url.contains("ceid=BR:pt-419"));
    }

    /// Serves one canned HTTP response per expected request, then exits.
    fn spawn_feed_server(responses: Vec<String>) -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            for body in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut buf = [0u8; 1024];
                let _ = std::io::Read::read(&mut stream, &mut buf);
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/rss+xml\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = std::io::Write::write_all(&mut stream, response.as_bytes());
            }
        });
        format!("http://{}/rss/search", addr)
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_successful_items() {
        let feed = r#"<?xml version="1.0"?>
            <rss version="2.0"><channel>
              <title>busca</title>
              <link>https://news.example/rss</link>
              <description>resultados</description>
              <item>
                <title>Governo investe em IA</title>
                <link>https://example.com/a</link>
              </item>
            </channel></rss>"#;
        // first query gets a valid feed, second gets an unparseable body
        let base_url =
            spawn_feed_server(vec![feed.to_string(), "isto não é um feed".to_string()]);

        let config = CollectorConfig {
            query_delay_ms: 0,
            ..CollectorConfig::default()
        };
        let collector = NewsCollector::new(config).unwrap().with_base_url(base_url);

        let queries = vec!["IA Piauí".to_string(), "Tecnologia Piauí".to_string()];
        let report = collector.collect(&queries, 10).await;

        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].title, "Governo investe em IA");
        assert_eq!(report.items[0].search_query, "IA Piauí");

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.failed_queries(), 1);
        assert!(matches!(
            report.outcomes[0],
            QueryOutcome::Fetched {
                fetched: 1,
                kept: 1,
                ..
            }
        ));
        match &report.outcomes[1] {
            QueryOutcome::Failed { query, error } => {
                assert_eq!(query, "Tecnologia Piauí");
                assert!(matches!(error, CollectError::Parse(_)));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_failed_outcomes() {
        let config = CollectorConfig {
            query_delay_ms: 0,
            request_timeout_secs: 1,
            ..CollectorConfig::default()
        };
        let collector = NewsCollector::new(config)
            .unwrap()
            .with_base_url("http://127.0.0.1:9/rss/search");

        let queries = vec!["IA Piauí".to_string(), "Tecnologia Piauí".to_string()];
        let report = collector.collect(&queries, 10).await;

        assert!(report.items.is_empty());
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.failed_queries(), 2);
        for outcome in &report.outcomes {
            match outcome {
                QueryOutcome::Failed { error, .. } => {
                    assert!(matches!(error, CollectError::Transport(_)));
                }
                other => panic!("expected failure, got {:?}", other),
            }
        }
    }
}
