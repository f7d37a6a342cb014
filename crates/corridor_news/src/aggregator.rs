use chrono::Utc;
use corridor_core::{Article, Error, FeedResult, Logger, Result, TextDirection};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;

use crate::fallback::fallback_articles;
use crate::newsapi::{NewsApiClient, NEWSAPI_BASE_URL};
use crate::provider::{NewsProvider, RawArticle};
use crate::rules::{categorize, dedup_by_title, sort_by_date_desc};
use crate::settle::{settle_all, Settled};

pub const API_KEY_ENV: &str = "NEWS_API_KEY";

pub const DEFAULT_QUERIES: &[&str] = &[
    "India Middle East Europe Economic Corridor",
    "IMEC corridor",
    "Suez Canal shipping",
    "Red Sea trade route",
];

pub const NO_API_KEY_MESSAGE: &str = "News API key not configured. Showing curated articles.";
pub const LIVE_UNAVAILABLE_MESSAGE: &str =
    "Live news source unavailable. Showing curated articles.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Failed to fetch live news. Showing curated articles.";

#[derive(Clone)]
pub struct AggregatorConfig {
    /// Missing or blank means fallback-only mode.
    pub api_key: Option<String>,
    pub queries: Vec<String>,
    pub query_timeout: Duration,
    pub base_url: String,
    pub page_size: u32,
    pub language: String,
    pub cache_ttl: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            queries: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
            query_timeout: Duration::from_secs(10),
            base_url: NEWSAPI_BASE_URL.to_string(),
            page_size: 100,
            language: "en".to_string(),
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl AggregatorConfig {
    /// Defaults plus the API key from `NEWS_API_KEY`, if set.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            ..Self::default()
        }
    }
}

impl fmt::Debug for AggregatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregatorConfig")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("queries", &self.queries)
            .field("query_timeout", &self.query_timeout)
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("language", &self.language)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

/// Builds the corridor news feed from live topic searches, falling back to
/// the curated set whenever the live path yields nothing.
///
/// `fetch_feed` never fails: every error ends in a renderable `FeedResult`.
pub struct NewsAggregator {
    provider: Option<Arc<dyn NewsProvider>>,
    queries: Vec<String>,
    query_timeout: Duration,
    logger: Logger,
}

impl NewsAggregator {
    pub fn new(config: AggregatorConfig) -> Result<Self> {
        let provider = match config.api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => {
                let client = NewsApiClient::builder(key)
                    .base_url(config.base_url)
                    .page_size(config.page_size)
                    .language(config.language)
                    .cache_ttl(config.cache_ttl)
                    .build()?;
                Some(Arc::new(client) as Arc<dyn NewsProvider>)
            }
            None => None,
        };
        Ok(Self::with_provider(
            provider,
            config.queries,
            config.query_timeout,
        ))
    }

    /// `None` for the provider means no credential is configured.
    pub fn with_provider(
        provider: Option<Arc<dyn NewsProvider>>,
        queries: Vec<String>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            queries,
            query_timeout,
            logger: Logger::new().with_prefix("[news]"),
        }
    }

    pub fn is_live_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub async fn fetch_feed(&self) -> FeedResult {
        let Some(provider) = self.provider.clone() else {
            self.logger
                .warn("🔑 No news API key configured, serving curated articles");
            return FeedResult::cached(fallback_articles(), NO_API_KEY_MESSAGE);
        };

        match self.fetch_live(provider).await {
            Ok(feed) => feed,
            Err(e) => {
                self.logger
                    .error(&format!("💥 Live fetch failed unexpectedly: {}", e));
                FeedResult::cached(fallback_articles(), UNEXPECTED_ERROR_MESSAGE)
            }
        }
    }

    async fn fetch_live(&self, provider: Arc<dyn NewsProvider>) -> Result<FeedResult> {
        self.logger.info(&format!(
            "📰 Fetching {} topics from {}",
            self.queries.len(),
            provider.name()
        ));

        let handles: Vec<_> = self
            .queries
            .iter()
            .map(|query| {
                let provider = provider.clone();
                let query = query.clone();
                let limit = self.query_timeout;
                tokio::spawn(async move { search_with_timeout(provider.as_ref(), &query, limit).await })
            })
            .collect();

        // A task that panicked or was aborted is not a provider failure; it
        // escapes to `fetch_feed` and the whole feed falls back.
        let settled: Settled<Vec<RawArticle>, Error> = settle_all(handles)
            .await
            .into_outcomes()
            .into_iter()
            .collect::<std::result::Result<Vec<_>, JoinError>>()
            .map_err(|e| Error::Task(e.to_string()))?
            .into_iter()
            .collect();

        let failed = settled.failures();
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let mut articles = Vec::new();
        for (query, outcome) in self.queries.iter().zip(settled.into_outcomes()) {
            let logger = self.logger.clone().with_prefix(format!("[{}]", query));
            match outcome {
                Ok(raw) => {
                    logger.debug(&format!("✨ {} articles", raw.len()));
                    articles.extend(raw.into_iter().map(|r| to_article(r, &today)));
                }
                Err(e) => logger.warn(&format!("⚠️ Query failed: {}", e)),
            }
        }

        if articles.is_empty() {
            self.logger.warn(&format!(
                "🪫 No live articles ({} of {} queries failed), serving curated articles",
                failed,
                self.queries.len()
            ));
            return Ok(FeedResult::cached(
                fallback_articles(),
                LIVE_UNAVAILABLE_MESSAGE,
            ));
        }

        let mut articles = dedup_by_title(articles);
        sort_by_date_desc(&mut articles);
        self.logger.info(&format!(
            "✅ {} articles ({} of {} queries failed)",
            articles.len(),
            failed,
            self.queries.len()
        ));

        Ok(if failed == 0 {
            FeedResult::live(articles)
        } else {
            FeedResult::partial(articles)
        })
    }
}

impl fmt::Debug for NewsAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsAggregator")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field("queries", &self.queries)
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

async fn search_with_timeout(
    provider: &dyn NewsProvider,
    query: &str,
    limit: Duration,
) -> Result<Vec<RawArticle>> {
    match tokio::time::timeout(limit, provider.search(query)).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(format!(
            "query '{}' gave no answer within {:?}",
            query, limit
        ))),
    }
}

/// Shapes one provider hit into an `Article`. `today` stands in for a
/// missing publish date.
pub fn to_article(raw: RawArticle, today: &str) -> Article {
    let published_date = raw
        .published_at
        .as_deref()
        .and_then(|ts| ts.split('T').next())
        .filter(|d| !d.is_empty())
        .unwrap_or(today)
        .to_string();
    let source_name = raw
        .source
        .and_then(|s| s.name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    Article {
        id: uuid::Uuid::new_v4().to_string(),
        published_date,
        source_name,
        category: categorize(&raw.title),
        title: raw.title,
        url: raw.url,
        text_direction: TextDirection::Ltr,
    }
}
