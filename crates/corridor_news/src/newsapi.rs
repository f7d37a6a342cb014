use async_trait::async_trait;
use corridor_core::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use url::Url;

use crate::provider::{NewsProvider, RawArticle};

pub const NEWSAPI_BASE_URL: &str = "https://newsapi.org/v2";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    status: String,
    articles: Option<Vec<RawArticle>>,
    code: Option<String>,
    message: Option<String>,
}

struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Client for the NewsAPI `everything` endpoint.
///
/// Successful responses are kept per query for `cache_ttl`; failures are
/// never cached so the next request tries upstream again.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    page_size: u32,
    language: String,
    cache_ttl: Duration,
    cache: RwLock<HashMap<String, CacheEntry<Vec<RawArticle>>>>,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("language", &self.language)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl NewsApiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    pub fn builder(api_key: impl Into<String>) -> NewsApiClientBuilder {
        NewsApiClientBuilder {
            api_key: api_key.into(),
            base_url: NEWSAPI_BASE_URL.to_string(),
            page_size: 100,
            language: "en".to_string(),
            cache_ttl: Duration::from_secs(3600),
        }
    }

    async fn cached(&self, query: &str) -> Option<Vec<RawArticle>> {
        let cache = self.cache.read().await;
        cache
            .get(query)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.data.clone())
    }

    async fn remember(&self, query: &str, articles: &[RawArticle]) {
        if self.cache_ttl.is_zero() {
            return;
        }
        let mut cache = self.cache.write().await;
        cache.retain(|_, entry| !entry.is_expired());
        cache.insert(
            query.to_string(),
            CacheEntry::new(articles.to_vec(), self.cache_ttl),
        );
    }

    async fn fetch(&self, query: &str) -> Result<Vec<RawArticle>> {
        let page_size = self.page_size.to_string();
        let response = self
            .client
            .get(format!("{}/everything", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", query),
                ("pageSize", page_size.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider {
                status: status.as_u16().to_string(),
                message: provider_message(&body).unwrap_or(body),
            });
        }

        let body: NewsApiResponse = response.json().await?;
        if body.status != "ok" {
            return Err(Error::Provider {
                status: body.code.unwrap_or_else(|| "unknown".to_string()),
                message: body.message.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        Ok(body.articles.unwrap_or_default())
    }
}

/// NewsAPI error bodies carry a `message`; fall back to the raw text otherwise.
fn provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<NewsApiResponse>(body)
        .ok()
        .and_then(|r| r.message)
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn search(&self, query: &str) -> Result<Vec<RawArticle>> {
        if let Some(hit) = self.cached(query).await {
            tracing::debug!("💾 Cache hit for '{}' ({} articles)", query, hit.len());
            return Ok(hit);
        }

        let articles = self.fetch(query).await?;
        self.remember(query, &articles).await;
        Ok(articles)
    }
}

pub struct NewsApiClientBuilder {
    api_key: String,
    base_url: String,
    page_size: u32,
    language: String,
    cache_ttl: Duration,
}

impl NewsApiClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub fn build(self) -> Result<NewsApiClient> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid provider URL {}: {}", self.base_url, e)))?;

        let client = Client::builder()
            .user_agent(concat!("corridor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(NewsApiClient {
            client,
            api_key: self.api_key,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            page_size: self.page_size,
            language: self.language,
            cache_ttl: self.cache_ttl,
            cache: RwLock::new(HashMap::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::HeaderMap, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn counting_stub(hits: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/everything",
            get(
                move |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some("secret") {
                            return (
                                StatusCode::UNAUTHORIZED,
                                Json(json!({"status": "error", "code": "apiKeyInvalid", "message": "bad key"})),
                            );
                        }
                        let title = format!(
                            "{} / {} / {}",
                            params.get("q").cloned().unwrap_or_default(),
                            params.get("pageSize").cloned().unwrap_or_default(),
                            params.get("language").cloned().unwrap_or_default(),
                        );
                        (
                            StatusCode::OK,
                            Json(json!({
                                "status": "ok",
                                "totalResults": 1,
                                "articles": [{
                                    "source": {"id": null, "name": "Stub Wire"},
                                    "title": title,
                                    "url": "https://stub.test/1",
                                    "publishedAt": "2024-05-01T08:30:00Z"
                                }]
                            })),
                        )
                    }
                },
            ),
        )
    }

    #[tokio::test]
    async fn test_search_sends_query_params_and_key() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_stub(counting_stub(hits.clone())).await;
        let client = NewsApiClient::builder("secret").base_url(base).build().unwrap();

        let articles = client.search("IMEC corridor").await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "IMEC corridor / 100 / en");
        assert_eq!(
            articles[0].source.as_ref().and_then(|s| s.name.as_deref()),
            Some("Stub Wire")
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_stub(counting_stub(hits)).await;
        let client = NewsApiClient::builder("wrong").base_url(base).build().unwrap();

        match client.search("IMEC").await {
            Err(Error::Provider { status, message }) => {
                assert_eq!(status, "401");
                assert_eq!(message, "bad key");
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_in_ok_body_is_an_error() {
        let router = Router::new().route(
            "/everything",
            get(|| async {
                Json(json!({"status": "error", "code": "rateLimited", "message": "slow down"}))
            }),
        );
        let base = spawn_stub(router).await;
        let client = NewsApiClient::builder("secret").base_url(base).build().unwrap();

        let err = client.search("IMEC").await.unwrap_err();
        assert!(matches!(err, Error::Provider { ref status, .. } if status == "rateLimited"));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_an_error() {
        let router = Router::new().route("/everything", get(|| async { "<html>oops</html>" }));
        let base = spawn_stub(router).await;
        let client = NewsApiClient::builder("secret").base_url(base).build().unwrap();

        assert!(client.search("IMEC").await.is_err());
    }

    #[tokio::test]
    async fn test_successful_responses_are_cached() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_stub(counting_stub(hits.clone())).await;
        let client = NewsApiClient::builder("secret").base_url(base).build().unwrap();

        client.search("IMEC").await.unwrap();
        client.search("IMEC").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        client.search("Suez").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_stub(counting_stub(hits.clone())).await;
        let client = NewsApiClient::builder("wrong").base_url(base).build().unwrap();

        assert!(client.search("IMEC").await.is_err());
        assert!(client.search("IMEC").await.is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_stub(counting_stub(hits.clone())).await;
        let client = NewsApiClient::builder("secret")
            .base_url(base)
            .cache_ttl(Duration::ZERO)
            .build()
            .unwrap();

        client.search("IMEC").await.unwrap();
        client.search("IMEC").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cache_entries_expire() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_stub(counting_stub(hits.clone())).await;
        let client = NewsApiClient::builder("secret")
            .base_url(base)
            .cache_ttl(Duration::from_millis(200))
            .build()
            .unwrap();

        client.search("IMEC").await.unwrap();
        client.search("IMEC").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(300)).await;

        let articles = client.search("IMEC").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(articles.len(), 1);

        client.search("IMEC").await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = NewsApiClient::builder("secret")
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = NewsApiClient::new("super-secret").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_provider_message_parsing() {
        assert_eq!(
            provider_message(r#"{"status":"error","message":"nope"}"#).as_deref(),
            Some("nope")
        );
        assert!(provider_message("Internal Server Error").is_none());
    }
}
