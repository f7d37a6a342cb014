pub mod aggregator;
pub mod fallback;
pub mod newsapi;
pub mod provider;
pub mod rules;
pub mod settle;

pub use aggregator::{AggregatorConfig, NewsAggregator};
pub use fallback::{fallback_articles, FALLBACK_ARTICLES};
pub use newsapi::NewsApiClient;
pub use provider::{NewsProvider, RawArticle, RawSource};
pub use settle::{settle_all, Settled};

pub mod prelude {
    pub use super::provider::NewsProvider;
    pub use super::{AggregatorConfig, NewsAggregator};
    pub use corridor_core::{Article, Error, FeedResult, FeedSource, Result};
}
