use serde::{Deserialize, Serialize};

/// Editorial bucket an article is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Analysis,
    News,
    Policy,
    Opinion,
}

/// Reading direction of the headline, used by the page when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    /// ISO `YYYY-MM-DD`.
    #[serde(rename = "date")]
    pub published_date: String,
    #[serde(rename = "source")]
    pub source_name: String,
    pub title: String,
    pub url: String,
    #[serde(rename = "dir")]
    pub text_direction: TextDirection,
    pub category: Category,
}

/// Where the articles in a [`FeedResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    /// Every query succeeded.
    Live,
    /// Some queries failed, the rest produced articles.
    Partial,
    /// The curated fallback set was served.
    Cached,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedResult {
    pub articles: Vec<Article>,
    pub source: FeedSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FeedResult {
    pub fn live(articles: Vec<Article>) -> Self {
        let count = articles.len();
        Self {
            articles,
            source: FeedSource::Live,
            count: Some(count),
            error: None,
        }
    }

    pub fn partial(articles: Vec<Article>) -> Self {
        let count = articles.len();
        Self {
            articles,
            source: FeedSource::Partial,
            count: Some(count),
            error: None,
        }
    }

    pub fn cached(articles: Vec<Article>, error: impl Into<String>) -> Self {
        Self {
            articles,
            source: FeedSource::Cached,
            count: None,
            error: Some(error.into()),
        }
    }
}
