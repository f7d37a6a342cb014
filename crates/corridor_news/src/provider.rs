use async_trait::async_trait;
use corridor_core::Result;
use serde::{Deserialize, Deserializer, Serialize};

/// One search hit as the provider returns it, before it becomes an `Article`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<RawSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSource {
    #[serde(default)]
    pub name: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Returns the name of the upstream service
    fn name(&self) -> &str;

    /// Runs one topic search. Any error marks this query as failed.
    async fn search(&self, query: &str) -> Result<Vec<RawArticle>>;
}
