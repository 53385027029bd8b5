//! The capability shared by every upstream news source.

use async_trait::async_trait;
use qdata_core::{AppConfig, Platform};

use crate::error::SourceError;
use crate::gdelt::GdeltAdapter;
use crate::newsapi::NewsApiAdapter;
use crate::types::{AdapterMeta, Fetched, RawArticle};

#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn platform(&self) -> Platform;

    /// Query used when the caller supplies none. Never empty.
    fn default_query(&self) -> &str;

    fn meta(&self) -> &AdapterMeta;

    /// Performs one provider request for an already-resolved query.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] / [`SourceError::UnexpectedStatus`] /
    ///   [`SourceError::Api`] when the request fails.
    /// - [`SourceError::Deserialize`] when the body is not the expected JSON.
    async fn fetch_raw(&self, query: &str) -> Result<Vec<RawArticle>, SourceError>;

    /// Returns `query` when it has content, otherwise the default query.
    fn resolve_query<'a>(&'a self, query: Option<&'a str>) -> &'a str {
        match query.map(str::trim) {
            Some(q) if !q.is_empty() => q,
            _ => self.default_query(),
        }
    }

    /// Fetches raw articles, recovering from every failure.
    ///
    /// Errors are logged and returned alongside an empty article list so a
    /// failed fetch never aborts the caller.
    async fn fetch(&self, query: Option<&str>) -> Fetched {
        let query = self.resolve_query(query);
        match self.fetch_raw(query).await {
            Ok(articles) => {
                tracing::info!(
                    platform = %self.platform(),
                    query,
                    count = articles.len(),
                    "fetched articles"
                );
                Fetched {
                    articles,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    platform = %self.platform(),
                    query,
                    kind = %e.kind(),
                    error = %e,
                    "article fetch failed"
                );
                Fetched {
                    articles: Vec::new(),
                    error: Some(e),
                }
            }
        }
    }
}

/// Builds every adapter the configuration enables, GDELT first.
///
/// NewsAPI is skipped with a warning when `NEWS_API_KEY` is unset.
///
/// # Errors
///
/// Returns [`SourceError::InvalidConfig`] or [`SourceError::Http`] if an
/// enabled adapter cannot be constructed.
pub fn adapters_from_config(
    config: &AppConfig,
) -> Result<Vec<Box<dyn SourceAdapter>>, SourceError> {
    let mut adapters: Vec<Box<dyn SourceAdapter>> =
        vec![Box::new(GdeltAdapter::from_config(config)?)];

    if config.newsapi_key.is_some() {
        adapters.push(Box::new(NewsApiAdapter::from_config(config)?));
    } else {
        tracing::warn!("NEWS_API_KEY is not set; NewsAPI adapter disabled");
    }

    Ok(adapters)
}
