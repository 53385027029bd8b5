//! NewsAPI `/v2/everything` adapter.
//!
//! The API key travels in the `X-Api-Key` header rather than the query
//! string so request URLs can be logged safely.

use async_trait::async_trait;
use qdata_core::{AppConfig, Platform};
use reqwest::{Client, Url};

use crate::adapter::SourceAdapter;
use crate::error::SourceError;
use crate::http::{build_client, get_json, parse_base_url};
use crate::retry::RetryPolicy;
use crate::types::{AdapterMeta, NewsApiResponse, RawArticle};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/everything";
const COLLECTOR: &str = "newsapi.client";
const COLLECTOR_VERSION: &str = "1.0.0";

/// Settings for [`NewsApiAdapter`].
#[derive(Clone)]
pub struct NewsApiOptions {
    pub base_url: String,
    pub api_key: String,
    pub default_query: String,
    pub language: String,
    pub page_size: u32,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl NewsApiOptions {
    /// Production defaults pointed at `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            default_query: "finance".to_string(),
            language: "en".to_string(),
            page_size: 50,
            timeout_secs: 30,
            user_agent: "qdata/0.1 (news-ingest)".to_string(),
            retry: RetryPolicy::default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`SourceError::InvalidConfig`] when `NEWS_API_KEY` is unset.
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        let api_key = config
            .newsapi_key
            .clone()
            .ok_or_else(|| SourceError::InvalidConfig("NEWS_API_KEY is not set".to_string()))?;

        Ok(Self {
            base_url: config.newsapi_base_url.clone(),
            api_key,
            default_query: config.newsapi_default_query.clone(),
            language: config.newsapi_language.clone(),
            page_size: config.newsapi_page_size,
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            retry: RetryPolicy::from_config(config),
        })
    }
}

impl std::fmt::Debug for NewsApiOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApiOptions")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .field("default_query", &self.default_query)
            .field("language", &self.language)
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .finish()
    }
}

pub struct NewsApiAdapter {
    client: Client,
    base_url: Url,
    api_key: String,
    default_query: String,
    page_size: u32,
    retry: RetryPolicy,
    meta: AdapterMeta,
}

impl NewsApiAdapter {
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidConfig`] for an unparsable base URL, a
    /// blank API key or a blank default query, or [`SourceError::Http`] if
    /// the HTTP client cannot be built.
    pub fn new(options: NewsApiOptions) -> Result<Self, SourceError> {
        if options.api_key.trim().is_empty() {
            return Err(SourceError::InvalidConfig(
                "NewsAPI key must not be empty".to_string(),
            ));
        }
        let default_query = options.default_query.trim().to_string();
        if default_query.is_empty() {
            return Err(SourceError::InvalidConfig(
                "NewsAPI default query must not be empty".to_string(),
            ));
        }

        Ok(Self {
            client: build_client(options.timeout_secs, &options.user_agent)?,
            base_url: parse_base_url(&options.base_url)?,
            api_key: options.api_key,
            default_query,
            page_size: options.page_size,
            retry: options.retry,
            meta: AdapterMeta {
                platform: Platform::NewsApi,
                collector: COLLECTOR.to_string(),
                version: COLLECTOR_VERSION.to_string(),
                language: options.language,
            },
        })
    }

    /// # Errors
    ///
    /// See [`NewsApiOptions::from_config`] and [`NewsApiAdapter::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        Self::new(NewsApiOptions::from_config(config)?)
    }

    fn build_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("language", &self.meta.language)
            .append_pair("pageSize", &self.page_size.to_string());
        url
    }

    async fn request(&self, query: &str) -> Result<NewsApiResponse, SourceError> {
        let request = self
            .client
            .get(self.build_url(query))
            .header("X-Api-Key", &self.api_key);
        let response: NewsApiResponse = get_json(request, "newsapi everything").await?;

        if response.status.as_deref() == Some("error") {
            let code = response.code.as_deref().unwrap_or("unknown");
            let message = response.message.as_deref().unwrap_or("no message");
            return Err(SourceError::Api(format!("{code}: {message}")));
        }

        Ok(response)
    }
}

impl Default for NewsApiOptions {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, "")
    }
}

#[async_trait]
impl SourceAdapter for NewsApiAdapter {
    fn platform(&self) -> Platform {
        Platform::NewsApi
    }

    fn default_query(&self) -> &str {
        &self.default_query
    }

    fn meta(&self) -> &AdapterMeta {
        &self.meta
    }

    async fn fetch_raw(&self, query: &str) -> Result<Vec<RawArticle>, SourceError> {
        let response = self.retry.run(|| self.request(query)).await?;
        Ok(response
            .articles
            .into_iter()
            .take(self.page_size as usize)
            .map(RawArticle::NewsApi)
            .collect())
    }
}
