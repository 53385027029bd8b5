//! GDELT DOC 2.0 article-list adapter.

use async_trait::async_trait;
use qdata_core::{AppConfig, Platform};
use reqwest::{Client, Url};

use crate::adapter::SourceAdapter;
use crate::error::SourceError;
use crate::http::{build_client, get_json, parse_base_url};
use crate::retry::RetryPolicy;
use crate::types::{AdapterMeta, GdeltResponse, RawArticle};

const DEFAULT_BASE_URL: &str = "https://api.gdeltproject.org/api/v2/doc/doc";
const DEFAULT_QUERY: &str = "finance OR economy OR stock OR market";
const COLLECTOR: &str = "gdelt.collector";
const COLLECTOR_VERSION: &str = "1.0.0";

/// Settings for [`GdeltAdapter`].
#[derive(Debug, Clone)]
pub struct GdeltOptions {
    pub base_url: String,
    pub default_query: String,
    /// Sent as `maxrecords`; also caps the returned list.
    pub page_size: u32,
    pub language: String,
    /// Keep only articles whose `sourcecountry` matches (case-insensitive).
    pub source_country: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl GdeltOptions {
    /// Production defaults pointed at `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            default_query: DEFAULT_QUERY.to_string(),
            page_size: 50,
            language: "en".to_string(),
            source_country: None,
            timeout_secs: 30,
            user_agent: "qdata/0.1 (news-ingest)".to_string(),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.gdelt_base_url.clone(),
            default_query: config.gdelt_query.clone(),
            page_size: config.gdelt_page_size,
            language: config.gdelt_language.clone(),
            source_country: config.gdelt_source_country.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            retry: RetryPolicy::from_config(config),
        }
    }
}

impl Default for GdeltOptions {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

pub struct GdeltAdapter {
    client: Client,
    base_url: Url,
    default_query: String,
    page_size: u32,
    source_country: Option<String>,
    retry: RetryPolicy,
    meta: AdapterMeta,
}

impl GdeltAdapter {
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidConfig`] for an unparsable base URL or a
    /// blank default query, or [`SourceError::Http`] if the HTTP client
    /// cannot be built.
    pub fn new(options: GdeltOptions) -> Result<Self, SourceError> {
        let default_query = options.default_query.trim().to_string();
        if default_query.is_empty() {
            return Err(SourceError::InvalidConfig(
                "GDELT default query must not be empty".to_string(),
            ));
        }

        Ok(Self {
            client: build_client(options.timeout_secs, &options.user_agent)?,
            base_url: parse_base_url(&options.base_url)?,
            default_query,
            page_size: options.page_size,
            source_country: options.source_country,
            retry: options.retry,
            meta: AdapterMeta {
                platform: Platform::Gdelt,
                collector: COLLECTOR.to_string(),
                version: COLLECTOR_VERSION.to_string(),
                language: options.language,
            },
        })
    }

    /// # Errors
    ///
    /// See [`GdeltAdapter::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        Self::new(GdeltOptions::from_config(config))
    }

    fn build_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("mode", "ArtList")
            .append_pair("maxrecords", &self.page_size.to_string())
            .append_pair("format", "json");
        url
    }

    async fn request(&self, query: &str) -> Result<GdeltResponse, SourceError> {
        let url = self.build_url(query);
        get_json(self.client.get(url), "gdelt ArtList").await
    }

    fn keep(&self, country: Option<&str>) -> bool {
        match (&self.source_country, country) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted.eq_ignore_ascii_case(actual.trim()),
            (Some(_), None) => false,
        }
    }
}

#[async_trait]
impl SourceAdapter for GdeltAdapter {
    fn platform(&self) -> Platform {
        Platform::Gdelt
    }

    fn default_query(&self) -> &str {
        &self.default_query
    }

    fn meta(&self) -> &AdapterMeta {
        &self.meta
    }

    async fn fetch_raw(&self, query: &str) -> Result<Vec<RawArticle>, SourceError> {
        let response = self.retry.run(|| self.request(query)).await?;
        let total = response.articles.len();

        let articles: Vec<RawArticle> = response
            .articles
            .into_iter()
            .filter(|a| self.keep(a.source_country.as_deref()))
            .take(self.page_size as usize)
            .map(RawArticle::Gdelt)
            .collect();

        if articles.len() < total {
            tracing::debug!(
                total,
                kept = articles.len(),
                source_country = ?self.source_country,
                "filtered GDELT articles"
            );
        }

        Ok(articles)
    }
}
