//! Provider-native article shapes and adapter metadata.
//!
//! Every field is optional: upstream APIs omit or null fields freely, and
//! deciding what is usable is the normalizer's job.

use qdata_core::Platform;
use serde::Deserialize;

use crate::error::SourceError;

// ---------------------------------------------------------------------------
// GDELT DOC 2.0 (`mode=ArtList`)
// ---------------------------------------------------------------------------

/// Response body for `mode=ArtList&format=json`. GDELT answers `{}` when a
/// query matches nothing.
#[derive(Debug, Deserialize)]
pub(crate) struct GdeltResponse {
    #[serde(default)]
    pub articles: Vec<GdeltArticle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GdeltArticle {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_mobile: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Compact UTC timestamp, e.g. `20250115T093000Z`.
    #[serde(default, rename = "seendate")]
    pub seen_date: Option<String>,
    #[serde(default, rename = "socialimage")]
    pub social_image: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    /// Language name, e.g. `English`.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, rename = "sourcecountry")]
    pub source_country: Option<String>,
}

// ---------------------------------------------------------------------------
// NewsAPI `/v2/everything`
// ---------------------------------------------------------------------------

/// Response envelope. On failure NewsAPI sends `"status": "error"` with a
/// `code` and `message` instead of `articles`.
#[derive(Debug, Deserialize)]
pub(crate) struct NewsApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiArticle {
    #[serde(default)]
    pub source: Option<NewsApiSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Not part of the documented schema, but honoured when present.
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewsApiSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Adapter-facing types
// ---------------------------------------------------------------------------

/// One article exactly as a provider returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawArticle {
    Gdelt(GdeltArticle),
    NewsApi(NewsApiArticle),
}

impl RawArticle {
    #[must_use]
    pub fn platform(&self) -> Platform {
        match self {
            RawArticle::Gdelt(_) => Platform::Gdelt,
            RawArticle::NewsApi(_) => Platform::NewsApi,
        }
    }
}

/// Identity an adapter stamps onto every record it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterMeta {
    pub platform: Platform,
    pub collector: String,
    pub version: String,
    /// Fallback language code when the article carries none.
    pub language: String,
}

/// Outcome of [`crate::SourceAdapter::fetch`].
///
/// `articles` is empty whenever `error` is set.
#[derive(Debug, Default)]
pub struct Fetched {
    pub articles: Vec<RawArticle>,
    pub error: Option<SourceError>,
}
