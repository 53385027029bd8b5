//! Canonical news record persisted to the document store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upstream provider a record was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Gdelt,
    NewsApi,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Gdelt => "gdelt",
            Platform::NewsApi => "newsapi",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSource {
    pub platform: Platform,
    /// Outlet name or publishing domain.
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub collector: String,
    pub version: String,
}

/// One normalized article.
///
/// `title` and `url` are always non-empty; the normalizer drops articles
/// that cannot satisfy that. Records are written once and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRecord {
    pub source: RecordSource,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    /// Provider-native timestamp string, passed through unparsed.
    pub published_at: Option<String>,
    pub collected_at: DateTime<Utc>,
    pub language: String,
    pub meta: RecordMeta,
}

impl NewsRecord {
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.source.platform
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample() -> NewsRecord {
        NewsRecord {
            source: RecordSource {
                platform: Platform::NewsApi,
                name: Some("Reuters".to_string()),
            },
            title: "Markets rally".to_string(),
            description: None,
            content: None,
            url: "https://example.com/a".to_string(),
            published_at: Some("2025-01-15T09:30:00Z".to_string()),
            collected_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap(),
            language: "en".to_string(),
            meta: RecordMeta {
                collector: "newsapi.client".to_string(),
                version: "1.0.0".to_string(),
            },
        }
    }

    #[test]
    fn serializes_with_document_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["source"]["platform"], "newsapi");
        assert_eq!(value["source"]["name"], "Reuters");
        assert_eq!(value["publishedAt"], "2025-01-15T09:30:00Z");
        assert_eq!(value["collectedAt"], "2025-01-15T10:00:00Z");
        assert_eq!(value["meta"]["collector"], "newsapi.client");
        assert!(value.get("published_at").is_none());
    }

    #[test]
    fn platform_display_matches_serde_name() {
        assert_eq!(Platform::Gdelt.to_string(), "gdelt");
        assert_eq!(
            serde_json::to_value(Platform::NewsApi).unwrap(),
            serde_json::json!("newsapi")
        );
    }
}
