//! Normalization from provider-native articles to [`qdata_core::NewsRecord`].
//!
//! Pure apart from the injected [`Clock`]: the same article and the same
//! clock reading always produce the same record.

use qdata_core::{Clock, NewsRecord, Platform, RecordMeta, RecordSource};

use crate::types::{AdapterMeta, GdeltArticle, NewsApiArticle, RawArticle};

/// Title NewsAPI substitutes for articles pulled by the publisher.
const NEWSAPI_REMOVED: &str = "[Removed]";

/// Maps one raw article to a record, or `None` when it has no usable title
/// or url.
#[must_use]
pub fn normalize(raw: RawArticle, meta: &AdapterMeta, clock: &dyn Clock) -> Option<NewsRecord> {
    match raw {
        RawArticle::Gdelt(article) => normalize_gdelt(article, meta, clock),
        RawArticle::NewsApi(article) => normalize_newsapi(article, meta, clock),
    }
}

/// Normalizes a batch, returning the kept records and the number skipped.
#[must_use]
pub fn normalize_batch(
    raws: Vec<RawArticle>,
    meta: &AdapterMeta,
    clock: &dyn Clock,
) -> (Vec<NewsRecord>, usize) {
    let total = raws.len();
    let records: Vec<NewsRecord> = raws
        .into_iter()
        .filter_map(|raw| normalize(raw, meta, clock))
        .collect();
    let skipped = total - records.len();
    (records, skipped)
}

fn normalize_gdelt(
    article: GdeltArticle,
    meta: &AdapterMeta,
    clock: &dyn Clock,
) -> Option<NewsRecord> {
    let title = clean(article.title)?;
    let url = clean(article.url)?;

    // GDELT reports language names ("English"), not codes; the adapter's
    // configured code is used instead.
    Some(NewsRecord {
        source: RecordSource {
            platform: Platform::Gdelt,
            name: clean(article.domain),
        },
        title,
        description: None,
        content: None,
        url,
        published_at: clean(article.seen_date),
        collected_at: clock.now(),
        language: meta.language.clone(),
        meta: record_meta(meta),
    })
}

fn normalize_newsapi(
    article: NewsApiArticle,
    meta: &AdapterMeta,
    clock: &dyn Clock,
) -> Option<NewsRecord> {
    let title = clean(article.title).filter(|t| t != NEWSAPI_REMOVED)?;
    let url = clean(article.url)?;

    Some(NewsRecord {
        source: RecordSource {
            platform: Platform::NewsApi,
            name: clean(article.source.and_then(|s| s.name)),
        },
        title,
        description: clean(article.description),
        content: clean(article.content),
        url,
        published_at: clean(article.published_at),
        collected_at: clock.now(),
        language: clean(article.language)
            .unwrap_or_else(|| meta.language.clone()),
        meta: record_meta(meta),
    })
}

fn record_meta(meta: &AdapterMeta) -> RecordMeta {
    RecordMeta {
        collector: meta.collector.clone(),
        version: meta.version.clone(),
    }
}

/// Trims, treating blank strings as absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
