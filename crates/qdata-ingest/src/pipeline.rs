//! One ingestion pass: fetch, normalize, persist.

use qdata_core::{Clock, Platform, Sink};

use crate::adapter::SourceAdapter;
use crate::error::ErrorKind;
use crate::normalize::normalize_batch;

/// Summary of a single pass. Errors are carried as display strings; a pass
/// never fails as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub platform: Platform,
    pub query: String,
    pub fetched: usize,
    pub normalized: usize,
    pub skipped: usize,
    pub inserted: usize,
    pub fetch_error: Option<(ErrorKind, String)>,
    pub persist_error: Option<String>,
}

impl PipelineReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.fetch_error.is_none() && self.persist_error.is_none()
    }
}

impl std::fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some((kind, message)) = &self.fetch_error {
            return write!(
                f,
                "[{}] query '{}': {kind} error: {message}",
                self.platform, self.query
            );
        }
        write!(
            f,
            "[{}] query '{}': fetched {}, kept {} ({} skipped), inserted {}",
            self.platform, self.query, self.fetched, self.normalized, self.skipped, self.inserted
        )?;
        if let Some(message) = &self.persist_error {
            write!(f, "; persist failed: {message}")?;
        }
        Ok(())
    }
}

/// Runs one fetch → normalize → persist pass for `adapter`.
///
/// `query` falls back to the adapter's default. Every failure is recovered
/// at its own boundary and recorded in the returned report.
pub async fn run_pipeline(
    adapter: &dyn SourceAdapter,
    sink: &dyn Sink,
    clock: &dyn Clock,
    query: Option<&str>,
) -> PipelineReport {
    let resolved = adapter.resolve_query(query).to_string();
    let fetched = adapter.fetch(Some(&resolved)).await;
    let fetched_count = fetched.articles.len();

    let (records, skipped) = normalize_batch(fetched.articles, adapter.meta(), clock);
    if skipped > 0 {
        tracing::debug!(
            platform = %adapter.platform(),
            skipped,
            "dropped articles without a usable title or url"
        );
    }

    let persisted = sink.persist(&records).await;

    let report = PipelineReport {
        platform: adapter.platform(),
        query: resolved,
        fetched: fetched_count,
        normalized: records.len(),
        skipped,
        inserted: persisted.inserted,
        fetch_error: fetched.error.map(|e| (e.kind(), e.to_string())),
        persist_error: persisted.error.map(|e| e.to_string()),
    };

    if report.is_clean() {
        tracing::info!(platform = %report.platform, "{report}");
    } else {
        tracing::warn!(platform = %report.platform, "{report}");
    }

    report
}
