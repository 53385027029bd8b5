//! Persistence boundary for normalized records.
//!
//! [`Sink::insert_batch`] is the store-specific write; [`Sink::persist`]
//! wraps it with the recovery policy every caller relies on: empty batches
//! never reach the store, and a rejected batch is logged and counted as
//! zero rather than propagated.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use thiserror::Error;

use crate::record::NewsRecord;

/// The store rejected a whole batch. Nothing from the batch was committed.
#[derive(Debug, Error)]
#[error("store rejected batch of {batch_size} records: {reason}")]
pub struct PersistError {
    pub batch_size: usize,
    pub reason: String,
}

/// Outcome of [`Sink::persist`].
#[derive(Debug, Default)]
pub struct Persisted {
    pub inserted: usize,
    pub error: Option<PersistError>,
}

#[async_trait]
pub trait Sink: Send + Sync {
    /// Writes `records` as one atomic batch and returns the number inserted.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the store rejects the batch.
    async fn insert_batch(&self, records: &[NewsRecord]) -> Result<usize, PersistError>;

    /// Persists a batch, recovering from store rejection.
    ///
    /// An empty slice returns immediately without touching the store.
    async fn persist(&self, records: &[NewsRecord]) -> Persisted {
        if records.is_empty() {
            return Persisted::default();
        }

        match self.insert_batch(records).await {
            Ok(inserted) => {
                tracing::info!(count = inserted, "persisted news batch");
                Persisted {
                    inserted,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(batch_size = records.len(), error = %e, "news batch insert failed");
                Persisted {
                    inserted: 0,
                    error: Some(e),
                }
            }
        }
    }
}

/// In-process collection.
///
/// Backs the CLI's `--dry-run` mode and the pipeline tests. A rejecting sink
/// fails every batch, mirroring a store that refuses writes.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Mutex<Vec<NewsRecord>>,
    batches: Mutex<usize>,
    reject_with: Option<String>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every batch with `reason`.
    #[must_use]
    pub fn rejecting(reason: &str) -> Self {
        Self {
            reject_with: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Snapshot of every stored record, in insertion order.
    #[must_use]
    pub fn documents(&self) -> Vec<NewsRecord> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `insert_batch` calls that reached the store.
    #[must_use]
    pub fn batch_calls(&self) -> usize {
        *self.batches.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn insert_batch(&self, records: &[NewsRecord]) -> Result<usize, PersistError> {
        *self.batches.lock().unwrap_or_else(PoisonError::into_inner) += 1;

        if let Some(reason) = &self.reject_with {
            return Err(PersistError {
                batch_size: records.len(),
                reason: reason.clone(),
            });
        }

        let mut documents = self
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        documents.extend_from_slice(records);
        Ok(records.len())
    }
}
