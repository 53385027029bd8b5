//! The `news_documents` collection.

use async_trait::async_trait;
use qdata_core::{NewsRecord, PersistError, Sink};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::DbError;

/// Postgres parameter limit is 65535; four binds per row.
const MAX_ROWS_PER_STATEMENT: usize = 10_000;

/// Writes records as JSONB documents tagged with a collection name.
#[derive(Debug, Clone)]
pub struct PgSink {
    pool: PgPool,
    collection: String,
}

impl PgSink {
    #[must_use]
    pub fn new(pool: PgPool, collection: &str) -> Self {
        Self {
            pool,
            collection: collection.to_string(),
        }
    }

    async fn insert_documents(&self, records: &[NewsRecord]) -> Result<u64, DbError> {
        let mut documents = Vec::with_capacity(records.len());
        for record in records {
            let document = serde_json::to_value(record)?;
            documents.push((record, document));
        }

        // One transaction across chunks keeps the batch all-or-nothing.
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for chunk in documents.chunks(MAX_ROWS_PER_STATEMENT) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO news_documents (collection, platform, url, document) ",
            );
            builder.push_values(chunk, |mut row, (record, document)| {
                row.push_bind(&self.collection)
                    .push_bind(record.platform().as_str())
                    .push_bind(&record.url)
                    .push_bind(document);
            });
            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}

#[async_trait]
impl Sink for PgSink {
    async fn insert_batch(&self, records: &[NewsRecord]) -> Result<usize, PersistError> {
        let inserted = self
            .insert_documents(records)
            .await
            .map_err(|e| PersistError {
                batch_size: records.len(),
                reason: e.to_string(),
            })?;
        Ok(usize::try_from(inserted).unwrap_or(usize::MAX))
    }
}

/// Number of documents stored in `collection`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_documents(pool: &PgPool, collection: &str) -> Result<i64, DbError> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news_documents WHERE collection = $1")
            .bind(collection)
            .fetch_one(pool)
            .await?;
    Ok(count)
}
