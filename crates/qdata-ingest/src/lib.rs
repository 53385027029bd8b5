//! News ingestion for qdata.
//!
//! Each upstream API is wrapped by a [`SourceAdapter`]. A pipeline pass
//! fetches raw provider articles, normalizes them into
//! [`qdata_core::NewsRecord`]s and hands the batch to a
//! [`qdata_core::Sink`]. Fetch and parse failures are recovered at the
//! adapter boundary and reported, never propagated.

pub mod adapter;
pub mod error;
pub mod gdelt;
pub mod newsapi;
pub mod normalize;
pub mod pipeline;
pub mod retry;
pub mod types;

mod http;

pub use adapter::{adapters_from_config, SourceAdapter};
pub use error::{ErrorKind, SourceError};
pub use gdelt::{GdeltAdapter, GdeltOptions};
pub use newsapi::{NewsApiAdapter, NewsApiOptions};
pub use normalize::{normalize, normalize_batch};
pub use pipeline::{run_pipeline, PipelineReport};
pub use retry::RetryPolicy;
pub use types::{AdapterMeta, Fetched, GdeltArticle, NewsApiArticle, NewsApiSource, RawArticle};
