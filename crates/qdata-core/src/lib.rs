//! Shared configuration, data model and persistence contract for qdata.

pub mod app_config;
pub mod clock;
pub mod config;
pub mod record;
pub mod sink;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{NewsRecord, Platform, RecordMeta, RecordSource};
pub use sink::{MemorySink, PersistError, Persisted, Sink};

/// Startup configuration failures. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
