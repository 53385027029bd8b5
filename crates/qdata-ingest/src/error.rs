use thiserror::Error;

/// Errors raised while fetching from an upstream news API.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}: {message}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        message: String,
    },

    /// The provider returned an error envelope with a 2xx status.
    #[error("provider API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Adapter settings are unusable (bad base URL, empty default query,
    /// missing credential).
    #[error("invalid adapter configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification used in logs and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Parse,
    Config,
}

impl SourceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::Http(_) | SourceError::UnexpectedStatus { .. } | SourceError::Api(_) => {
                ErrorKind::Fetch
            }
            SourceError::Deserialize { .. } => ErrorKind::Parse,
            SourceError::InvalidConfig(_) => ErrorKind::Config,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Fetch => write!(f, "fetch"),
            ErrorKind::Parse => write!(f, "parse"),
            ErrorKind::Config => write!(f, "config"),
        }
    }
}
