#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, read once at startup and passed into every
/// adapter, sink and job constructor.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub document_store_url: String,
    pub database_url: Option<String>,
    pub collection: String,
    pub gdelt_base_url: String,
    pub gdelt_query: String,
    pub gdelt_page_size: u32,
    pub gdelt_language: String,
    pub gdelt_source_country: Option<String>,
    pub newsapi_base_url: String,
    pub newsapi_key: Option<String>,
    pub newsapi_default_query: String,
    pub newsapi_language: String,
    pub newsapi_page_size: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub fetch_max_retries: u32,
    pub fetch_retry_backoff_base_ms: u64,
    pub ingest_interval_secs: u64,
    pub probe_interval_secs: u64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("document_store_url", &"[redacted]")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("collection", &self.collection)
            .field("gdelt_base_url", &self.gdelt_base_url)
            .field("gdelt_query", &self.gdelt_query)
            .field("gdelt_page_size", &self.gdelt_page_size)
            .field("gdelt_language", &self.gdelt_language)
            .field("gdelt_source_country", &self.gdelt_source_country)
            .field("newsapi_base_url", &self.newsapi_base_url)
            .field(
                "newsapi_key",
                &self.newsapi_key.as_ref().map(|_| "[redacted]"),
            )
            .field("newsapi_default_query", &self.newsapi_default_query)
            .field("newsapi_language", &self.newsapi_language)
            .field("newsapi_page_size", &self.newsapi_page_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("fetch_max_retries", &self.fetch_max_retries)
            .field(
                "fetch_retry_backoff_base_ms",
                &self.fetch_retry_backoff_base_ms,
            )
            .field("ingest_interval_secs", &self.ingest_interval_secs)
            .field("probe_interval_secs", &self.probe_interval_secs)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}
