use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const GDELT_MAX_PAGE_SIZE: u32 = 250;
const NEWSAPI_MAX_PAGE_SIZE: u32 = 100;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_blank = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(raw.trim().to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let page_size = |var: &str, max: u32| -> Result<u32, ConfigError> {
        let value = parse_u32(var, "50")?;
        if value == 0 || value > max {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be between 1 and {max}, got {value}"),
            });
        }
        Ok(value)
    };

    let positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = parse_u64(var, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let document_store_url = require("DOCUMENT_STORE_URL")?;
    let database_url = optional("DATABASE_URL");

    let env = parse_environment(&or_default("QDATA_ENV", "development"))?;
    let log_level = or_default("QDATA_LOG_LEVEL", "info");
    let collection = non_blank("QDATA_COLLECTION", "news_articles")?;

    let gdelt_base_url = or_default(
        "GDELT_BASE_URL",
        "https://api.gdeltproject.org/api/v2/doc/doc",
    );
    let gdelt_query = non_blank("GDELT_QUERY", "finance OR economy OR stock OR market")?;
    let gdelt_page_size = page_size("GDELT_PAGE_SIZE", GDELT_MAX_PAGE_SIZE)?;
    let gdelt_language = non_blank("GDELT_LANGUAGE", "en")?;
    let gdelt_source_country = optional("GDELT_SOURCE_COUNTRY");

    let newsapi_base_url = or_default("NEWS_API_BASE_URL", "https://newsapi.org/v2/everything");
    let newsapi_key = optional("NEWS_API_KEY");
    let newsapi_default_query = non_blank("NEWS_DEFAULT_QUERY", "finance")?;
    let newsapi_language = non_blank("NEWS_LANGUAGE", "en")?;
    let newsapi_page_size = page_size("NEWS_PAGE_SIZE", NEWSAPI_MAX_PAGE_SIZE)?;

    let request_timeout_secs = positive_u64("QDATA_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("QDATA_USER_AGENT", "qdata/0.1 (news-ingest)");
    let fetch_max_retries = parse_u32("QDATA_FETCH_MAX_RETRIES", "0")?;
    let fetch_retry_backoff_base_ms = parse_u64("QDATA_FETCH_RETRY_BACKOFF_BASE_MS", "1000")?;

    let ingest_interval_secs = positive_u64("QDATA_INGEST_INTERVAL_SECS", "300")?;
    let probe_interval_secs = positive_u64("QDATA_PROBE_INTERVAL_SECS", "300")?;

    let db_max_connections = parse_u32("QDATA_DB_MAX_CONNECTIONS", "5")?;
    if db_max_connections == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "QDATA_DB_MAX_CONNECTIONS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let db_min_connections = parse_u32("QDATA_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "QDATA_DB_MIN_CONNECTIONS".to_string(),
            reason: format!("must not exceed {db_max_connections}, got {db_min_connections}"),
        });
    }
    let db_acquire_timeout_secs = positive_u64("QDATA_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        env,
        log_level,
        document_store_url,
        database_url,
        collection,
        gdelt_base_url,
        gdelt_query,
        gdelt_page_size,
        gdelt_language,
        gdelt_source_country,
        newsapi_base_url,
        newsapi_key,
        newsapi_default_query,
        newsapi_language,
        newsapi_page_size,
        request_timeout_secs,
        user_agent,
        fetch_max_retries,
        fetch_retry_backoff_base_ms,
        ingest_interval_secs,
        probe_interval_secs,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "QDATA_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
