//! Connectivity probes for the relational and document stores.
//!
//! Each probe opens its own single-connection pool, runs one trivial read
//! and closes the pool again. Probes never return an error: every failure
//! is folded into [`HealthStatus::detail`].

use std::time::Duration;

use qdata_core::AppConfig;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::postgres::PgPoolOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeTarget {
    Relational,
    Document,
}

impl ProbeTarget {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ProbeTarget::Relational => "relational",
            ProbeTarget::Document => "document",
        }
    }

    fn query(self, backend: Backend) -> &'static str {
        match (self, backend) {
            (ProbeTarget::Relational, _) => "SELECT COUNT(*) FROM information_schema.tables",
            (ProbeTarget::Document, Backend::Postgres) => {
                "SELECT COUNT(*) FROM pg_database WHERE NOT datistemplate"
            }
            (ProbeTarget::Document, Backend::MySql) => {
                "SELECT COUNT(*) FROM information_schema.schemata"
            }
        }
    }

    fn noun(self) -> &'static str {
        match self {
            ProbeTarget::Relational => "tables",
            ProbeTarget::Document => "databases",
        }
    }
}

/// Database driver a probe URL is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    MySql,
}

impl Backend {
    /// `mysql://` and `mariadb://` select MySQL; every other scheme is
    /// handed to the Postgres driver.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let scheme = url.trim().split_once("://").map_or("", |(s, _)| s);
        if scheme.eq_ignore_ascii_case("mysql") || scheme.eq_ignore_ascii_case("mariadb") {
            Backend::MySql
        } else {
            Backend::Postgres
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub ok: bool,
    pub detail: String,
}

impl HealthStatus {
    fn up(detail: String) -> Self {
        Self { ok: true, detail }
    }

    fn down(detail: String) -> Self {
        Self { ok: false, detail }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.ok { "OK" } else { "FAIL" };
        write!(f, "{marker} {}", self.detail)
    }
}

/// Runs one probe against `url`. `None` reports the target as unconfigured.
pub async fn probe(
    target: ProbeTarget,
    url: Option<&str>,
    acquire_timeout_secs: u64,
) -> HealthStatus {
    let Some(url) = url else {
        return HealthStatus::down("not configured".to_string());
    };

    let backend = Backend::from_url(url);
    let timeout = Duration::from_secs(acquire_timeout_secs);
    let query = target.query(backend);
    let counted = match backend {
        Backend::Postgres => count_postgres(url, query, timeout).await,
        Backend::MySql => count_mysql(url, query, timeout).await,
    };

    match counted {
        Ok(count) => HealthStatus::up(format!("Connected ({count} {})", target.noun())),
        Err(e) => HealthStatus::down(format!("Connection failed: {e}")),
    }
}

async fn count_postgres(url: &str, query: &str, timeout: Duration) -> Result<i64, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(timeout)
        .connect(url)
        .await?;
    let count = sqlx::query_scalar::<_, i64>(query).fetch_one(&pool).await;
    pool.close().await;
    count
}

async fn count_mysql(url: &str, query: &str, timeout: Duration) -> Result<i64, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(timeout)
        .connect(url)
        .await?;
    let count = sqlx::query_scalar::<_, i64>(query).fetch_one(&pool).await;
    pool.close().await;
    count
}

/// Probes both stores, relational first.
pub async fn probe_all(config: &AppConfig) -> Vec<(&'static str, HealthStatus)> {
    let timeout = config.db_acquire_timeout_secs;
    let relational = probe(
        ProbeTarget::Relational,
        config.database_url.as_deref(),
        timeout,
    )
    .await;
    let document = probe(
        ProbeTarget::Document,
        Some(config.document_store_url.as_str()),
        timeout,
    )
    .await;

    for (target, status) in [
        (ProbeTarget::Relational, &relational),
        (ProbeTarget::Document, &document),
    ] {
        if status.ok {
            tracing::info!(store = target.name(), "{status}");
        } else {
            tracing::warn!(store = target.name(), "{status}");
        }
    }

    vec![
        (ProbeTarget::Relational.name(), relational),
        (ProbeTarget::Document.name(), document),
    ]
}
