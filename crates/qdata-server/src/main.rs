mod scheduler;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::scheduler::Workers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration errors abort here, before any provider is contacted.
    let config = Arc::new(qdata_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, collection = %config.collection, "qdata-server starting");

    // Lazy: an unreachable store is reported by the probe and ingest jobs
    // instead of stopping the process.
    let pool_config = qdata_db::PoolConfig::from_app_config(&config);
    let pool = qdata_db::connect_pool_lazy(&config.document_store_url, pool_config)?;

    let sink = Arc::new(qdata_db::PgSink::new(pool.clone(), &config.collection));
    let adapters = Arc::new(qdata_ingest::adapters_from_config(&config)?);
    let workers = Workers::new(Arc::clone(&config), sink, adapters)
        .with_migrations(pool.clone());

    workers.probe().await;
    workers.ingest().await;

    let mut scheduler = scheduler::build_scheduler(workers).await?;

    shutdown_signal().await;
    scheduler.shutdown().await?;
    pool.close().await;
    tracing::info!("qdata-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, stopping scheduled jobs");
}
