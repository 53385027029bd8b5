//! The `collect` command: one pipeline pass for a single source.

use qdata_core::{AppConfig, MemorySink, SystemClock};
use qdata_ingest::{run_pipeline, GdeltAdapter, NewsApiAdapter, PipelineReport, SourceAdapter};

use crate::SourceArg;

fn build_adapter(config: &AppConfig, source: SourceArg) -> anyhow::Result<Box<dyn SourceAdapter>> {
    let adapter: Box<dyn SourceAdapter> = match source {
        SourceArg::Gdelt => Box::new(GdeltAdapter::from_config(config)?),
        SourceArg::Newsapi => Box::new(NewsApiAdapter::from_config(config)?),
    };
    Ok(adapter)
}

/// Runs one collection pass and prints the resulting report.
///
/// With `dry_run` the records are collected into memory and printed as JSON
/// lines; the document store is never contacted.
///
/// # Errors
///
/// Returns an error if the adapter cannot be built, the store cannot be
/// reached, or the pass finished with a fetch or persist failure.
pub(crate) async fn run_collect(
    config: &AppConfig,
    source: SourceArg,
    query: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let adapter = build_adapter(config, source)?;

    let report = if dry_run {
        let sink = MemorySink::new();
        let report = run_pipeline(adapter.as_ref(), &sink, &SystemClock, query).await;
        for record in sink.documents() {
            println!("{}", serde_json::to_string(&record)?);
        }
        report
    } else {
        let pool = qdata_db::connect_pool(
            &config.document_store_url,
            qdata_db::PoolConfig::from_app_config(config),
        )
        .await?;
        qdata_db::run_migrations(&pool).await?;
        let sink = qdata_db::PgSink::new(pool.clone(), &config.collection);
        let report = run_pipeline(adapter.as_ref(), &sink, &SystemClock, query).await;
        pool.close().await;
        report
    };

    finish(&report, dry_run)
}

fn finish(report: &PipelineReport, dry_run: bool) -> anyhow::Result<()> {
    let prefix = if dry_run { "dry-run: " } else { "" };
    eprintln!("{prefix}{report}");
    if report.is_clean() {
        Ok(())
    } else {
        anyhow::bail!("collection for {} finished with errors", report.platform)
    }
}
