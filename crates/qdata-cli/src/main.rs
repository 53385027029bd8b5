mod collect;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "qdata-cli")]
#[command(about = "qdata news ingestion command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a single fetch → normalize → persist pass for one source.
    Collect {
        source: SourceArg,
        /// Search query; falls back to the source's configured default.
        #[arg(long)]
        query: Option<String>,
        /// Print normalized records instead of writing them to the store.
        #[arg(long)]
        dry_run: bool,
    },
    /// Check connectivity to the relational and document stores.
    Probe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    Gdelt,
    Newsapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = qdata_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Collect {
            source,
            query,
            dry_run,
        } => collect::run_collect(&config, source, query.as_deref(), dry_run).await,
        Commands::Probe => {
            let mut all_ok = true;
            for (name, status) in qdata_db::probe_all(&config).await {
                all_ok &= status.ok;
                println!("{name}: {status}");
            }
            if all_ok {
                Ok(())
            } else {
                anyhow::bail!("one or more stores are unreachable")
            }
        }
    }
}

#[cfg(test)]
mod tests;
