//! cf-ingest - UniProt import for Column Finder
//!
//! Fetches reviewed protein records, derives MW (kDa) and estimated pI, and
//! stores them in the SQLite database served by cf-web.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cf_common::config::TomlConfig;
use cf_ingest::{run_ingest, UniProtClient};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for cf-ingest
#[derive(Parser, Debug)]
#[command(name = "cf-ingest")]
#[command(about = "Import UniProt proteins into the Column Finder database")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "CF_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, env = "CF_DATABASE")]
    database: Option<PathBuf>,

    /// UniProt search query
    #[arg(short, long, env = "CF_UNIPROT_QUERY")]
    query: Option<String>,

    /// Maximum number of records to fetch
    #[arg(short, long, env = "CF_MAX_RESULTS")]
    max_results: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = TomlConfig::load_or_default(args.config.as_deref());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting cf-ingest v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let db_path = config.database_path(args.database.as_deref());
    let query = args.query.unwrap_or_else(|| config.ingest.query.clone());
    let max_results = args.max_results.unwrap_or(config.ingest.max_results);

    info!("Database: {}", db_path.display());

    let pool = cf_common::db::init_database(&db_path)
        .await
        .context("Failed to open database")?;

    let client = UniProtClient::new().context("Failed to build UniProt client")?;

    let summary = run_ingest(&pool, &client, &query, max_results)
        .await
        .context("Ingest failed")?;

    info!(
        fetched = summary.fetched,
        stored = summary.stored,
        skipped = summary.skipped,
        with_pi = summary.with_pi,
        "Ingest complete, {} proteins in store",
        summary.total_in_store
    );

    pool.close().await;
    Ok(())
}
