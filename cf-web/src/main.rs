//! cf-web - Column Finder web service
//!
//! Serves protein listings, detail pages with purification column
//! recommendations, and a JSON API over the database filled by cf-ingest.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cf_common::config::TomlConfig;
use cf_web::{build_router, AppState};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for cf-web
#[derive(Parser, Debug)]
#[command(name = "cf-web")]
#[command(about = "Column Finder web service")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "CF_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, env = "CF_DATABASE")]
    database: Option<PathBuf>,

    /// Address to bind
    #[arg(short, long, env = "CF_WEB_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CF_WEB_PORT")]
    port: Option<u16>,

    /// Open an existing database without write access
    #[arg(long, env = "CF_READ_ONLY")]
    read_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = TomlConfig::load_or_default(args.config.as_deref());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=info", config.logging.level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Column Finder web service (cf-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let db_path = config.database_path(args.database.as_deref());
    info!("Database path: {}", db_path.display());

    let pool = if args.read_only {
        cf_common::db::connect_readonly(&db_path).await
    } else {
        cf_common::db::init_database(&db_path).await
    }
    .context("Failed to open database")?;

    let bind = args.bind.unwrap_or_else(|| config.web.bind.clone());
    let port = args.port.unwrap_or(config.web.port);
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    let app = build_router(AppState::new(pool));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("cf-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
