//! cf-web library - Column Finder web service
//!
//! HTML views for browsing proteins and their recommended purification
//! columns, plus a small JSON API.

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod views;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(views::page_routes())
        .merge(api::protein_routes())
        .merge(api::column_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
