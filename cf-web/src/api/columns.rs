//! Chromatography column catalog endpoint

use axum::{extract::State, routing::get, Json, Router};
use cf_common::db;
use cf_common::models::ChromatographyColumn;

use crate::{error::ApiResult, AppState};

/// GET /api/columns
///
/// Lists the seeded column catalog in insertion order.
pub async fn list_columns(State(state): State<AppState>) -> ApiResult<Json<Vec<ChromatographyColumn>>> {
    Ok(Json(db::list_columns(&state.db).await?))
}

pub fn column_routes() -> Router<AppState> {
    Router::new().route("/api/columns", get(list_columns))
}
