//! Protein JSON endpoints

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use cf_common::db;
use cf_common::models::ProteinWithRecommendation;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, error::ApiResult, AppState};

/// Optional affinity tag supplied by the user
#[derive(Debug, Default, Deserialize)]
pub struct TagQuery {
    #[serde(default)]
    pub tag: Option<String>,
}

impl TagQuery {
    /// Trimmed tag, `None` when blank
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// GET /api/proteins/:id?tag=His
///
/// Protein record merged with `recommended_column`, `recommended_url`,
/// `polishing_column` and `polishing_url`. A known `tag` re-runs the
/// recommendation as if the protein carried that tag. Ids that are not
/// integers are reported as not found.
pub async fn get_protein(
    State(state): State<AppState>,
    protein_id: Result<Path<i64>, PathRejection>,
    Query(query): Query<TagQuery>,
) -> ApiResult<Json<ProteinWithRecommendation>> {
    let Path(protein_id) =
        protein_id.map_err(|e| ApiError::NotFound(format!("protein ({})", e.body_text())))?;

    let protein = db::get_protein(&state.db, protein_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("protein {}", protein_id)))?;

    Ok(Json(ProteinWithRecommendation::new(protein, query.tag())))
}

/// Search suggestion response
#[derive(Debug, Serialize)]
pub struct ExampleResponse {
    pub search: String,
}

/// GET /api/example
///
/// Label of a random stored protein; empty when the store is empty.
pub async fn random_example(State(state): State<AppState>) -> ApiResult<Json<ExampleResponse>> {
    let search = db::random_label(&state.db).await?.unwrap_or_default();
    Ok(Json(ExampleResponse { search }))
}

pub fn protein_routes() -> Router<AppState> {
    Router::new()
        .route("/api/proteins/:protein_id", get(get_protein))
        .route("/api/example", get(random_example))
}
