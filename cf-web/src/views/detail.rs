//! Protein detail page with tag override

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use cf_common::{db, AffinityTag};

use super::{column_link, error_banner, error_page, escape, layout, number_or_dash, text_or_dash};
use crate::api::proteins::TagQuery;
use crate::AppState;

fn tag_options(selected: Option<&str>) -> String {
    let mut options = vec![format!(
        r#"<option value=""{}>No tag</option>"#,
        if selected.is_none() { " selected" } else { "" }
    )];

    for tag in AffinityTag::ALL {
        let label = tag.label();
        options.push(format!(
            r#"<option value="{label}"{sel}>{label}</option>"#,
            label = label,
            sel = if selected == Some(label) { " selected" } else { "" }
        ));
    }

    options.join("")
}

/// GET /proteins/:id?tag=His
///
/// Unknown or non-integer ids get a 404 page. Database errors are shown
/// inline like on the other pages.
pub async fn detail_page(
    State(state): State<AppState>,
    protein_id: Result<Path<i64>, PathRejection>,
    Query(query): Query<TagQuery>,
) -> Response {
    let Ok(Path(protein_id)) = protein_id else {
        return error_page(StatusCode::NOT_FOUND, "Protein not found");
    };

    let protein = match db::get_protein(&state.db, protein_id).await {
        Ok(Some(protein)) => protein,
        Ok(None) => {
            return error_page(StatusCode::NOT_FOUND, &format!("Protein {} not found", protein_id))
        }
        Err(e) => {
            tracing::warn!(protein_id, "Protein lookup failed: {}", e);
            let content = format!(
                r#"{}
<p><a href="/proteins">Back to proteins</a></p>"#,
                error_banner(Some(&format!("Database error: {}", e)))
            );
            return Html(layout("Protein", &content)).into_response();
        }
    };

    let tag_choice = query.tag();
    let rec = protein.recommendation_with_tag(tag_choice).fields();

    let content = format!(
        r#"<h1>{name}</h1>
<table>
    <tr><th>UniProt</th><td>{accession}</td></tr>
    <tr><th>Gene</th><td>{gene}</td></tr>
    <tr><th>Organism</th><td>{organism}</td></tr>
    <tr><th>Length</th><td>{length}</td></tr>
    <tr><th>MW (kDa)</th><td>{mw}</td></tr>
    <tr><th>pI</th><td>{pi}</td></tr>
    <tr><th>Stored tag</th><td>{tag}</td></tr>
</table>
<h2>Recommendation</h2>
<form action="/proteins/{id}" method="get">
    <label for="tag">Affinity tag</label>
    <select name="tag" id="tag">{options}</select>
    <button type="submit">Update</button>
</form>
<table>
    <tr><th>Primary column</th><td>{primary}</td></tr>
    <tr><th>Polishing column</th><td>{polishing}</td></tr>
</table>
<p class="muted"><a href="/api/proteins/{id}{tag_param}">JSON</a></p>"#,
        name = escape(&protein.name),
        accession = text_or_dash(protein.uniprot_id.as_deref()),
        gene = text_or_dash(protein.gene_name.as_deref()),
        organism = text_or_dash(protein.organism.as_deref()),
        length = protein
            .length
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string()),
        mw = number_or_dash(protein.mw_kda, 2),
        pi = number_or_dash(protein.pi, 2),
        tag = text_or_dash(protein.tag.as_deref()),
        id = protein.id,
        options = tag_options(tag_choice),
        primary = column_link(rec.recommended_column.as_deref(), &rec.recommended_url),
        polishing = column_link(rec.polishing_column.as_deref(), &rec.polishing_url),
        tag_param = tag_choice
            .and_then(AffinityTag::parse)
            .map(|t| format!("?tag={}", t.label()))
            .unwrap_or_default(),
    );

    Html(layout(&protein.name, &content)).into_response()
}
