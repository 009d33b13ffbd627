//! Protein search results page

use axum::{
    extract::{Query, State},
    response::Html,
};
use cf_common::db;
use cf_common::models::{PropertyRanges, Protein};
use serde::Deserialize;
use sqlx::SqlitePool;

use super::{column_link, error_banner, escape, layout, number_or_dash, text_or_dash};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// Position of `value` within `[min, max]` as a percentage.
///
/// `None` when any bound is missing; a degenerate range maps to 100.
pub fn scale(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> Option<f64> {
    let (value, min, max) = (value?, min?, max?);
    if max <= min {
        return Some(100.0);
    }
    Some(((value - min) / (max - min) * 100.0).clamp(0.0, 100.0))
}

fn scaled_bar(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> String {
    match scale(value, min, max) {
        Some(pct) => format!(
            r#"<div class="bar"><span style="width: {:.0}%"></span></div>"#,
            pct
        ),
        None => String::new(),
    }
}

async fn load_results(pool: &SqlitePool, term: &str) -> cf_common::Result<(Vec<Protein>, PropertyRanges)> {
    let proteins = db::search_proteins(pool, term, db::SEARCH_LIMIT).await?;
    let ranges = db::property_ranges(pool).await?;
    Ok((proteins, ranges))
}

fn result_row(protein: &Protein, ranges: &PropertyRanges) -> String {
    let rec = protein.recommendation().fields();

    format!(
        r#"<tr>
    <td><a href="/proteins/{id}">{name}</a><div class="muted">{accession}</div></td>
    <td>{gene}</td>
    <td>{organism}</td>
    <td>{pi}{pi_bar}</td>
    <td>{mw}{mw_bar}</td>
    <td>{primary}</td>
    <td>{polishing}</td>
</tr>"#,
        id = protein.id,
        name = escape(&protein.name),
        accession = text_or_dash(protein.uniprot_id.as_deref()),
        gene = text_or_dash(protein.gene_name.as_deref()),
        organism = text_or_dash(protein.organism.as_deref()),
        pi = number_or_dash(protein.pi, 2),
        pi_bar = scaled_bar(protein.pi, ranges.pi_min, ranges.pi_max),
        mw = number_or_dash(protein.mw_kda, 1),
        mw_bar = scaled_bar(protein.mw_kda, ranges.mw_min, ranges.mw_max),
        primary = column_link(rec.recommended_column.as_deref(), &rec.recommended_url),
        polishing = column_link(rec.polishing_column.as_deref(), &rec.polishing_url),
    )
}

/// GET /proteins?search=term
///
/// Up to 100 proteins whose name, gene or organism contains the term, with
/// their recommended columns.
pub async fn results_page(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Html<String> {
    let term = query.search.as_deref().unwrap_or("").trim().to_string();

    let (proteins, ranges, error_message) = match load_results(&state.db, &term).await {
        Ok((proteins, ranges)) => (proteins, ranges, None),
        Err(e) => {
            tracing::warn!(search = %term, "Search failed: {}", e);
            (Vec::new(), PropertyRanges::default(), Some(format!("Database error: {}", e)))
        }
    };

    let rows = if proteins.is_empty() {
        r#"<tr><td colspan="7" class="muted">No proteins found.</td></tr>"#.to_string()
    } else {
        proteins
            .iter()
            .map(|p| result_row(p, &ranges))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let content = format!(
        r#"{error}
<form action="/proteins" method="get">
    <input type="text" name="search" value="{term}" placeholder="Protein, gene or organism">
    <button type="submit">Search</button>
</form>
<p class="muted">{count} result(s). pI range {pi_min} - {pi_max}, MW range {mw_min} - {mw_max} kDa.</p>
<table>
    <tr><th>Protein</th><th>Gene</th><th>Organism</th><th>pI</th><th>MW (kDa)</th><th>Recommended column</th><th>Polishing</th></tr>
{rows}
</table>"#,
        error = error_banner(error_message.as_deref()),
        term = escape(&term),
        count = proteins.len(),
        pi_min = number_or_dash(ranges.pi_min, 2),
        pi_max = number_or_dash(ranges.pi_max, 2),
        mw_min = number_or_dash(ranges.mw_min, 1),
        mw_max = number_or_dash(ranges.mw_max, 1),
        rows = rows,
    );

    Html(layout("Proteins", &content))
}
