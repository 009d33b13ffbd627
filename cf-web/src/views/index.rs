//! Dashboard page

use axum::{extract::State, response::Html};
use cf_common::db;
use cf_common::models::{MwDistribution, PiDistribution};
use sqlx::SqlitePool;

use super::{error_banner, escape, layout};
use crate::AppState;

/// Counts shown on the dashboard
#[derive(Debug, Default)]
pub struct Dashboard {
    pub protein_count: Option<i64>,
    pub pi: PiDistribution,
    pub mw: MwDistribution,
}

async fn load_dashboard(pool: &SqlitePool) -> cf_common::Result<Dashboard> {
    Ok(Dashboard {
        protein_count: Some(db::count_proteins(pool).await?),
        pi: db::pi_distribution(pool).await?,
        mw: db::mw_distribution(pool).await?,
    })
}

/// Share of `count` in `total` as a whole percentage, 0 when empty
pub fn percent(count: i64, total: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        (count as f64 / total as f64 * 100.0).round() as i64
    }
}

fn distribution_rows(rows: &[(&str, i64)], total: i64) -> String {
    rows.iter()
        .map(|(label, count)| {
            let pct = percent(*count, total);
            format!(
                r#"<tr><td>{}</td><td>{}</td><td><div class="bar"><span style="width: {}%"></span></div></td><td class="muted">{}%</td></tr>"#,
                escape(label),
                count,
                pct,
                pct
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// GET /
///
/// Protein count plus pI and MW distributions. Database errors are shown
/// inline instead of failing the page.
pub async fn index_page(State(state): State<AppState>) -> Html<String> {
    let (dashboard, error_message) = match load_dashboard(&state.db).await {
        Ok(dashboard) => (dashboard, None),
        Err(e) => {
            tracing::warn!("Dashboard query failed: {}", e);
            (Dashboard::default(), Some(format!("Database error: {}", e)))
        }
    };

    let count = dashboard
        .protein_count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());

    let pi_rows = distribution_rows(
        &[
            ("pI < 6", dashboard.pi.lt6),
            ("6 \u{2264} pI \u{2264} 8", dashboard.pi.btw6_8),
            ("pI > 8", dashboard.pi.gt8),
        ],
        dashboard.pi.total(),
    );
    let mw_rows = distribution_rows(
        &[
            ("MW < 50 kDa", dashboard.mw.lt50),
            ("50 \u{2264} MW \u{2264} 100 kDa", dashboard.mw.btw50_100),
            ("MW > 100 kDa", dashboard.mw.gt100),
        ],
        dashboard.mw.total(),
    );

    let content = format!(
        r#"{error}
<h1>Purification column finder</h1>
<p>{count} proteins in the database.</p>
<form action="/proteins" method="get">
    <input type="text" name="search" id="search" placeholder="Protein, gene or organism">
    <button type="submit">Search</button>
    <button type="button" onclick="fetch('/api/example').then(r => r.json()).then(d => {{ document.getElementById('search').value = d.search; }})">Example</button>
</form>
<div class="stats">
    <section>
        <h2>Isoelectric point</h2>
        <table>{pi_rows}</table>
    </section>
    <section>
        <h2>Molecular weight</h2>
        <table>{mw_rows}</table>
    </section>
</div>"#,
        error = error_banner(error_message.as_deref()),
        count = count,
        pi_rows = pi_rows,
        mw_rows = mw_rows,
    );

    Html(layout("Overview", &content))
}
