//! Ingest workflow
//!
//! Seeds the column catalog, fetches records and upserts them by accession.
//! Schema creation and duplicate cleanup happen in `init_database`.

use cf_common::db;
use cf_common::models::NewProtein;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::Result;
use crate::record::UniProtRecord;
use crate::uniprot::UniProtClient;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Records returned by UniProt
    pub fetched: usize,
    /// Records dropped for missing accession or name
    pub skipped: usize,
    /// Rows inserted or updated
    pub stored: u64,
    /// Proteins with an estimated pI
    pub with_pi: usize,
    /// Proteins in the store after the run
    pub total_in_store: i64,
    /// Whether the column catalog was seeded by this run
    pub seeded_columns: bool,
}

/// Full run: seed catalog, fetch from UniProt, store
pub async fn run_ingest(
    pool: &SqlitePool,
    client: &UniProtClient,
    query: &str,
    max_results: u32,
) -> Result<IngestSummary> {
    let seeded_columns = db::seed_default_columns(pool).await?;

    let records = client.fetch_proteins(query, max_results).await?;

    let mut summary = store_records(pool, &records).await?;
    summary.seeded_columns = seeded_columns;
    Ok(summary)
}

/// Derive and upsert already fetched records
pub async fn store_records(pool: &SqlitePool, records: &[UniProtRecord]) -> Result<IngestSummary> {
    let proteins: Vec<NewProtein> = records
        .iter()
        .filter_map(UniProtRecord::to_new_protein)
        .collect();

    let skipped = records.len() - proteins.len();
    let with_pi = proteins.iter().filter(|p| p.pi.is_some()).count();

    info!("Inserting {} proteins ({} skipped)", proteins.len(), skipped);
    let stored = db::upsert_proteins(pool, &proteins).await?;

    let removed = db::dedupe_proteins(pool).await?;
    if removed > 0 {
        info!("Removed {} duplicate proteins", removed);
    }

    let total_in_store = db::count_proteins(pool).await?;

    Ok(IngestSummary {
        fetched: records.len(),
        skipped,
        stored,
        with_pi,
        total_in_store,
        seeded_columns: false,
    })
}
