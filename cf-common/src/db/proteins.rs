//! Protein persistence and read queries

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::models::{MwDistribution, NewProtein, PiDistribution, PropertyRanges, Protein};
use crate::recommend::parse_measure;
use crate::Result;

/// Maximum rows returned by [`search_proteins`]
pub const SEARCH_LIMIT: i64 = 100;

const PROTEIN_COLUMNS: &str =
    "id, uniprot_id, name, gene_name, organism, length, mw_kda, pi, tag, description";

/// Insert a protein, or update the existing row with the same accession
pub async fn upsert_protein(pool: &SqlitePool, protein: &NewProtein) -> Result<()> {
    let mut conn = pool.acquire().await?;
    upsert_on(&mut *conn, protein).await
}

/// Upsert many proteins in one transaction. Returns the number written.
pub async fn upsert_proteins(pool: &SqlitePool, proteins: &[NewProtein]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut written = 0;

    for protein in proteins {
        upsert_on(&mut *tx, protein).await?;
        written += 1;
    }

    tx.commit().await?;
    Ok(written)
}

async fn upsert_on(conn: &mut sqlx::SqliteConnection, protein: &NewProtein) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO protein (
            uniprot_id, name, gene_name, organism, length, mw_kda, pi, tag, description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(uniprot_id) DO UPDATE SET
            name = excluded.name,
            gene_name = excluded.gene_name,
            organism = excluded.organism,
            length = excluded.length,
            mw_kda = excluded.mw_kda,
            pi = excluded.pi,
            tag = excluded.tag,
            description = excluded.description
        "#,
    )
    .bind(&protein.uniprot_id)
    .bind(&protein.name)
    .bind(&protein.gene_name)
    .bind(&protein.organism)
    .bind(protein.length)
    .bind(protein.mw_kda)
    .bind(protein.pi)
    .bind(&protein.tag)
    .bind(&protein.description)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn count_proteins(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM protein")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn pi_distribution(pool: &SqlitePool) -> Result<PiDistribution> {
    let (lt6, btw6_8, gt8): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(CASE WHEN pi IS NOT NULL AND pi < 6 THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN pi IS NOT NULL AND pi >= 6 AND pi <= 8 THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN pi IS NOT NULL AND pi > 8 THEN 1 ELSE 0 END), 0)
        FROM protein
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(PiDistribution { lt6, btw6_8, gt8 })
}

pub async fn mw_distribution(pool: &SqlitePool) -> Result<MwDistribution> {
    let (lt50, btw50_100, gt100): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COALESCE(SUM(CASE WHEN mw_kda IS NOT NULL AND mw_kda < 50 THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN mw_kda IS NOT NULL AND mw_kda >= 50 AND mw_kda <= 100 THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN mw_kda IS NOT NULL AND mw_kda > 100 THEN 1 ELSE 0 END), 0)
        FROM protein
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(MwDistribution {
        lt50,
        btw50_100,
        gt100,
    })
}

pub async fn property_ranges(pool: &SqlitePool) -> Result<PropertyRanges> {
    let row = sqlx::query(
        "SELECT MIN(pi) AS pi_min, MAX(pi) AS pi_max, MIN(mw_kda) AS mw_min, MAX(mw_kda) AS mw_max
         FROM protein",
    )
    .fetch_one(pool)
    .await?;

    Ok(PropertyRanges {
        pi_min: lenient_f64(&row, "pi_min"),
        pi_max: lenient_f64(&row, "pi_max"),
        mw_min: lenient_f64(&row, "mw_min"),
        mw_max: lenient_f64(&row, "mw_max"),
    })
}

/// Case-insensitive substring search over name, gene and organism,
/// ordered by name. A blank term matches every protein.
pub async fn search_proteins(pool: &SqlitePool, term: &str, limit: i64) -> Result<Vec<Protein>> {
    let term = term.trim();
    let pattern = if term.is_empty() {
        "%".to_string()
    } else {
        format!("%{}%", term)
    };

    let sql = format!(
        "SELECT {} FROM protein
         WHERE name LIKE ? OR gene_name LIKE ? OR organism LIKE ?
         ORDER BY name
         LIMIT ?",
        PROTEIN_COLUMNS
    );

    let rows = sqlx::query(&sql)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    rows.iter().map(protein_from_row).collect()
}

pub async fn get_protein(pool: &SqlitePool, id: i64) -> Result<Option<Protein>> {
    let sql = format!("SELECT {} FROM protein WHERE id = ? LIMIT 1", PROTEIN_COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    row.as_ref().map(protein_from_row).transpose()
}

pub async fn get_protein_by_accession(pool: &SqlitePool, accession: &str) -> Result<Option<Protein>> {
    let sql = format!(
        "SELECT {} FROM protein WHERE uniprot_id = ? LIMIT 1",
        PROTEIN_COLUMNS
    );
    let row = sqlx::query(&sql).bind(accession).fetch_optional(pool).await?;

    row.as_ref().map(protein_from_row).transpose()
}

/// Name (or gene, or accession) of a random protein, for search suggestions
pub async fn random_label(pool: &SqlitePool) -> Result<Option<String>> {
    let label: Option<Option<String>> = sqlx::query_scalar(
        "SELECT COALESCE(name, gene_name, uniprot_id) FROM protein ORDER BY RANDOM() LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(label.flatten().filter(|l| !l.is_empty()))
}

fn protein_from_row(row: &SqliteRow) -> Result<Protein> {
    Ok(Protein {
        id: row.try_get("id")?,
        uniprot_id: row.try_get("uniprot_id")?,
        name: row.try_get("name")?,
        gene_name: row.try_get("gene_name")?,
        organism: row.try_get("organism")?,
        length: row.try_get::<Option<i64>, _>("length").ok().flatten(),
        mw_kda: lenient_f64(row, "mw_kda"),
        pi: lenient_f64(row, "pi"),
        tag: row.try_get("tag")?,
        description: row.try_get("description")?,
    })
}

/// Numeric column that is absent when NULL, non-numeric or non-finite.
///
/// Values stored as text are parsed with [`parse_measure`].
fn lenient_f64(row: &SqliteRow, column: &str) -> Option<f64> {
    match row.try_get::<Option<f64>, _>(column) {
        Ok(value) => value.filter(|v| v.is_finite()),
        Err(_) => row
            .try_get::<Option<String>, _>(column)
            .ok()
            .flatten()
            .as_deref()
            .and_then(parse_measure),
    }
}
