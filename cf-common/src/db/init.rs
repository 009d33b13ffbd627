//! Database initialization
//!
//! Creates the database file and schema on first use. All statements are
//! idempotent, so both the ingest tool and the web service call
//! [`init_database`] at startup.

use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Connection, Executor, Sqlite, SqliteConnection, SqlitePool};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

const MAX_CONNECTIONS: u32 = 10;

/// Open (creating if needed) the database and ensure the schema exists.
///
/// The schema is built on a dedicated connection that is closed before the
/// pool opens. SQLite prepares `ON CONFLICT` upserts against the schema a
/// connection last loaded, so every pooled connection must start after the
/// unique accession index exists.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // WAL lets web readers continue while an ingest run writes
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let mut conn = SqliteConnection::connect_with(&options).await?;
    create_schema(&mut conn).await?;
    conn.close().await?;

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    Ok(pool)
}

/// Open an existing database without write access
///
/// Fails with [`Error::NotFound`] when the file does not exist. The schema is
/// not touched, so the file must have been created by an ingest run.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::NotFound(format!(
            "Database not found: {} (run cf-ingest first)",
            db_path.display()
        )));
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;

    info!("Opened database read-only: {}", db_path.display());
    Ok(pool)
}

/// Create tables and the accession index
pub async fn create_schema(conn: &mut SqliteConnection) -> Result<()> {
    create_protein_table(conn).await?;
    create_chromatography_column_table(conn).await?;

    // Older files may predate the unique index; clean them up first
    let removed = dedupe_proteins(&mut *conn).await?;
    if removed > 0 {
        warn!("Removed {} duplicate proteins", removed);
    }

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS uq_protein_uniprot ON protein(uniprot_id)",
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_protein_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS protein (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            uniprot_id TEXT,
            name TEXT NOT NULL,
            gene_name TEXT,
            organism TEXT,
            length INTEGER,
            mw_kda REAL,
            pi REAL,
            tag TEXT,
            description TEXT
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn create_chromatography_column_table(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS chromatography_column (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            type TEXT,
            resin TEXT,
            ph_min REAL,
            ph_max REAL,
            description TEXT
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Delete rows sharing an accession, keeping the one with the lowest id.
///
/// Returns the number of deleted rows.
pub async fn dedupe_proteins<'e, E>(executor: E) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM protein
        WHERE uniprot_id IS NOT NULL
          AND id NOT IN (
              SELECT MIN(id) FROM protein
              WHERE uniprot_id IS NOT NULL
              GROUP BY uniprot_id
          )
        "#,
    )
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}
