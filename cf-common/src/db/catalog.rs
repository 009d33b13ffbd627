//! Chromatography column catalog

use sqlx::SqlitePool;
use tracing::info;

use crate::models::ChromatographyColumn;
use crate::Result;

/// Catalog entry used for seeding
#[derive(Debug, Clone, Copy)]
pub struct ColumnSeed {
    pub name: &'static str,
    pub kind: &'static str,
    pub resin: &'static str,
    pub ph_min: f64,
    pub ph_max: f64,
    pub description: &'static str,
}

/// Standard columns inserted into an empty catalog
pub const DEFAULT_COLUMNS: [ColumnSeed; 7] = [
    ColumnSeed {
        name: "HisTrap FF",
        kind: "IMAC",
        resin: "Ni-NTA",
        ph_min: 7.0,
        ph_max: 8.0,
        description: "Affinity purification of His-tagged proteins",
    },
    ColumnSeed {
        name: "GSTrap 4B",
        kind: "Affinity",
        resin: "Glutathione Sepharose 4B",
        ph_min: 7.0,
        ph_max: 8.0,
        description: "Affinity purification of GST-tagged proteins",
    },
    ColumnSeed {
        name: "Strep-Tactin Sepharose",
        kind: "Affinity",
        resin: "Strep-Tactin",
        ph_min: 7.0,
        ph_max: 8.5,
        description: "Affinity purification of Strep-tagged proteins",
    },
    ColumnSeed {
        name: "HiTrap Q HP",
        kind: "IEX-Anion",
        resin: "Q-Sepharose",
        ph_min: 6.0,
        ph_max: 9.0,
        description: "Anion exchange chromatography for proteins with pI < buffer pH",
    },
    ColumnSeed {
        name: "HiTrap SP HP",
        kind: "IEX-Cation",
        resin: "SP-Sepharose",
        ph_min: 4.0,
        ph_max: 7.5,
        description: "Cation exchange chromatography for proteins with pI > buffer pH",
    },
    ColumnSeed {
        name: "Superdex 75 Increase 10/300 GL",
        kind: "SEC",
        resin: "Cross-linked agarose/dextran",
        ph_min: 3.0,
        ph_max: 10.0,
        description: "Size exclusion chromatography for 3-70 kDa proteins",
    },
    ColumnSeed {
        name: "Superdex 200 Increase 10/300 GL",
        kind: "SEC",
        resin: "Cross-linked agarose/dextran",
        ph_min: 3.0,
        ph_max: 10.0,
        description: "Size exclusion chromatography for ~10-600 kDa proteins",
    },
];

/// Insert [`DEFAULT_COLUMNS`] when the catalog is empty.
///
/// Returns `true` if rows were inserted.
pub async fn seed_default_columns(pool: &SqlitePool) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chromatography_column")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        info!("Chromatography columns already present ({}), skipping seed", count);
        return Ok(false);
    }

    let mut tx = pool.begin().await?;
    for column in DEFAULT_COLUMNS.iter() {
        sqlx::query(
            r#"
            INSERT INTO chromatography_column (name, type, resin, ph_min, ph_max, description)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(column.name)
        .bind(column.kind)
        .bind(column.resin)
        .bind(column.ph_min)
        .bind(column.ph_max)
        .bind(column.description)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    info!("Inserted {} default chromatography columns", DEFAULT_COLUMNS.len());
    Ok(true)
}

pub async fn list_columns(pool: &SqlitePool) -> Result<Vec<ChromatographyColumn>> {
    let rows: Vec<(i64, String, Option<String>, Option<String>, Option<f64>, Option<f64>, Option<String>)> =
        sqlx::query_as(
            "SELECT id, name, type, resin, ph_min, ph_max, description
             FROM chromatography_column
             ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, kind, resin, ph_min, ph_max, description)| ChromatographyColumn {
            id,
            name,
            kind,
            resin,
            ph_min,
            ph_max,
            description,
        })
        .collect())
}
