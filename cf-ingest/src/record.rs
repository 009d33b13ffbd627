//! UniProt TSV records and derived protein properties

use cf_common::models::{NewProtein, NO_TAG};
use cf_common::pi;
use serde::Deserialize;
use tracing::warn;

use crate::error::{IngestError, Result};

/// One row of the UniProt TSV export, keyed by the header names UniProt
/// uses for the requested fields. Numeric columns are kept as text and
/// parsed leniently during conversion.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UniProtRecord {
    #[serde(rename = "Entry")]
    pub accession: Option<String>,
    #[serde(rename = "Protein names")]
    pub protein_name: Option<String>,
    #[serde(rename = "Gene Names")]
    pub gene_names: Option<String>,
    #[serde(rename = "Organism")]
    pub organism: Option<String>,
    #[serde(rename = "Length")]
    pub length: Option<String>,
    #[serde(rename = "Mass")]
    pub mass: Option<String>,
    #[serde(rename = "Sequence")]
    pub sequence: Option<String>,
}

impl UniProtRecord {
    /// Derive the row to store.
    ///
    /// Returns `None` (with a warning) when accession or name is missing.
    pub fn to_new_protein(&self) -> Option<NewProtein> {
        let accession = match non_blank(&self.accession) {
            Some(accession) => accession,
            None => {
                warn!("Skipping record without accession");
                return None;
            }
        };
        let name = match non_blank(&self.protein_name) {
            Some(name) => name,
            None => {
                warn!(accession = %accession, "Skipping record without protein name");
                return None;
            }
        };

        Some(NewProtein {
            uniprot_id: accession,
            name,
            gene_name: non_blank(&self.gene_names),
            organism: non_blank(&self.organism),
            length: self.length.as_deref().and_then(parse_length),
            mw_kda: self.mass.as_deref().and_then(mass_to_kda),
            pi: self.sequence.as_deref().and_then(pi::isoelectric_point),
            tag: NO_TAG.to_string(),
            description: None,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Sequence length; invalid values are dropped
pub fn parse_length(raw: &str) -> Option<i64> {
    raw.trim().replace(',', "").parse().ok()
}

/// Convert a mass in Da to kDa; invalid values are dropped
pub fn mass_to_kda(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|da| da / 1000.0)
}

/// Parse a UniProt TSV body. The first line is the header; blank input
/// yields no records and short rows leave trailing fields empty.
pub fn parse_tsv(text: &str) -> Result<Vec<UniProtRecord>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.trim().as_bytes());

    reader
        .deserialize()
        .map(|row| row.map_err(|e| IngestError::Parse(e.to_string())))
        .collect()
}
