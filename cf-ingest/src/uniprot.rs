//! UniProt REST client
//!
//! Queries the UniProtKB search endpoint in TSV format with the fields the
//! store needs.

use std::time::Duration;

use crate::error::{IngestError, Result};
use crate::record::{self, UniProtRecord};

pub const UNIPROT_SEARCH_URL: &str = "https://rest.uniprot.org/uniprotkb/search";

/// Fields requested from UniProt, in TSV column order
pub const TSV_FIELDS: &str = "accession,protein_name,gene_names,organism_name,length,mass,sequence";

const USER_AGENT: &str = concat!("column-finder/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// UniProt API client
pub struct UniProtClient {
    http_client: reqwest::Client,
    search_url: String,
}

impl UniProtClient {
    pub fn new() -> Result<Self> {
        Self::with_search_url(UNIPROT_SEARCH_URL)
    }

    /// Client against an alternative search endpoint (mirrors, tests)
    pub fn with_search_url(search_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| IngestError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            search_url: search_url.into(),
        })
    }

    /// Fetch up to `size` records matching `query`
    pub async fn fetch_proteins(&self, query: &str, size: u32) -> Result<Vec<UniProtRecord>> {
        tracing::info!(query = %query, size, "Querying UniProt");

        let size = size.to_string();
        let response = self
            .http_client
            .get(&self.search_url)
            .query(&[
                ("query", query),
                ("format", "tsv"),
                ("fields", TSV_FIELDS),
                ("size", size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| IngestError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(IngestError::Api(status.as_u16(), error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| IngestError::Network(e.to_string()))?;

        let records = record::parse_tsv(&body)?;
        tracing::info!("Fetched {} proteins from UniProt", records.len());

        Ok(records)
    }
}
