//! Error types for cf-ingest

use thiserror::Error;

/// Errors raised while fetching and storing UniProt records
#[derive(Debug, Error)]
pub enum IngestError {
    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// UniProt answered with a non-success status
    #[error("UniProt API error {0}: {1}")]
    Api(u16, String),

    /// Response body is not valid TSV
    #[error("Parse error: {0}")]
    Parse(String),

    /// Database error from the shared store layer
    #[error(transparent)]
    Store(#[from] cf_common::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
