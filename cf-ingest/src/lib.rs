//! cf-ingest library interface
//!
//! Fetches reviewed protein records from UniProt, derives molecular weight
//! and isoelectric point, and writes them to the Column Finder database.

pub mod error;
pub mod pipeline;
pub mod record;
pub mod uniprot;

pub use crate::error::{IngestError, Result};
pub use crate::pipeline::{run_ingest, store_records, IngestSummary};
pub use crate::record::UniProtRecord;
pub use crate::uniprot::UniProtClient;
