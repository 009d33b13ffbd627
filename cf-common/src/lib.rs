//! # Column Finder Common Library
//!
//! Shared code for the ingest tool and the web service:
//! - Purification column recommendation heuristic and vendor links
//! - Isoelectric point estimation
//! - SQLite schema and queries
//! - Configuration loading

pub mod columns;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pi;
pub mod recommend;

pub use columns::ColumnReference;
pub use error::{Error, Result};
pub use recommend::{AffinityTag, Recommendation, RecommendationInput};
