//! Database schema and queries (SQLite via sqlx)

pub mod catalog;
pub mod init;
pub mod proteins;

pub use catalog::*;
pub use init::*;
pub use proteins::*;
