//! Error type shared by the Column Finder crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by the store and configuration layers
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite query or connection failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem failure while creating the data directory or reading config
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML config
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing database file or record
    #[error("Not found: {0}")]
    NotFound(String),
}
