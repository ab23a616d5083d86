//! Load-time error taxonomy.
//!
//! Queries never fail; everything that can go wrong happens while fetching
//! and parsing a feed. A failed load leaves the engine empty so a retry
//! starts from a clean slate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("invalid feed URL {0:?}")]
    InvalidUrl(String),

    #[error("failed to fetch feed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to read feed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open feed archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("feed is missing required table {0:?}")]
    MissingTable(&'static str),
}
