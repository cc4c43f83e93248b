use std::path::PathBuf;

use moviedb_core::error::CoreError;

/// Failure while ingesting one document.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is malformed or fails validation.
    #[error(transparent)]
    Document(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IngestError {
    /// Whether the store is unreachable. No further document can succeed
    /// after such an error, so the batch stops.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Database(err) => moviedb_db::is_connectivity_error(err),
            _ => false,
        }
    }
}
