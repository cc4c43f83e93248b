//! Commentary entity model and DTOs.

use moviedb_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `commentaries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Commentary {
    pub id: DbId,
    pub movie_id: DbId,
    /// `None` for movie-level commentary.
    pub song_id: Option<DbId>,
    pub commentary_type: String,
    pub language: String,
    pub commentary_text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for appending a commentary row.
#[derive(Debug, Clone)]
pub struct CreateCommentary<'a> {
    pub movie_id: DbId,
    pub song_id: Option<DbId>,
    /// Length tag, e.g. `long` or `short`.
    pub kind: &'a str,
    pub language: &'a str,
    pub text: &'a str,
}
