//! Song entity model and DTOs.

use moviedb_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `songs` table. Natural key: `(movie_id, name)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Song {
    pub id: DbId,
    pub movie_id: DbId,
    pub name: String,
    /// 1-based position within the movie.
    pub song_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a song or re-ordering an existing one.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertSong {
    pub movie_id: DbId,
    pub name: String,
    pub song_order: i32,
}
