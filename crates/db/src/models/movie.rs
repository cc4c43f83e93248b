//! Movie entity model and DTOs.

use moviedb_core::document::MovieMetadata;
use moviedb_core::types::{DbId, ReleaseDate, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `movies` table. Natural key: `name`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub name: String,
    pub release_date: ReleaseDate,
    pub director: String,
    pub producer: String,
    pub music_director: String,
    pub lyricist: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a movie. Ignored if a movie with the same name exists.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub name: String,
    pub release_date: ReleaseDate,
    pub director: String,
    pub producer: String,
    pub music_director: String,
    pub lyricist: String,
}

impl From<&MovieMetadata> for CreateMovie {
    fn from(meta: &MovieMetadata) -> Self {
        Self {
            name: meta.movie_name.clone(),
            release_date: meta.release_date,
            director: meta.director.clone(),
            producer: meta.producer.clone(),
            music_director: meta.music_director.clone(),
            lyricist: meta.lyricist.clone(),
        }
    }
}
