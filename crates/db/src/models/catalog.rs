//! Row shapes returned by read-side catalog queries.

use moviedb_core::types::{DbId, ReleaseDate};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::movie::Movie;
use crate::models::song::Song;

/// A movie with its cast names joined into one comma-separated string.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieWithCast {
    pub id: DbId,
    pub name: String,
    pub release_date: ReleaseDate,
    pub director: String,
    /// Cast names sorted alphabetically, `", "`-separated. Empty if no cast.
    pub cast_names: String,
}

/// Headline fields of a movie.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieSummary {
    pub name: String,
    pub release_date: ReleaseDate,
    pub director: String,
}

/// One hit from a keyword search across commentary text.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentarySearchHit {
    pub movie_name: String,
    /// `"Movie"` for movie-level commentary, otherwise the song name.
    pub subject: String,
    pub commentary_type: String,
    pub language: String,
    pub commentary_text: String,
}

/// Everything known about one movie.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteMovie {
    pub movie: Movie,
    pub cast: Vec<String>,
    pub songs: Vec<Song>,
    /// Movie-level commentary in the default kind and language.
    pub commentary: Option<String>,
}
