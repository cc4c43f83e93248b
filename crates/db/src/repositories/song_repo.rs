//! Repository for the `songs` table.

use moviedb_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::song::{Song, UpsertSong};

/// Column list for the `songs` table.
const COLUMNS: &str = "id, movie_id, name, song_order, created_at, updated_at";

/// Provides upserts and lookups for songs.
pub struct SongRepo;

impl SongRepo {
    /// Insert a song, or update only its ordinal if `(movie_id, name)` exists.
    ///
    /// Returns the song id in both cases.
    pub async fn upsert(conn: &mut PgConnection, input: &UpsertSong) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO songs (movie_id, name, song_order) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (movie_id, name) DO UPDATE SET \
                 song_order = EXCLUDED.song_order, \
                 updated_at = NOW() \
             RETURNING id",
        )
        .bind(input.movie_id)
        .bind(&input.name)
        .bind(input.song_order)
        .fetch_one(conn)
        .await
    }

    /// List a movie's songs by ordinal.
    pub async fn list_for_movie(pool: &PgPool, movie_id: DbId) -> Result<Vec<Song>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM songs \
             WHERE movie_id = $1 \
             ORDER BY song_order, name"
        );
        sqlx::query_as::<_, Song>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }
}
