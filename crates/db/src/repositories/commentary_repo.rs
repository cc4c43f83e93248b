//! Repository for the `commentaries` table.
//!
//! Commentary is append-only: there is no uniqueness constraint, so writing
//! the same document twice stores every text twice.

use moviedb_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::commentary::{Commentary, CreateCommentary};

/// Column list for the `commentaries` table.
const COLUMNS: &str = "id, movie_id, song_id, commentary_type, language, commentary_text, \
    created_at, updated_at";

/// Provides appends and lookups for commentary rows.
pub struct CommentaryRepo;

impl CommentaryRepo {
    /// Append one commentary row, returning its id.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateCommentary<'_>,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO commentaries \
                (movie_id, song_id, commentary_type, language, commentary_text) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(input.movie_id)
        .bind(input.song_id)
        .bind(input.kind)
        .bind(input.language)
        .bind(input.text)
        .fetch_one(conn)
        .await
    }

    /// List every commentary row of a movie, movie-level first, in insertion order.
    pub async fn list_for_movie(
        pool: &PgPool,
        movie_id: DbId,
    ) -> Result<Vec<Commentary>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM commentaries \
             WHERE movie_id = $1 \
             ORDER BY song_id NULLS FIRST, id"
        );
        sqlx::query_as::<_, Commentary>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }
}
