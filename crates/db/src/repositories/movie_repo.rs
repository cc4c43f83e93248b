//! Repository for the `movies` table.

use moviedb_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::movie::{CreateMovie, Movie};
use crate::repositories::natural_key::{get_or_create, IdQuery, NaturalKey, Resolved};

/// Column list for the `movies` table.
const COLUMNS: &str = "id, name, release_date, director, producer, music_director, \
    lyricist, created_at, updated_at";

/// Provides get-or-create and lookups for movies.
pub struct MovieRepo;

impl NaturalKey for CreateMovie {
    const ENTITY: &'static str = "movie";

    fn insert_if_absent(&self) -> IdQuery<'_> {
        sqlx::query_scalar(
            "INSERT INTO movies \
                (name, release_date, director, producer, music_director, lyricist) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (name) DO NOTHING \
             RETURNING id",
        )
        .bind(self.name.as_str())
        .bind(self.release_date)
        .bind(self.director.as_str())
        .bind(self.producer.as_str())
        .bind(self.music_director.as_str())
        .bind(self.lyricist.as_str())
    }

    fn find_id(&self) -> IdQuery<'_> {
        sqlx::query_scalar("SELECT id FROM movies WHERE name = $1").bind(self.name.as_str())
    }
}

impl MovieRepo {
    /// Return the id of the movie named `input.name`, inserting it first if
    /// absent. An existing movie is never modified.
    pub async fn resolve(
        conn: &mut PgConnection,
        input: &CreateMovie,
    ) -> Result<Resolved, sqlx::Error> {
        get_or_create(conn, input).await
    }

    /// Find a movie by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movie by its exact name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE name = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Count movies with the given name (0 or 1 under the unique constraint).
    pub async fn count_by_name(pool: &PgPool, name: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies WHERE name = $1")
            .bind(name)
            .fetch_one(pool)
            .await
    }
}
