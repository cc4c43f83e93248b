//! Repository for the `cast_members` and `movie_cast` tables.

use moviedb_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::cast_member::{CastMember, CreateCastMember};
use crate::repositories::natural_key::{get_or_create, IdQuery, NaturalKey, Resolved};

/// Column list for the `cast_members` table.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides get-or-create for cast members and their movie associations.
pub struct CastMemberRepo;

impl NaturalKey for CreateCastMember {
    const ENTITY: &'static str = "cast_member";

    fn insert_if_absent(&self) -> IdQuery<'_> {
        sqlx::query_scalar(
            "INSERT INTO cast_members (name) VALUES ($1) \
             ON CONFLICT (name) DO NOTHING \
             RETURNING id",
        )
        .bind(self.name.as_str())
    }

    fn find_id(&self) -> IdQuery<'_> {
        sqlx::query_scalar("SELECT id FROM cast_members WHERE name = $1")
            .bind(self.name.as_str())
    }
}

impl CastMemberRepo {
    /// Return the id of the cast member with this name, inserting it if absent.
    pub async fn resolve(
        conn: &mut PgConnection,
        input: &CreateCastMember,
    ) -> Result<Resolved, sqlx::Error> {
        get_or_create(conn, input).await
    }

    /// Associate a cast member with a movie (idempotent).
    ///
    /// Returns `true` if the association was newly created.
    pub async fn link_to_movie(
        conn: &mut PgConnection,
        movie_id: DbId,
        cast_member_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO movie_cast (movie_id, cast_member_id) \
             VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(movie_id)
        .bind(cast_member_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a cast member by exact name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<CastMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cast_members WHERE name = $1");
        sqlx::query_as::<_, CastMember>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List the cast of a movie, ordered by name.
    pub async fn list_for_movie(
        pool: &PgPool,
        movie_id: DbId,
    ) -> Result<Vec<CastMember>, sqlx::Error> {
        sqlx::query_as::<_, CastMember>(
            "SELECT cm.id, cm.name, cm.created_at, cm.updated_at \
             FROM cast_members cm \
             JOIN movie_cast mc ON mc.cast_member_id = cm.id \
             WHERE mc.movie_id = $1 \
             ORDER BY cm.name",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// Count movies a cast member is associated with.
    pub async fn count_movies(pool: &PgPool, cast_member_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movie_cast WHERE cast_member_id = $1")
            .bind(cast_member_id)
            .fetch_one(pool)
            .await
    }
}
