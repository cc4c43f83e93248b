//! Read-side catalog queries.
//!
//! Pure reads over the tables the loader writes. Where the append-only
//! commentary table holds several matching rows, the most recent wins.

use moviedb_core::commentary::{CommentaryKind, DEFAULT_LANGUAGE, MOVIE_SUBJECT};
use moviedb_core::search::contains_pattern;
use sqlx::PgPool;

use crate::models::catalog::{CommentarySearchHit, CompleteMovie, MovieSummary, MovieWithCast};
use crate::models::song::Song;
use crate::repositories::{CastMemberRepo, MovieRepo, SongRepo};

/// Provides the catalog's reporting queries.
pub struct CatalogQueryRepo;

impl CatalogQueryRepo {
    /// List every movie with its cast aggregated into one string.
    pub async fn list_movies_with_cast(pool: &PgPool) -> Result<Vec<MovieWithCast>, sqlx::Error> {
        sqlx::query_as::<_, MovieWithCast>(
            "SELECT m.id, m.name, m.release_date, m.director, \
                    COALESCE(STRING_AGG(cm.name, ', ' ORDER BY cm.name), '') AS cast_names \
             FROM movies m \
             LEFT JOIN movie_cast mc ON mc.movie_id = m.id \
             LEFT JOIN cast_members cm ON cm.id = mc.cast_member_id \
             GROUP BY m.id \
             ORDER BY m.name",
        )
        .fetch_all(pool)
        .await
    }

    /// List the songs of the named movie by ordinal.
    pub async fn songs_for_movie(
        pool: &PgPool,
        movie_name: &str,
    ) -> Result<Vec<Song>, sqlx::Error> {
        sqlx::query_as::<_, Song>(
            "SELECT s.id, s.movie_id, s.name, s.song_order, s.created_at, s.updated_at \
             FROM songs s \
             JOIN movies m ON m.id = s.movie_id \
             WHERE m.name = $1 \
             ORDER BY s.song_order, s.name",
        )
        .bind(movie_name)
        .fetch_all(pool)
        .await
    }

    /// Fetch the movie-level commentary of a movie in one kind and language.
    pub async fn movie_commentary(
        pool: &PgPool,
        movie_name: &str,
        kind: &str,
        language: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT c.commentary_text \
             FROM commentaries c \
             JOIN movies m ON m.id = c.movie_id \
             WHERE m.name = $1 \
               AND c.song_id IS NULL \
               AND c.commentary_type = $2 \
               AND c.language = $3 \
             ORDER BY c.id DESC \
             LIMIT 1",
        )
        .bind(movie_name)
        .bind(kind)
        .bind(language)
        .fetch_optional(pool)
        .await
    }

    /// Fetch the commentary of a song in one kind and language.
    pub async fn song_commentary(
        pool: &PgPool,
        song_name: &str,
        kind: &str,
        language: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT c.commentary_text \
             FROM commentaries c \
             JOIN songs s ON s.id = c.song_id \
             WHERE s.name = $1 \
               AND c.commentary_type = $2 \
               AND c.language = $3 \
             ORDER BY c.id DESC \
             LIMIT 1",
        )
        .bind(song_name)
        .bind(kind)
        .bind(language)
        .fetch_optional(pool)
        .await
    }

    /// Case-insensitive substring search across all commentary text.
    ///
    /// A blank keyword returns no results.
    pub async fn search_commentaries(
        pool: &PgPool,
        keyword: &str,
    ) -> Result<Vec<CommentarySearchHit>, sqlx::Error> {
        let Some(pattern) = contains_pattern(keyword) else {
            return Ok(Vec::new());
        };

        let query = format!(
            "SELECT m.name AS movie_name, \
                    CASE WHEN c.song_id IS NULL THEN '{MOVIE_SUBJECT}' ELSE s.name END AS subject, \
                    c.commentary_type, c.language, c.commentary_text \
             FROM commentaries c \
             JOIN movies m ON m.id = c.movie_id \
             LEFT JOIN songs s ON s.id = c.song_id \
             WHERE c.commentary_text ILIKE $1 \
             ORDER BY m.name, c.id"
        );
        sqlx::query_as::<_, CommentarySearchHit>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// List movies whose cast includes a member matching `name_fragment`,
    /// newest release first.
    pub async fn movies_by_cast_member(
        pool: &PgPool,
        name_fragment: &str,
    ) -> Result<Vec<MovieSummary>, sqlx::Error> {
        let Some(pattern) = contains_pattern(name_fragment) else {
            return Ok(Vec::new());
        };

        sqlx::query_as::<_, MovieSummary>(
            "SELECT DISTINCT m.name, m.release_date, m.director \
             FROM movies m \
             JOIN movie_cast mc ON mc.movie_id = m.id \
             JOIN cast_members cm ON cm.id = mc.cast_member_id \
             WHERE cm.name ILIKE $1 \
             ORDER BY m.release_date DESC, m.name",
        )
        .bind(pattern)
        .fetch_all(pool)
        .await
    }

    /// Gather a movie, its cast, its songs and its default commentary.
    ///
    /// Returns `None` if no movie has this name.
    pub async fn complete_movie(
        pool: &PgPool,
        movie_name: &str,
    ) -> Result<Option<CompleteMovie>, sqlx::Error> {
        let Some(movie) = MovieRepo::find_by_name(pool, movie_name).await? else {
            return Ok(None);
        };

        let cast = CastMemberRepo::list_for_movie(pool, movie.id)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();
        let songs = SongRepo::list_for_movie(pool, movie.id).await?;
        let commentary = Self::movie_commentary(
            pool,
            movie_name,
            CommentaryKind::default().as_str(),
            DEFAULT_LANGUAGE,
        )
        .await?;

        Ok(Some(CompleteMovie {
            movie,
            cast,
            songs,
            commentary,
        }))
    }
}
