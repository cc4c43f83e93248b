//! Get-or-create by natural key.
//!
//! Entities that are reused rather than updated on re-ingestion (movies,
//! cast members) implement [`NaturalKey`]. [`get_or_create`] runs the
//! conditional insert and, when a unique constraint suppresses it, looks the
//! existing row up by the same key. `ON CONFLICT DO NOTHING` returns no row
//! on conflict, so the lookup is the only way to learn the existing id.

use moviedb_core::types::DbId;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryScalar;
use sqlx::{PgConnection, Postgres};

/// A query yielding a single `id` column.
pub type IdQuery<'q> = QueryScalar<'q, Postgres, DbId, PgArguments>;

/// An insert DTO whose table enforces uniqueness on a business key.
pub trait NaturalKey {
    /// Entity name used in log output.
    const ENTITY: &'static str;

    /// `INSERT ... ON CONFLICT DO NOTHING RETURNING id`.
    fn insert_if_absent(&self) -> IdQuery<'_>;

    /// `SELECT id ... WHERE <natural key> = ...`.
    fn find_id(&self) -> IdQuery<'_>;
}

/// Outcome of [`get_or_create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// A new row was inserted.
    Created(DbId),
    /// A row with the same natural key already existed.
    Existing(DbId),
}

impl Resolved {
    pub fn id(self) -> DbId {
        match self {
            Self::Created(id) | Self::Existing(id) => id,
        }
    }

    pub fn was_created(self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Insert `input` unless its natural key exists, returning the row id either way.
///
/// One write attempt plus at most one read. Never fails on a duplicate key.
pub async fn get_or_create<K: NaturalKey>(
    conn: &mut PgConnection,
    input: &K,
) -> Result<Resolved, sqlx::Error> {
    if let Some(id) = input.insert_if_absent().fetch_optional(&mut *conn).await? {
        tracing::debug!(entity = K::ENTITY, id, "Inserted new row");
        return Ok(Resolved::Created(id));
    }

    let id = input.find_id().fetch_one(&mut *conn).await?;
    tracing::debug!(entity = K::ENTITY, id, "Reused existing row");
    Ok(Resolved::Existing(id))
}
