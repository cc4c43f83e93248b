//! Cast member entity model and DTOs.

use moviedb_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `cast_members` table. Natural key: `name`, shared by
/// every movie the person appears in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CastMember {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a cast member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCastMember {
    pub name: String,
}
