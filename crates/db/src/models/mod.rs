//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//!
//! `catalog` holds the row shapes returned by read-side queries.

pub mod cast_member;
pub mod catalog;
pub mod commentary;
pub mod movie;
pub mod song;
