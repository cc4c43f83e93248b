//! Repository layer.
//!
//! Each repository is a zero-sized struct. Write methods accept
//! `&mut PgConnection` so they compose inside one transaction; read
//! methods accept `&PgPool`.

pub mod cast_member_repo;
pub mod catalog_query_repo;
pub mod commentary_repo;
pub mod movie_repo;
pub mod natural_key;
pub mod song_repo;

pub use cast_member_repo::CastMemberRepo;
pub use catalog_query_repo::CatalogQueryRepo;
pub use commentary_repo::CommentaryRepo;
pub use movie_repo::MovieRepo;
pub use natural_key::{get_or_create, NaturalKey, Resolved};
pub use song_repo::SongRepo;
