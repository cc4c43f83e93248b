//! Commentary kinds and targets.
//!
//! A commentary is free text written about a whole movie or about one of
//! its songs, in a given language and at a given length category.

use serde::{Deserialize, Serialize};

/// Subject label used by read-side queries for movie-level commentary.
pub const MOVIE_SUBJECT: &str = "Movie";

/// Language assumed when a caller does not name one.
pub const DEFAULT_LANGUAGE: &str = "Hindi";

// ---------------------------------------------------------------------------
// Commentary kind
// ---------------------------------------------------------------------------

/// Well-known length categories. Documents may carry any tag; these are
/// the defaults used when reading commentary back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentaryKind {
    #[default]
    Long,
    Short,
}

impl CommentaryKind {
    /// Return the kind as stored in the `commentary_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

impl std::fmt::Display for CommentaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Commentary target
// ---------------------------------------------------------------------------

/// What a commentary entry is written about.
///
/// Resolved once when the document is parsed so the writer never has to
/// re-inspect raw keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommentaryTarget {
    /// The movie as a whole; stored with a NULL song reference.
    Movie,
    /// One song of the movie, by name.
    Song(String),
}

impl CommentaryTarget {
    /// Song name for song-level targets.
    pub fn song_name(&self) -> Option<&str> {
        match self {
            Self::Movie => None,
            Self::Song(name) => Some(name),
        }
    }
}

/// Resolve one commentary key of a language block against the song list.
///
/// The first key of a block is the movie-level commentary whatever it says,
/// so it always yields [`CommentaryTarget::Movie`]. Any key naming a song
/// yields [`CommentaryTarget::Song`]; a title song can therefore produce
/// both. An empty result means the key matches nothing.
pub fn resolve_targets(key: &str, is_first: bool, songs: &[String]) -> Vec<CommentaryTarget> {
    let key = key.trim();
    let mut targets = Vec::with_capacity(1);

    if is_first {
        targets.push(CommentaryTarget::Movie);
    }
    if let Some(song) = songs.iter().find(|s| s.as_str() == key) {
        targets.push(CommentaryTarget::Song(song.clone()));
    }

    targets
}
