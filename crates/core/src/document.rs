//! Movie documents: the YAML input format and its validated in-memory form.
//!
//! Parsing happens in two passes. `serde_yaml` turns the text into the raw
//! shape of the file, then [`MovieDocument::from_raw`] trims and checks every
//! field, parses the release date, and resolves each commentary key into a
//! [`CommentaryTarget`].

use std::collections::HashSet;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Deserialize;
use validator::Validate;

use crate::commentary::{resolve_targets, CommentaryTarget};
use crate::error::CoreError;
use crate::types::ReleaseDate;

/// Release date formats accepted, tried in order.
///
/// The first is the hand-authored form (`25 December 1970`); the second is ISO.
pub const RELEASE_DATE_FORMATS: &[&str] = &["%d %B %Y", "%Y-%m-%d"];

/// File extensions recognised as movie documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["yaml", "yml"];

// ---------------------------------------------------------------------------
// Raw file shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawDocument {
    metadata: RawMetadata,
    #[serde(default)]
    songs_order: Option<Vec<String>>,
    commentary_type: String,
    #[serde(default)]
    commentaries: Option<IndexMap<String, Option<IndexMap<String, String>>>>,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    movie_name: String,
    release_date: String,
    director: String,
    producer: String,
    music_director: String,
    lyricist: String,
    #[serde(default)]
    cast: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Validated document
// ---------------------------------------------------------------------------

/// Descriptive metadata of one movie.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct MovieMetadata {
    #[validate(length(min = 1, message = "movie_name must not be empty"))]
    pub movie_name: String,
    pub release_date: ReleaseDate,
    #[validate(length(min = 1, message = "director must not be empty"))]
    pub director: String,
    #[validate(length(min = 1, message = "producer must not be empty"))]
    pub producer: String,
    #[validate(length(min = 1, message = "music_director must not be empty"))]
    pub music_director: String,
    #[validate(length(min = 1, message = "lyricist must not be empty"))]
    pub lyricist: String,
    /// Cast member names, trimmed and de-duplicated, in document order.
    pub cast: Vec<String>,
}

/// One commentary text with its resolved target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentaryEntry {
    pub target: CommentaryTarget,
    pub text: String,
}

/// All commentary written in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageBlock {
    pub language: String,
    pub entries: Vec<CommentaryEntry>,
    /// Keys that named neither the movie nor any of its songs.
    pub unmatched_keys: Vec<String>,
}

/// A fully parsed and validated movie document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDocument {
    pub metadata: MovieMetadata,
    /// Song names in play order; position `i` is ordinal `i + 1`. A name
    /// listed twice is kept twice and ends up with its later ordinal.
    pub songs: Vec<String>,
    /// Free-form length tag such as `long` or `short`, trimmed.
    pub commentary_kind: String,
    pub commentaries: Vec<LanguageBlock>,
}

/// Parse and validate a movie document from YAML text.
pub fn parse_document(text: &str) -> Result<MovieDocument, CoreError> {
    let raw: RawDocument = serde_yaml::from_str(text)?;
    MovieDocument::from_raw(raw)
}

/// Parse a human-readable release date using [`RELEASE_DATE_FORMATS`].
pub fn parse_release_date(value: &str) -> Result<ReleaseDate, CoreError> {
    let value = value.trim();
    RELEASE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "release_date '{value}' is not a date like '25 December 1970'"
            ))
        })
}

/// Whether a file extension (without the dot) marks a movie document.
pub fn is_document_extension(ext: &str) -> bool {
    DOCUMENT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

impl MovieDocument {
    fn from_raw(raw: RawDocument) -> Result<Self, CoreError> {
        let metadata = MovieMetadata {
            movie_name: raw.metadata.movie_name.trim().to_string(),
            release_date: parse_release_date(&raw.metadata.release_date)?,
            director: raw.metadata.director.trim().to_string(),
            producer: raw.metadata.producer.trim().to_string(),
            music_director: raw.metadata.music_director.trim().to_string(),
            lyricist: raw.metadata.lyricist.trim().to_string(),
            cast: dedup_names(raw.metadata.cast.unwrap_or_default(), "cast")?,
        };
        metadata.validate()?;

        let songs = trimmed_names(raw.songs_order.unwrap_or_default(), "songs_order")?;

        let commentary_kind = raw.commentary_type.trim().to_string();
        if commentary_kind.is_empty() {
            return Err(CoreError::Validation(
                "commentary_type must not be empty".to_string(),
            ));
        }

        let mut commentaries = Vec::new();
        for (language, block) in raw.commentaries.unwrap_or_default() {
            let language = language.trim().to_string();
            if language.is_empty() {
                return Err(CoreError::Validation(
                    "commentaries contains an empty language name".to_string(),
                ));
            }

            let mut entries = Vec::new();
            let mut unmatched_keys = Vec::new();
            for (idx, (key, text)) in block.unwrap_or_default().into_iter().enumerate() {
                let targets = resolve_targets(&key, idx == 0, &songs);
                if targets.is_empty() {
                    unmatched_keys.push(key);
                    continue;
                }
                for target in targets {
                    entries.push(CommentaryEntry {
                        target,
                        text: text.clone(),
                    });
                }
            }

            commentaries.push(LanguageBlock {
                language,
                entries,
                unmatched_keys,
            });
        }

        Ok(Self {
            metadata,
            songs,
            commentary_kind,
            commentaries,
        })
    }

    /// Iterate `(language, target, text)` for every resolved entry, in
    /// document order.
    pub fn commentary_entries(&self) -> impl Iterator<Item = (&str, &CommentaryTarget, &str)> {
        self.commentaries.iter().flat_map(|block| {
            block
                .entries
                .iter()
                .map(move |e| (block.language.as_str(), &e.target, e.text.as_str()))
        })
    }

    /// Number of commentary keys that matched nothing.
    pub fn unmatched_count(&self) -> usize {
        self.commentaries.iter().map(|b| b.unmatched_keys.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Name list helpers
// ---------------------------------------------------------------------------

fn trimmed_names(names: Vec<String>, field: &str) -> Result<Vec<String>, CoreError> {
    names
        .into_iter()
        .map(|n| {
            let n = n.trim().to_string();
            if n.is_empty() {
                Err(CoreError::Validation(format!(
                    "{field} contains an empty name"
                )))
            } else {
                Ok(n)
            }
        })
        .collect()
}

/// Trim names and drop repeats, keeping the first occurrence.
fn dedup_names(names: Vec<String>, field: &str) -> Result<Vec<String>, CoreError> {
    let mut seen = HashSet::new();
    Ok(trimmed_names(names, field)?
        .into_iter()
        .filter(|n| seen.insert(n.clone()))
        .collect())
}
