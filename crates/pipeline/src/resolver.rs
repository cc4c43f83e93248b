//! Materializes one parsed movie document into the relational schema.
//!
//! Every step borrows the document's transaction. The movie is resolved
//! first because every other row references it; songs are resolved before
//! commentary because song-level commentary needs the song ids. Cast has no
//! ordering constraint beyond the movie.

use std::collections::HashMap;

use moviedb_core::document::{LanguageBlock, MovieDocument, MovieMetadata};
use moviedb_core::error::CoreError;
use moviedb_core::types::DbId;
use moviedb_db::models::cast_member::CreateCastMember;
use moviedb_db::models::commentary::CreateCommentary;
use moviedb_db::models::movie::CreateMovie;
use moviedb_db::models::song::UpsertSong;
use moviedb_db::repositories::{CastMemberRepo, CommentaryRepo, MovieRepo, Resolved, SongRepo};
use moviedb_db::DbTransaction;
use serde::Serialize;

use crate::error::IngestError;

/// Song name to song id, for one movie.
pub type SongIds = HashMap<String, DbId>;

/// What one successful ingestion wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub movie_id: DbId,
    pub movie_name: String,
    /// `false` when the movie already existed and was reused.
    pub movie_created: bool,
    /// Cast members associated with the movie (new or existing links).
    pub cast_members: usize,
    pub songs: usize,
    /// Commentary rows appended.
    pub commentaries: usize,
    /// Commentary entries that matched no known song and were not written.
    pub skipped_commentaries: usize,
}

/// Counts returned by [`insert_commentaries`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentaryCounts {
    pub inserted: usize,
    pub skipped: usize,
}

/// Run every step for one document, in dependency order.
///
/// The caller owns the transaction and decides whether to commit.
pub async fn ingest_document(
    tx: &mut DbTransaction<'_>,
    doc: &MovieDocument,
) -> Result<IngestReport, IngestError> {
    let movie = resolve_movie(tx, &doc.metadata).await?;
    let movie_id = movie.id();

    let cast_ids = resolve_cast_members(tx, movie_id, &doc.metadata.cast).await?;
    let song_ids = resolve_songs(tx, movie_id, &doc.songs).await?;
    let counts = insert_commentaries(
        tx,
        movie_id,
        &song_ids,
        &doc.commentary_kind,
        &doc.commentaries,
    )
    .await?;

    Ok(IngestReport {
        movie_id,
        movie_name: doc.metadata.movie_name.clone(),
        movie_created: movie.was_created(),
        cast_members: cast_ids.len(),
        songs: song_ids.len(),
        commentaries: counts.inserted,
        skipped_commentaries: counts.skipped,
    })
}

/// Return the movie's id, inserting it if no movie has this name.
///
/// An existing movie keeps its stored attributes.
pub async fn resolve_movie(
    tx: &mut DbTransaction<'_>,
    metadata: &MovieMetadata,
) -> Result<Resolved, IngestError> {
    let movie = MovieRepo::resolve(&mut **tx, &CreateMovie::from(metadata)).await?;
    tracing::info!(
        movie_id = movie.id(),
        movie = %metadata.movie_name,
        created = movie.was_created(),
        "Movie resolved",
    );
    Ok(movie)
}

/// Resolve each cast member by name and link it to the movie.
///
/// Returns the cast member ids in input order.
pub async fn resolve_cast_members(
    tx: &mut DbTransaction<'_>,
    movie_id: DbId,
    names: &[String],
) -> Result<Vec<DbId>, IngestError> {
    let mut ids = Vec::with_capacity(names.len());
    let mut new_links = 0;

    for name in names {
        let input = CreateCastMember { name: name.clone() };
        let member = CastMemberRepo::resolve(&mut **tx, &input).await?;
        if CastMemberRepo::link_to_movie(&mut **tx, movie_id, member.id()).await? {
            new_links += 1;
        }
        ids.push(member.id());
    }

    tracing::info!(movie_id, cast = ids.len(), new_links, "Cast resolved");
    Ok(ids)
}

/// Upsert the movie's songs with 1-based ordinals taken from input order.
///
/// A song already stored for this movie keeps its id and takes the new
/// ordinal. A name listed twice is upserted twice, so its later position wins.
pub async fn resolve_songs(
    tx: &mut DbTransaction<'_>,
    movie_id: DbId,
    ordered_names: &[String],
) -> Result<SongIds, IngestError> {
    let mut song_ids = SongIds::with_capacity(ordered_names.len());

    for (idx, name) in ordered_names.iter().enumerate() {
        let song_order = i32::try_from(idx + 1).map_err(|_| {
            CoreError::Validation(format!("too many songs: ordinal {} out of range", idx + 1))
        })?;
        let input = UpsertSong {
            movie_id,
            name: name.clone(),
            song_order,
        };
        let id = SongRepo::upsert(&mut **tx, &input).await?;
        song_ids.insert(input.name, id);
    }

    tracing::info!(movie_id, songs = song_ids.len(), "Songs resolved");
    Ok(song_ids)
}

/// Append one commentary row per resolved entry.
///
/// Movie-level entries get a NULL song reference. Song-level entries whose
/// song is absent from `song_ids`, and keys that matched nothing at parse
/// time, are skipped and counted.
pub async fn insert_commentaries(
    tx: &mut DbTransaction<'_>,
    movie_id: DbId,
    song_ids: &SongIds,
    kind: &str,
    blocks: &[LanguageBlock],
) -> Result<CommentaryCounts, IngestError> {
    let mut counts = CommentaryCounts::default();

    for block in blocks {
        for key in &block.unmatched_keys {
            tracing::warn!(
                movie_id,
                language = %block.language,
                key = %key,
                "Commentary key matches no song; skipped",
            );
            counts.skipped += 1;
        }

        for entry in &block.entries {
            let song_id = match entry.target.song_name() {
                None => None,
                Some(name) => match song_ids.get(name) {
                    Some(&id) => Some(id),
                    None => {
                        tracing::warn!(
                            movie_id,
                            language = %block.language,
                            song = %name,
                            "Commentary song not resolved; skipped",
                        );
                        counts.skipped += 1;
                        continue;
                    }
                },
            };

            CommentaryRepo::create(
                &mut **tx,
                &CreateCommentary {
                    movie_id,
                    song_id,
                    kind,
                    language: &block.language,
                    text: &entry.text,
                },
            )
            .await?;
            counts.inserted += 1;
        }
    }

    tracing::info!(
        movie_id,
        kind = %kind,
        inserted = counts.inserted,
        skipped = counts.skipped,
        "Commentaries inserted",
    );
    Ok(counts)
}
