//! Plain-text rendering of command results.

use std::fmt::Write;

use moviedb_db::models::catalog::{CommentarySearchHit, CompleteMovie, MovieSummary, MovieWithCast};
use moviedb_db::SchemaStatus;
use moviedb_pipeline::BatchSummary;

/// One line per document, then a totals line.
pub fn batch_summary(summary: &BatchSummary) -> String {
    let mut out = String::new();
    for success in &summary.successes {
        let r = &success.report;
        let _ = writeln!(
            out,
            "ok    {}: {} (movie {}{}), cast {}, songs {}, commentaries {}, skipped {}",
            success.document.display(),
            r.movie_name,
            r.movie_id,
            if r.movie_created { ", new" } else { "" },
            r.cast_members,
            r.songs,
            r.commentaries,
            r.skipped_commentaries,
        );
    }
    for failure in &summary.failures {
        let _ = writeln!(out, "FAIL  {}: {}", failure.document.display(), failure.error);
    }
    let _ = writeln!(
        out,
        "{} loaded, {} failed",
        summary.succeeded(),
        summary.failed()
    );
    out
}

pub fn schema_status(version: &str, status: &SchemaStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Connected: {version}");
    let _ = writeln!(out, "Tables: {}", status.tables.join(", "));
    if status.is_complete() {
        let _ = writeln!(out, "Schema complete");
    } else {
        let _ = writeln!(out, "Missing tables: {}", status.missing.join(", "));
    }
    out
}

pub fn movie_listing(movies: &[MovieWithCast]) -> String {
    if movies.is_empty() {
        return "No movies loaded\n".to_string();
    }
    let mut out = String::new();
    for m in movies {
        let _ = writeln!(
            out,
            "{} ({}), dir. {}; cast: {}",
            m.name, m.release_date, m.director, m.cast_names
        );
    }
    out
}

pub fn complete_movie(movie: &CompleteMovie) -> String {
    let m = &movie.movie;
    let mut out = String::new();
    let _ = writeln!(out, "{}", m.name);
    let _ = writeln!(out, "  Released:       {}", m.release_date);
    let _ = writeln!(out, "  Director:       {}", m.director);
    let _ = writeln!(out, "  Producer:       {}", m.producer);
    let _ = writeln!(out, "  Music director: {}", m.music_director);
    let _ = writeln!(out, "  Lyricist:       {}", m.lyricist);
    let _ = writeln!(out, "  Cast:           {}", movie.cast.join(", "));
    let _ = writeln!(out, "  Songs:");
    for song in &movie.songs {
        let _ = writeln!(out, "    {}. {}", song.song_order, song.name);
    }
    if let Some(text) = &movie.commentary {
        let _ = writeln!(out, "  Commentary:     {text}");
    }
    out
}

pub fn search_hits(keyword: &str, hits: &[CommentarySearchHit]) -> String {
    if hits.is_empty() {
        return format!("No commentary mentions \"{keyword}\"\n");
    }
    let mut out = String::new();
    for h in hits {
        let _ = writeln!(
            out,
            "{} / {} [{}, {}]: {}",
            h.movie_name, h.subject, h.commentary_type, h.language, h.commentary_text
        );
    }
    out
}

pub fn movie_summaries(fragment: &str, movies: &[MovieSummary]) -> String {
    if movies.is_empty() {
        return format!("No movies with a cast member matching \"{fragment}\"\n");
    }
    let mut out = String::new();
    for m in movies {
        let _ = writeln!(out, "{} ({}), dir. {}", m.name, m.release_date, m.director);
    }
    out
}
