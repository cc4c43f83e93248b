//! Subcommand handlers. Each returns the process exit status.

use std::path::Path;

use anyhow::Context;
use moviedb_db::repositories::CatalogQueryRepo;
use moviedb_db::DbPool;
use moviedb_pipeline::{discover_documents, run_batch};

use crate::cli::ReportArgs;
use crate::config::DbConfig;
use crate::output;

pub const EXIT_OK: u8 = 0;
/// At least one document failed and was rolled back, or a check failed.
pub const EXIT_FAILURE: u8 = 1;
/// The database could not be reached, before or during the batch.
pub const EXIT_ABORTED: u8 = 2;

pub async fn load(db: &DbConfig, dir: &Path) -> anyhow::Result<u8> {
    let paths = discover_documents(dir)
        .with_context(|| format!("Failed to list documents in {}", dir.display()))?;
    if paths.is_empty() {
        tracing::warn!(dir = %dir.display(), "No YAML documents found");
        return Ok(EXIT_OK);
    }
    tracing::info!(dir = %dir.display(), documents = paths.len(), "Starting batch");

    let pool = match db.connect().await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(error = %err, "Database unreachable; nothing loaded");
            eprintln!("Database unreachable: {err}");
            return Ok(EXIT_ABORTED);
        }
    };
    let outcome = run_batch(&pool, &paths).await;
    pool.close().await;

    match outcome {
        Ok(summary) => {
            print!("{}", output::batch_summary(&summary));
            if summary.is_clean() {
                Ok(EXIT_OK)
            } else {
                Ok(EXIT_FAILURE)
            }
        }
        Err(aborted) => {
            print!("{}", output::batch_summary(&aborted.summary));
            eprintln!("{aborted}");
            Ok(EXIT_ABORTED)
        }
    }
}

pub async fn check(db: &DbConfig) -> anyhow::Result<u8> {
    let pool = match db.connect().await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(error = %err, "Database connection failed");
            eprintln!("Database unreachable: {err}");
            eprintln!("Check DATABASE_URL and that PostgreSQL is running.");
            return Ok(EXIT_FAILURE);
        }
    };

    moviedb_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    let version = moviedb_db::server_version(&pool).await?;
    let status = moviedb_db::verify_schema(&pool).await?;
    pool.close().await;

    print!("{}", output::schema_status(&version, &status));
    if status.is_complete() {
        Ok(EXIT_OK)
    } else {
        Ok(EXIT_FAILURE)
    }
}

pub async fn report(db: &DbConfig, args: &ReportArgs) -> anyhow::Result<u8> {
    let pool = db.connect().await.context("Failed to connect to database")?;
    let result = if args.json {
        report_json(&pool, args).await
    } else {
        report_text(&pool, args).await
    };
    pool.close().await;
    result.map(|()| EXIT_OK)
}

async fn report_text(pool: &DbPool, args: &ReportArgs) -> anyhow::Result<()> {
    if args.is_listing() {
        let movies = CatalogQueryRepo::list_movies_with_cast(pool).await?;
        print!("{}", output::movie_listing(&movies));
        return Ok(());
    }

    if let Some(name) = &args.movie {
        match CatalogQueryRepo::complete_movie(pool, name).await? {
            Some(mut movie) => {
                movie.commentary =
                    CatalogQueryRepo::movie_commentary(pool, name, &args.kind, &args.language)
                        .await?;
                print!("{}", output::complete_movie(&movie));
            }
            None => println!("Movie not found: {name}"),
        }
    }
    if let Some(keyword) = &args.search {
        let hits = CatalogQueryRepo::search_commentaries(pool, keyword).await?;
        print!("{}", output::search_hits(keyword, &hits));
    }
    if let Some(fragment) = &args.cast {
        let movies = CatalogQueryRepo::movies_by_cast_member(pool, fragment).await?;
        print!("{}", output::movie_summaries(fragment, &movies));
    }
    Ok(())
}

async fn report_json(pool: &DbPool, args: &ReportArgs) -> anyhow::Result<()> {
    let mut doc = serde_json::Map::new();

    if args.is_listing() {
        let movies = CatalogQueryRepo::list_movies_with_cast(pool).await?;
        doc.insert("movies".into(), serde_json::to_value(movies)?);
    }
    if let Some(name) = &args.movie {
        let mut movie = CatalogQueryRepo::complete_movie(pool, name).await?;
        if let Some(movie) = movie.as_mut() {
            movie.commentary =
                CatalogQueryRepo::movie_commentary(pool, name, &args.kind, &args.language).await?;
        }
        doc.insert("movie".into(), serde_json::to_value(movie)?);
    }
    if let Some(keyword) = &args.search {
        let hits = CatalogQueryRepo::search_commentaries(pool, keyword).await?;
        doc.insert("search".into(), serde_json::to_value(hits)?);
    }
    if let Some(fragment) = &args.cast {
        let movies = CatalogQueryRepo::movies_by_cast_member(pool, fragment).await?;
        doc.insert("cast".into(), serde_json::to_value(movies)?);
    }

    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
