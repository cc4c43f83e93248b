//! Batch loading of movie documents from a directory.
//!
//! Documents are processed one at a time. Each runs in its own transaction,
//! so a failure rolls back only that document's writes. Document-scoped
//! failures are recorded and the batch moves on; losing the database
//! connection stops the batch.

use std::path::{Path, PathBuf};

use moviedb_core::document::{is_document_extension, parse_document};
use moviedb_db::DbPool;
use serde::Serialize;

use crate::error::IngestError;
use crate::resolver::{ingest_document, IngestReport};

/// A document that was ingested and committed.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSuccess {
    pub document: PathBuf,
    pub report: IngestReport,
}

/// A document whose ingestion was rolled back.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub document: PathBuf,
    pub error: String,
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub successes: Vec<DocumentSuccess>,
    pub failures: Vec<DocumentFailure>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.successes.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// `true` if every document was committed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The batch stopped early because the database became unreachable.
#[derive(Debug, thiserror::Error)]
#[error("Batch aborted at {}: {source}", .document.display())]
pub struct BatchAborted {
    pub document: PathBuf,
    pub source: IngestError,
    /// Outcomes of the documents processed before the abort.
    pub summary: BatchSummary,
}

/// List the movie documents directly inside `dir`, sorted by path.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let read_err = |source| IngestError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        let is_document = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(is_document_extension);
        if is_document {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Parse `text` and ingest it in a fresh transaction.
///
/// Commits on success. On failure the transaction is rolled back before the
/// error is returned, so none of the document's rows remain visible.
pub async fn ingest_str(pool: &DbPool, text: &str) -> Result<IngestReport, IngestError> {
    let doc = parse_document(text)?;

    let mut tx = pool.begin().await?;
    match ingest_document(&mut tx, &doc).await {
        Ok(report) => {
            tx.commit().await?;
            Ok(report)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(
                    movie = %doc.metadata.movie_name,
                    error = %rollback_err,
                    "Rollback failed; transaction discarded with the connection",
                );
            }
            Err(err)
        }
    }
}

/// Read one document from disk and ingest it.
pub async fn ingest_file(pool: &DbPool, path: &Path) -> Result<IngestReport, IngestError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    ingest_str(pool, &text).await
}

/// Ingest every path in order, recording each outcome.
///
/// Document-scoped errors (unreadable file, invalid document, constraint
/// violation) are recorded and skipped. A connectivity error aborts the
/// batch. No document is retried.
pub async fn run_batch(pool: &DbPool, paths: &[PathBuf]) -> Result<BatchSummary, BatchAborted> {
    let mut summary = BatchSummary::default();

    for path in paths {
        tracing::info!(document = %path.display(), "Processing document");

        match ingest_file(pool, path).await {
            Ok(report) => {
                tracing::info!(
                    document = %path.display(),
                    movie_id = report.movie_id,
                    songs = report.songs,
                    commentaries = report.commentaries,
                    "Document ingested",
                );
                summary.successes.push(DocumentSuccess {
                    document: path.clone(),
                    report,
                });
            }
            Err(err) if err.is_connectivity() => {
                tracing::error!(
                    document = %path.display(),
                    error = %err,
                    "Database unreachable; aborting batch",
                );
                return Err(BatchAborted {
                    document: path.clone(),
                    source: err,
                    summary,
                });
            }
            Err(err) => {
                tracing::warn!(document = %path.display(), error = %err, "Document failed");
                summary.failures.push(DocumentFailure {
                    document: path.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        "Batch complete",
    );
    Ok(summary)
}
