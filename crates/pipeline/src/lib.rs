//! Movie document ingestion.
//!
//! [`resolver`] writes one parsed document inside a caller-owned
//! transaction. [`batch`] discovers documents on disk and runs each in its
//! own transaction, collecting per-document outcomes.

pub mod batch;
pub mod error;
pub mod resolver;

pub use batch::{
    discover_documents, ingest_file, ingest_str, run_batch, BatchAborted, BatchSummary,
    DocumentFailure, DocumentSuccess,
};
pub use error::IngestError;
pub use resolver::{ingest_document, IngestReport};
