//! Error types for blob_store

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlobStoreError>;

#[derive(Error, Debug)]
pub enum BlobStoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to read input file {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document not found: {0}")]
    DocumentNotFound(i64),
}
