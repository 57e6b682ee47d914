//! The blob store run: file in, row out, row back to file.

use std::fs;
use tracing::info;

use crate::config::BlobStoreConfig;
use crate::error::{BlobStoreError, Result};
use crate::sqlite::{Schema, SqliteStore};

/// The row whose payload is written back out. A fresh store assigns it to
/// the first insert; later inserts under `CreateIfAbsent` do not replace it.
pub const FIRST_DOCUMENT_ID: i64 = 1;

/// What a completed run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub inserted_id: i64,
    pub bytes_read: usize,
    pub bytes_written: usize,
}

/// Store `input_path` as a document and write document 1 to `output_path`.
///
/// The table is created before the input is read, so a missing input
/// leaves an empty table behind. The insert is committed only after the
/// output file has been written; any failure in between rolls it back.
pub fn run(config: &BlobStoreConfig) -> Result<RunReport> {
    let mut store = SqliteStore::open(&config.db_path)?;
    store.initialize_schema(&Schema::documents(), config.reset_policy)?;

    let input = fs::read(&config.input_path).map_err(|source| BlobStoreError::ReadInput {
        path: config.input_path.clone(),
        source,
    })?;

    let tx = store.transaction()?;
    let inserted_id = tx.insert_document(&config.title, &input)?;
    let data = tx.fetch_data(FIRST_DOCUMENT_ID)?;

    fs::write(&config.output_path, &data).map_err(|source| BlobStoreError::WriteOutput {
        path: config.output_path.clone(),
        source,
    })?;
    info!(
        "wrote document {} ({} bytes) to {}",
        FIRST_DOCUMENT_ID,
        data.len(),
        config.output_path.display()
    );

    tx.commit()?;
    store.close()?;

    Ok(RunReport {
        inserted_id,
        bytes_read: input.len(),
        bytes_written: data.len(),
    })
}
