//! Stores a binary file in SQLite and reads it back out.
//!
//! # Intention
//!
//! - Copy one file's bytes into a `documents` row and write the row's
//!   payload back to disk.
//! - Keep SQLite-specific logic, types, and error handling behind
//!   [`sqlite::SqliteStore`].
//!
//! # Architectural Boundaries
//!
//! - Only the store and the run procedure belong here.
//! - The binary only wires logging to [`script::run`].

pub mod config;
pub mod document;
pub mod error;
pub mod script;
pub mod sqlite;

pub use config::BlobStoreConfig;
pub use document::Document;
pub use error::{BlobStoreError, Result};
pub use script::{run, RunReport, FIRST_DOCUMENT_ID};
pub use sqlite::{ResetPolicy, Schema, SqliteStore};
