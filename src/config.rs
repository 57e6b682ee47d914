use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::sqlite::ResetPolicy;

pub const DEFAULT_DB_PATH: &str = "my.db";
pub const DEFAULT_INPUT_PATH: &str = "image.jpg";
pub const DEFAULT_OUTPUT_PATH: &str = "stored_image.jpg";
pub const DEFAULT_TITLE: &str = "JPG Image";

/// Blob store run configuration
///
/// `Default` holds the fixed paths and title the binary runs with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobStoreConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// File whose bytes are stored
    pub input_path: PathBuf,
    /// File the stored bytes are written back to
    pub output_path: PathBuf,
    /// Title of the inserted document
    pub title: String,
    /// How an existing `documents` table is treated at start
    pub reset_policy: ResetPolicy,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            title: DEFAULT_TITLE.to_string(),
            reset_policy: ResetPolicy::default(),
        }
    }
}

impl BlobStoreConfig {
    /// Create a config with the default title and reset policy
    pub fn new(
        db_path: impl Into<PathBuf>,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            db_path: db_path.into(),
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }
}
