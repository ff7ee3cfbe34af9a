//! Batch run configuration

use crate::error::BatchError;
use crate::filter::FilenameFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Appended to the filename mask to name the aggregated table.
pub const OUTPUT_SUFFIX: &str = "_blob_output.csv";

/// Where to look, which files to take, and how to write the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub directory: PathBuf,
    pub filename_mask: String,
    pub extension: String,
    /// Sort entries by name before processing; otherwise keep listing order.
    pub sort_entries: bool,
    /// Emit the leading per-image row index column.
    pub include_index: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            directory: "data".into(),
            filename_mask: "blob_test_image".to_string(),
            extension: ".png".to_string(),
            sort_entries: true,
            include_index: true,
        }
    }
}

impl BatchConfig {
    pub fn new(
        directory: impl Into<PathBuf>,
        filename_mask: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            filename_mask: filename_mask.into(),
            extension: extension.into(),
            ..Self::default()
        }
    }

    /// Load a JSON config from disk. Missing fields take their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, BatchError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| BatchError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| BatchError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn filter(&self) -> FilenameFilter {
        FilenameFilter::new(&self.filename_mask, &self.extension)
    }

    /// `<directory>/<mask>_blob_output.csv`
    pub fn output_path(&self) -> PathBuf {
        self.directory
            .join(format!("{}{}", self.filename_mask, OUTPUT_SUFFIX))
    }
}
