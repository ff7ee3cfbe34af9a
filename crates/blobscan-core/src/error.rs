use std::path::PathBuf;

/// Failures that abort a batch run.
#[derive(thiserror::Error, Debug)]
pub enum BatchError {
    #[error("failed to list directory {path:?}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path:?}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("blob detection failed on {path:?}: {message}")]
    Detect { path: PathBuf, message: String },
    #[error("failed to write table to {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read config {path:?}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path:?}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BatchError {
    /// Path of the file or directory the failure relates to, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            BatchError::ReadDir { path, .. }
            | BatchError::Decode { path, .. }
            | BatchError::Detect { path, .. }
            | BatchError::Write { path, .. }
            | BatchError::ReadConfig { path, .. }
            | BatchError::Config { path, .. } => Some(path),
            BatchError::Io(_) => None,
        }
    }
}
