//! Blobscan core library
//!
//! Data model and batch orchestration for blob scanning, independent of any
//! image-processing backend.

pub mod batch;
pub mod blob;
pub mod config;
pub mod error;
pub mod filter;
pub mod table;

// Re-export commonly used types
pub use batch::{BatchReport, BatchRunner, BatchScan, BlobDetect};
pub use blob::{flatten, BlobCandidate, BlobMetadata, BlobRecord};
pub use config::{BatchConfig, OUTPUT_SUFFIX};
pub use error::BatchError;
pub use filter::FilenameFilter;
pub use table::{BlobTable, COLUMNS};
