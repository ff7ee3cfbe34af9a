//! Blobscan Computer Vision Library
//!
//! OpenCV-backed circular blob detection for the blobscan batch runner.

pub mod detection;
pub mod utils;

// Re-export commonly used types
pub use detection::{BlobDetectorParams, CircularBlobDetector};
pub use utils::ImageUtils;

// Error handling
pub type Result<T> = anyhow::Result<T>;
