//! Blob detection module

pub mod config;
pub mod detector;

pub use config::BlobDetectorParams;
pub use detector::{keypoints_to_candidates, CircularBlobDetector};
