//! Utility modules

pub mod image;

pub use image::{ImageUtils, KEYPOINTS_WINDOW};
