//! Image loading and keypoint visualization helpers

use crate::Result;
use anyhow::{bail, Context};
use log::warn;
use opencv::{
    core::{KeyPoint, Mat, Scalar, Vector},
    features2d::{self, DrawMatchesFlags},
    highgui,
    imgcodecs::{self, IMREAD_COLOR},
    prelude::*,
};
use std::path::Path;

/// Window title used by the visualization path.
pub const KEYPOINTS_WINDOW: &str = "Keypoints";

/// Image utility functions
pub struct ImageUtils;

impl ImageUtils {
    /// Load image as a 3-channel BGR Mat.
    ///
    /// `imread` reports unreadable files as an empty matrix; that is turned
    /// into an error here.
    pub fn load_color<P: AsRef<Path>>(path: P) -> Result<Mat> {
        let path_str = path.as_ref().to_string_lossy();

        let mat = imgcodecs::imread(&path_str, IMREAD_COLOR)
            .with_context(|| format!("Failed to load color image: {}", path_str))?;

        if mat.empty() {
            bail!("Could not decode image: {}", path_str);
        }

        Ok(mat)
    }

    /// Copy of `image` with each keypoint circled in red at its own size.
    pub fn draw_keypoints(image: &Mat, keypoints: &Vector<KeyPoint>) -> Result<Mat> {
        let mut output = Mat::default();

        features2d::draw_keypoints(
            image,
            keypoints,
            &mut output,
            Scalar::new(0.0, 0.0, 255.0, 0.0),
            DrawMatchesFlags::DRAW_RICH_KEYPOINTS,
        )
        .context("Failed to draw keypoints")?;

        Ok(output)
    }

    /// Show `image` and block until a key is pressed. Returns the key code.
    ///
    /// Windows are destroyed on return, including when showing fails.
    pub fn show_blocking(window: &str, image: &Mat) -> Result<i32> {
        let _windows = WindowGuard;

        highgui::imshow(window, image)
            .with_context(|| format!("Failed to show window: {}", window))?;

        highgui::wait_key(0).context("Failed while waiting for key press")
    }
}

struct WindowGuard;

impl Drop for WindowGuard {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_all_windows() {
            warn!("Failed to destroy windows: {}", e);
        }
    }
}
