//! Circular blob detector backed by OpenCV's `SimpleBlobDetector`

use super::config::BlobDetectorParams;
use crate::utils::image::{ImageUtils, KEYPOINTS_WINDOW};
use crate::Result;
use anyhow::Context;
use blobscan_core::{BlobCandidate, BlobDetect};
use log::debug;
use opencv::{
    core::{KeyPoint, Mat, Ptr, Vector},
    features2d::SimpleBlobDetector,
    prelude::*,
};
use std::path::Path;

/// Detector with a fixed configuration, built once and reused per image.
pub struct CircularBlobDetector {
    params: BlobDetectorParams,
    detector: Ptr<SimpleBlobDetector>,
}

impl CircularBlobDetector {
    /// Create the detector from [`BlobDetectorParams::default`].
    pub fn new() -> Result<Self> {
        let params = BlobDetectorParams::default();
        let detector = SimpleBlobDetector::create(params.to_opencv()?)
            .context("Failed to create SimpleBlobDetector")?;

        Ok(Self { params, detector })
    }

    pub fn params(&self) -> &BlobDetectorParams {
        &self.params
    }

    /// Run the detector and return OpenCV's keypoints as-is.
    pub fn detect_keypoints(&mut self, image: &Mat) -> Result<Vector<KeyPoint>> {
        let mut keypoints = Vector::<KeyPoint>::new();
        self.detector
            .detect(image, &mut keypoints, &Mat::default())
            .context("Blob detection failed")?;

        debug!("SimpleBlobDetector found {} keypoints", keypoints.len());
        Ok(keypoints)
    }

    /// Detect blobs in a decoded color image.
    ///
    /// With `visualize` set, the keypoints are drawn on a copy of the image
    /// and shown in a window; this call then blocks until a key is pressed.
    pub fn detect(&mut self, image: &Mat, visualize: bool) -> Result<Vec<BlobCandidate>> {
        let keypoints = self.detect_keypoints(image)?;

        if visualize {
            let annotated = ImageUtils::draw_keypoints(image, &keypoints)?;
            ImageUtils::show_blocking(KEYPOINTS_WINDOW, &annotated)?;
        }

        Ok(keypoints_to_candidates(&keypoints))
    }

    pub fn detect_from_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        visualize: bool,
    ) -> Result<Vec<BlobCandidate>> {
        let image = ImageUtils::load_color(&path)?;
        self.detect(&image, visualize)
    }
}

/// Keypoint centre and size, in the order OpenCV returned them.
pub fn keypoints_to_candidates(keypoints: &Vector<KeyPoint>) -> Vec<BlobCandidate> {
    keypoints
        .iter()
        .map(|kp| {
            let pt = kp.pt();
            BlobCandidate::new(pt.x, pt.y, kp.size())
        })
        .collect()
}

impl BlobDetect for CircularBlobDetector {
    type Image = Mat;

    fn load(&mut self, path: &Path) -> Result<Mat> {
        ImageUtils::load_color(path)
    }

    fn detect(&mut self, image: &Mat) -> Result<Vec<BlobCandidate>> {
        CircularBlobDetector::detect(self, image, false)
    }
}
