//! Blob detector configuration

use crate::Result;
use opencv::features2d::SimpleBlobDetector_Params;
use serde::{Deserialize, Serialize};

/// Parameters handed to OpenCV's `SimpleBlobDetector`.
///
/// The default value accepts near-perfect, solid, non-elongated circles:
/// every threshold from 0 to 255 is scanned and regions are kept only if
/// they pass the circularity, convexity and inertia filters. Area is not
/// filtered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlobDetectorParams {
    pub threshold: ThresholdScan,
    pub area: RangeFilter,
    pub circularity: MinFilter,
    pub convexity: MinFilter,
    pub inertia_ratio: MinFilter,
}

/// Threshold sweep for the binarization stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdScan {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    pub enabled: bool,
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinFilter {
    pub enabled: bool,
    pub min: f32,
}

impl Default for BlobDetectorParams {
    fn default() -> Self {
        Self {
            threshold: ThresholdScan {
                min: 0.0,
                max: 255.0,
                step: 1.0,
            },
            // bounds are inert while the filter is off
            area: RangeFilter {
                enabled: false,
                min: 75.0,
                max: 250.0,
            },
            circularity: MinFilter {
                enabled: true,
                min: 0.9,
            },
            convexity: MinFilter {
                enabled: true,
                min: 0.75,
            },
            inertia_ratio: MinFilter {
                enabled: true,
                min: 0.5,
            },
        }
    }
}

impl BlobDetectorParams {
    /// Start from OpenCV's defaults and override the fields we fix.
    pub fn to_opencv(&self) -> Result<SimpleBlobDetector_Params> {
        let mut params = SimpleBlobDetector_Params::default()?;

        params.threshold_step = self.threshold.step;
        params.min_threshold = self.threshold.min;
        params.max_threshold = self.threshold.max;

        params.filter_by_area = self.area.enabled;
        params.min_area = self.area.min;
        params.max_area = self.area.max;

        params.filter_by_circularity = self.circularity.enabled;
        params.min_circularity = self.circularity.min;

        params.filter_by_convexity = self.convexity.enabled;
        params.min_convexity = self.convexity.min;

        params.filter_by_inertia = self.inertia_ratio.enabled;
        params.min_inertia_ratio = self.inertia_ratio.min;

        Ok(params)
    }
}
