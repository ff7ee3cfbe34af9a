//! Blob candidates, their flattened metadata and the records built from it.

use serde::{Deserialize, Serialize};

/// A single blob reported by a detector: centroid and diameter in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlobCandidate {
    pub x: f32,
    pub y: f32,
    pub diameter: f32,
}

impl BlobCandidate {
    pub fn new(x: f32, y: f32, diameter: f32) -> Self {
        Self { x, y, diameter }
    }
}

/// Parallel metric sequences for one image, one element per candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlobMetadata {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub diameter: Vec<f32>,
}

impl BlobMetadata {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Tag every element with `filename`, producing the per-image table.
    pub fn into_records(self, filename: &str) -> Vec<BlobRecord> {
        self.x
            .into_iter()
            .zip(self.y)
            .zip(self.diameter)
            .enumerate()
            .map(|(index, ((x, y), diameter))| BlobRecord {
                index,
                x,
                y,
                diameter,
                filename: filename.to_string(),
            })
            .collect()
    }
}

/// One row of the aggregated table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlobRecord {
    /// Position of the blob within its source image.
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub diameter: f32,
    pub filename: String,
}

/// Split candidates into x, y and diameter sequences, keeping their order.
pub fn flatten(candidates: &[BlobCandidate]) -> BlobMetadata {
    let mut meta = BlobMetadata {
        x: Vec::with_capacity(candidates.len()),
        y: Vec::with_capacity(candidates.len()),
        diameter: Vec::with_capacity(candidates.len()),
    };

    for candidate in candidates {
        meta.x.push(candidate.x);
        meta.y.push(candidate.y);
        meta.diameter.push(candidate.diameter);
    }

    meta
}
