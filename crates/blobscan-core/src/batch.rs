//! Directory batch runner.
//!
//! Walks one directory, runs a [`BlobDetect`] implementation on every file
//! whose name passes the [`FilenameFilter`](crate::FilenameFilter), and
//! writes the aggregated [`BlobTable`] next to the inputs. The first failure
//! aborts the run before anything is written.

use crate::blob::BlobCandidate;
use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::table::BlobTable;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Narrow seam over a blob detection backend.
pub trait BlobDetect {
    /// Decoded image type the backend works on.
    type Image;

    /// Decode the image at `path`.
    fn load(&mut self, path: &Path) -> anyhow::Result<Self::Image>;

    /// Detect blobs in a decoded image, without any visualization.
    fn detect(&mut self, image: &Self::Image) -> anyhow::Result<Vec<BlobCandidate>>;
}

/// Aggregated table plus the names that were processed or skipped.
#[derive(Debug, Clone, Default)]
pub struct BatchScan {
    pub table: BlobTable,
    pub processed: Vec<String>,
    pub ignored: Vec<String>,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub output_path: PathBuf,
    pub processed: usize,
    pub ignored: usize,
    pub rows: usize,
}

pub struct BatchRunner<D> {
    config: BatchConfig,
    detector: D,
}

impl<D: BlobDetect> BatchRunner<D> {
    pub fn new(config: BatchConfig, detector: D) -> Self {
        Self { config, detector }
    }

    /// Scan the directory and write the aggregated CSV.
    pub fn run(&mut self) -> Result<BatchReport, BatchError> {
        let scan = self.scan()?;
        let output_path = self.config.output_path();

        scan.table.save_csv(&output_path, self.config.include_index)?;

        let report = BatchReport {
            output_path,
            processed: scan.processed.len(),
            ignored: scan.ignored.len(),
            rows: scan.table.len(),
        };
        info!(
            "Wrote {} rows from {} files to {:?} ({} ignored)",
            report.rows, report.processed, report.output_path, report.ignored
        );
        Ok(report)
    }

    /// Detect blobs in every matching file without writing anything.
    pub fn scan(&mut self) -> Result<BatchScan, BatchError> {
        let filter = self.config.filter();
        let mut scan = BatchScan::default();

        for (name, path) in self.list_entries()? {
            if !filter.matches(&name) {
                info!("Ignoring file: {}", name);
                scan.ignored.push(name);
                continue;
            }

            info!("Processing file: {}", name);
            let candidates = self.detect_file(&path)?;
            let rows = scan.table.push_image(&name, &candidates);
            debug!("{}: {} blobs", name, rows);
            scan.processed.push(name);
        }

        Ok(scan)
    }

    fn detect_file(&mut self, path: &Path) -> Result<Vec<BlobCandidate>, BatchError> {
        let image = self
            .detector
            .load(path)
            .map_err(|e| BatchError::Decode {
                path: path.to_path_buf(),
                message: format!("{e:#}"),
            })?;

        self.detector
            .detect(&image)
            .map_err(|e| BatchError::Detect {
                path: path.to_path_buf(),
                message: format!("{e:#}"),
            })
    }

    fn list_entries(&self) -> Result<Vec<(String, PathBuf)>, BatchError> {
        let dir = &self.config.directory;
        let read_err = |source| BatchError::ReadDir {
            path: dir.clone(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push((name, entry.path()));
        }

        if self.config.sort_entries {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
        }

        Ok(entries)
    }
}
