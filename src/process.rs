//! Batch processing: source images → resized copies and thumbnails.
//!
//! Takes the file list from [`scan`](crate::scan) and, for each file in that
//! order, decodes it, produces a percentage-scaled copy and a bounded
//! thumbnail, and writes both into the destination folder. The result is a
//! [`Manifest`] of `(resized, thumbnail)` pairs for the gallery builder.
//!
//! ## Output Structure
//!
//! ```text
//! <output>/<label>/
//! ├── a_resized.jpg          # 75% of the original (default)
//! ├── a_thumbnail.jpg        # longest edge ≤ 128px (default)
//! ├── logo_resized.png       # transparent logo.jpg, stored as PNG
//! └── logo_thumbnail.png
//! ```
//!
//! ## Failure Handling
//!
//! | Situation | Outcome |
//! |---|---|
//! | File cannot be read | skipped ([`SkipReason::Unreadable`]) |
//! | Not an image / corrupt / unsupported | skipped, batch continues |
//! | Encode or write fails for one file | skipped ([`SkipReason::WriteFailed`]) |
//! | Destination refuses writes | [`ProcessError::Aborted`] with the partial manifest |
//!
//! ## Re-runs
//!
//! An output whose final path already exists is left untouched but still
//! recorded, so running twice over the same inputs yields the same manifest.
//! The existence check uses the path after format substitution, otherwise a
//! transparent `logo.jpg` would be re-encoded on every run.

use crate::imaging::{
    DecodeFailure, ImageBackend, Quality, RasterImage, RustBackend, scale_by_percent, thumbnail,
};
use crate::naming::output_path;
use crate::storage::{self, StorageError};
use crate::types::{Category, Manifest};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Cannot prepare destination: {0}")]
    Storage(#[from] StorageError),
    #[error("Aborted after {} image(s): {source}", .partial.len())]
    Aborted {
        #[source]
        source: StorageError,
        /// Everything recorded before the failure.
        partial: Manifest,
    },
}

/// Configuration for image processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessConfig {
    /// Scale factor for the resized copy, in percent of each dimension.
    pub resize_percent: u32,
    /// Bounding box edge for thumbnails.
    pub thumbnail_edge: u32,
    /// JPEG quality (1-100).
    pub quality: u32,
}

impl ProcessConfig {
    /// Build a ProcessConfig from GalleryConfig values.
    pub fn from_gallery_config(config: &crate::config::GalleryConfig) -> Self {
        Self {
            resize_percent: config.resize_percent,
            thumbnail_edge: config.thumbnail_edge,
            quality: config.quality,
        }
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self::from_gallery_config(&crate::config::GalleryConfig::default())
    }
}

/// What happened to one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    /// Encoded and written during this run.
    Written,
    /// Already present; left untouched and recorded as-is.
    Exists,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputInfo {
    pub category: Category,
    pub path: PathBuf,
    pub status: OutputStatus,
}

/// Why a source file contributed nothing to the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    NotAnImage,
    Corrupt,
    UnsupportedFormat,
    Unreadable,
    WriteFailed,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NotAnImage => "not an image",
            SkipReason::Corrupt => "corrupt image",
            SkipReason::UnsupportedFormat => "unsupported format",
            SkipReason::Unreadable => "unreadable",
            SkipReason::WriteFailed => "write failed",
        }
    }
}

impl From<&DecodeFailure> for SkipReason {
    fn from(failure: &DecodeFailure) -> Self {
        match failure {
            DecodeFailure::NotAnImage => SkipReason::NotAnImage,
            DecodeFailure::Corrupt(_) => SkipReason::Corrupt,
            DecodeFailure::UnsupportedFormat(_) => SkipReason::UnsupportedFormat,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress event emitted during image processing.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    /// A source was recorded in the manifest.
    ImageProcessed {
        /// 1-based position among processed images.
        index: usize,
        source_path: PathBuf,
        outputs: Vec<OutputInfo>,
    },
    /// A source was skipped.
    ImageSkipped {
        source_path: PathBuf,
        reason: SkipReason,
        detail: String,
    },
}

/// Counts for the end-of-run report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub processed: usize,
    pub written: usize,
    pub reused: usize,
    pub skipped: BTreeMap<SkipReason, Vec<PathBuf>>,
}

impl ProcessSummary {
    pub fn skipped_count(&self) -> usize {
        self.skipped.values().map(Vec::len).sum()
    }

    fn record_outputs(&mut self, outputs: &[OutputInfo]) {
        self.processed += 1;
        for output in outputs {
            match output.status {
                OutputStatus::Written => self.written += 1,
                OutputStatus::Exists => self.reused += 1,
            }
        }
    }

    fn record_skip(&mut self, source: &Path, reason: SkipReason) {
        self.skipped
            .entry(reason)
            .or_default()
            .push(source.to_path_buf());
    }
}

impl fmt::Display for ProcessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} written, {} reused, {} skipped",
            self.processed,
            self.written,
            self.reused,
            self.skipped_count()
        )
    }
}

/// Result of a completed batch.
#[derive(Debug)]
pub struct ProcessResult {
    pub manifest: Manifest,
    pub summary: ProcessSummary,
}

/// Process `sources` into `destination` with the `image`-crate backend.
pub fn process(
    sources: &[PathBuf],
    destination: &Path,
    config: &ProcessConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    let backend = RustBackend::with_quality(Quality::new(config.quality));
    process_with_backend(&backend, sources, destination, config, progress)
}

/// Process images using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    sources: &[PathBuf],
    destination: &Path,
    config: &ProcessConfig,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    storage::ensure_directory(destination)?;

    let mut manifest = Manifest::new();
    let mut summary = ProcessSummary::default();

    for source in sources {
        let outcome = process_one(backend, source, destination, config);
        let event = match outcome {
            Ok(outputs) => {
                summary.record_outputs(&outputs);
                manifest.push(
                    find_output(&outputs, Category::Resized),
                    find_output(&outputs, Category::Thumbnail),
                );
                ProcessEvent::ImageProcessed {
                    index: manifest.len(),
                    source_path: source.clone(),
                    outputs,
                }
            }
            Err(FileFailure::Skip { reason, detail }) => {
                summary.record_skip(source, reason);
                ProcessEvent::ImageSkipped {
                    source_path: source.clone(),
                    reason,
                    detail,
                }
            }
            Err(FileFailure::Fatal(err)) => {
                return Err(ProcessError::Aborted {
                    source: err,
                    partial: manifest,
                });
            }
        };
        if let Some(tx) = &progress {
            // A closed receiver only means nobody is listening
            tx.send(event).ok();
        }
    }

    Ok(ProcessResult { manifest, summary })
}

enum FileFailure {
    Skip { reason: SkipReason, detail: String },
    Fatal(StorageError),
}

impl From<StorageError> for FileFailure {
    fn from(err: StorageError) -> Self {
        if err.is_permission_denied() {
            FileFailure::Fatal(err)
        } else {
            FileFailure::Skip {
                reason: SkipReason::WriteFailed,
                detail: err.to_string(),
            }
        }
    }
}

fn find_output(outputs: &[OutputInfo], category: Category) -> PathBuf {
    outputs
        .iter()
        .find(|o| o.category == category)
        .map(|o| o.path.clone())
        .unwrap_or_default()
}

fn process_one(
    backend: &impl ImageBackend,
    source: &Path,
    destination: &Path,
    config: &ProcessConfig,
) -> Result<Vec<OutputInfo>, FileFailure> {
    let bytes = std::fs::read(source).map_err(|e| FileFailure::Skip {
        reason: SkipReason::Unreadable,
        detail: e.to_string(),
    })?;
    let image = backend.decode(&bytes).map_err(|e| FileFailure::Skip {
        reason: SkipReason::from(&e.reason),
        detail: e.to_string(),
    })?;

    Category::ALL
        .into_iter()
        .map(|category| {
            let requested = output_path(destination, source, category);
            write_output(backend, &image, category, &requested, config)
        })
        .collect()
}

fn write_output(
    backend: &impl ImageBackend,
    image: &RasterImage,
    category: Category,
    requested: &Path,
    config: &ProcessConfig,
) -> Result<OutputInfo, FileFailure> {
    // Resizing keeps the color mode, so the final path is known up front
    let (target, _) = storage::resolve_target(requested, image.color_mode());
    if target.exists() {
        return Ok(OutputInfo {
            category,
            path: target,
            status: OutputStatus::Exists,
        });
    }

    let derived = match category {
        Category::Resized => scale_by_percent(backend, image, config.resize_percent),
        Category::Thumbnail => thumbnail(backend, image, config.thumbnail_edge),
    };
    let path = storage::save(backend, &derived, requested)?;
    Ok(OutputInfo {
        category,
        path,
        status: OutputStatus::Written,
    })
}
