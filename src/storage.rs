//! Writing images to the destination folder.
//!
//! The writer picks an output format from the target path's extension and
//! falls back to PNG when that format cannot hold the image:
//!
//! | Target | Image | Written as |
//! |---|---|---|
//! | `a_resized.jpg` | opaque | `a_resized.jpg` (JPEG) |
//! | `a_resized.jpg` | has alpha | `a_resized.png` (PNG) |
//! | `a_resized.tif` | has alpha | `a_resized.tif` (TIFF) |
//! | `a_resized.gif` | any | `a_resized.png` (PNG, no GIF encoder) |
//!
//! [`save`] always writes. Whether an existing file should be kept is decided
//! by the batch processor before it calls [`save`].

use crate::imaging::{BackendError, ColorMode, ImageBackend, OutputFormat, RasterImage};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Encoding {path} failed: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

impl StorageError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            StorageError::PermissionDenied(path.to_path_buf())
        } else {
            StorageError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// The destination itself refuses writes, so every later write would too.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, StorageError::PermissionDenied(_))
    }
}

/// Create `path` and any missing parents. Idempotent.
pub fn ensure_directory(path: &Path) -> Result<PathBuf, StorageError> {
    fs::create_dir_all(path).map_err(|e| StorageError::from_io(path, e))?;
    Ok(path.to_path_buf())
}

/// The per-project output folder `root/label`, created if absent.
pub fn storage_location(root: &Path, label: &str) -> Result<PathBuf, StorageError> {
    ensure_directory(&root.join(label))
}

/// Final path and format for writing an image in `mode` to `path`.
///
/// Keeps `path` when its extension names a format that can store the image;
/// otherwise swaps the extension for `.png`.
pub fn resolve_target(path: &Path, mode: ColorMode) -> (PathBuf, OutputFormat) {
    match OutputFormat::from_path(path) {
        Some(format) if format.supports(mode) => (path.to_path_buf(), format),
        _ => (
            path.with_extension(OutputFormat::Png.extension()),
            OutputFormat::Png,
        ),
    }
}

/// Encode `image` and write it, returning the path actually written.
///
/// The returned path differs from `path` when the format had to be
/// substituted (see [`resolve_target`]). Existing files are overwritten.
pub fn save(
    backend: &impl ImageBackend,
    image: &RasterImage,
    path: &Path,
) -> Result<PathBuf, StorageError> {
    let (target, format) = resolve_target(path, image.color_mode());
    let bytes = backend
        .encode(image, format)
        .map_err(|source| StorageError::Encode {
            path: target.clone(),
            source,
        })?;
    fs::write(&target, bytes).map_err(|e| StorageError::from_io(&target, e))?;
    Ok(target)
}
