//! Recursive source discovery.
//!
//! Stage 1 of the thumb-gal pipeline. Walks the source tree and collects every
//! regular file whose extension is in the requested [`ExtensionSet`].
//!
//! ```text
//! photos/                  find_recursive(photos, {.jpg})
//! ├── a.jpg            →   photos/a.jpg
//! ├── b.txt                (extension not in set)
//! ├── c.JPG            →   photos/c.JPG
//! └── 2019/
//!     ├── beach.jpg    →   photos/2019/beach.jpg
//!     └── loop -> ..       (symlink, never followed)
//! ```
//!
//! ## Ordering
//!
//! The walk is depth-first with siblings sorted by file name, so the same
//! filesystem snapshot always yields the same order. Nothing downstream relies
//! on the order beyond it being stable.
//!
//! ## Symlinks
//!
//! Links are not followed. A symlinked directory that points back up the tree
//! would otherwise recurse forever; a symlinked file is skipped because it is
//! not a regular file.

use crate::extensions::ExtensionSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory not found: {0}")]
    NotFound(PathBuf),
    #[error("Source is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Files found by a scan, plus entries that could not be read.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    /// Entries below the root that the walk could not read, with the reason.
    pub unreadable: Vec<(PathBuf, String)>,
}

impl ScanResult {
    /// Drop every file that lives inside `dir` and return how many were dropped.
    ///
    /// Used when the gallery folder sits inside the source tree: without this,
    /// a re-run would pick up the previous run's `*_resized` and `*_thumbnail`
    /// outputs as new sources. Paths are compared after canonicalization, so
    /// `photos/dist` and `./photos/../photos/dist` name the same folder.
    pub fn exclude_dir(&mut self, dir: &Path) -> usize {
        let dir = canonical(dir);
        let before = self.files.len();
        self.files.retain(|file| !canonical(file).starts_with(&dir));
        before - self.files.len()
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Return the full path of every matching regular file below `root`.
pub fn find_recursive(root: &Path, extensions: &ExtensionSet) -> Result<Vec<PathBuf>, ScanError> {
    Ok(scan(root, extensions)?.files)
}

/// Walk `root` recursively, collecting matches and unreadable entries.
///
/// Fails only when `root` itself is missing or not a directory. Errors deeper
/// in the tree (permission denied on a subfolder, entries vanishing mid-walk)
/// are recorded in [`ScanResult::unreadable`] and the walk continues.
pub fn scan(root: &Path, extensions: &ExtensionSet) -> Result<ScanResult, ScanError> {
    if !root.exists() {
        return Err(ScanError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut result = ScanResult::default();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && extensions.matches(entry.path()) {
                    result.files.push(entry.into_path());
                }
            }
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                result.unreadable.push((path, err.to_string()));
            }
        }
    }

    Ok(result)
}
