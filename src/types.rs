//! Shared types passed between pipeline stages.
//!
//! The [`Manifest`] is produced by [`process`](crate::process), consumed by
//! [`generate`](crate::generate), and written to `manifest.json` by the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The two kinds of output produced for every source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Resized,
    Thumbnail,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Resized, Category::Thumbnail];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Resized => "resized",
            Category::Thumbnail => "thumbnail",
        }
    }

    /// Suffix inserted before the extension of output file names.
    pub fn suffix(self) -> &'static str {
        match self {
            Category::Resized => "_resized",
            Category::Thumbnail => "_thumbnail",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered record of produced `(resized, thumbnail)` output pairs.
///
/// The i-th resized path and the i-th thumbnail path always come from the
/// same source image. Paths are only ever appended as a pair, so both lists
/// have the same length at every point; deserialization rejects input that
/// breaks this.
///
/// Serialized form:
///
/// ```json
/// { "resized": ["out/a_resized.jpg"], "thumbnail": ["out/a_thumbnail.jpg"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawManifest")]
pub struct Manifest {
    resized: Vec<PathBuf>,
    thumbnail: Vec<PathBuf>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one processed source.
    pub fn push(&mut self, resized: PathBuf, thumbnail: PathBuf) {
        self.resized.push(resized);
        self.thumbnail.push(thumbnail);
    }

    /// Number of recorded pairs.
    pub fn len(&self) -> usize {
        self.resized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resized.is_empty()
    }

    /// Paths recorded for one category, in processing order.
    pub fn get(&self, category: Category) -> &[PathBuf] {
        match category {
            Category::Resized => &self.resized,
            Category::Thumbnail => &self.thumbnail,
        }
    }

    /// `(resized, thumbnail)` pairs in processing order.
    pub fn entries(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.resized
            .iter()
            .zip(&self.thumbnail)
            .map(|(r, t)| (r.as_path(), t.as_path()))
    }
}

#[derive(Deserialize)]
struct RawManifest {
    #[serde(default)]
    resized: Vec<PathBuf>,
    #[serde(default)]
    thumbnail: Vec<PathBuf>,
}

impl TryFrom<RawManifest> for Manifest {
    type Error = String;

    fn try_from(raw: RawManifest) -> Result<Self, Self::Error> {
        if raw.resized.len() != raw.thumbnail.len() {
            return Err(format!(
                "manifest has {} resized but {} thumbnail entries",
                raw.resized.len(),
                raw.thumbnail.len()
            ));
        }
        Ok(Manifest {
            resized: raw.resized,
            thumbnail: raw.thumbnail,
        })
    }
}
