//! HTML gallery generation.
//!
//! Renders one static page from a processed [`Manifest`]: every thumbnail is
//! shown in manifest order and links to its resized copy in a new tab. HTML is
//! generated with [Maud](https://maud.lambda.xyz/), so file names and the
//! title are escaped on interpolation.
//!
//! ## Output
//!
//! ```text
//! <output>/<label>/
//! ├── index.html          # this page, rewritten on every run
//! ├── a_resized.jpg
//! └── a_thumbnail.jpg
//! ```
//!
//! Links are relative to the directory holding the page, so the gallery
//! folder can be moved or uploaded as a whole. Outputs outside that directory
//! are linked by their full path.
//!
//! Unlike the image outputs, the page is never reused: [`write`] always
//! overwrites it.

use crate::types::{Category, Manifest};
use maud::{DOCTYPE, Markup, html};
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
h2 { font-weight: 500; }
.thumbnails { display: flex; flex-wrap: wrap; gap: 8px; }
img {
  border: 1px solid #ddd;
  border-radius: 4px;
  padding: 5px;
  width: 150px;
}
img:hover { box-shadow: 0 0 2px 1px rgba(0, 140, 186, 0.5); }
";

/// A rendered gallery page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryDocument(String);

impl GalleryDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for GalleryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render the gallery page for `manifest`.
///
/// `gallery_dir` is where the page will be written; links are made relative
/// to it.
pub fn build(manifest: &Manifest, title: &str, gallery_dir: &Path) -> GalleryDocument {
    let content = html! {
        h2 { (title) " Gallery" }
        p { "Click on the image to enlarge it." }
        div.thumbnails {
            @for (resized, thumbnail) in manifest.entries() {
                a target="_blank" href=(link(resized, gallery_dir)) {
                    img src=(link(thumbnail, gallery_dir)) alt=(alt_text(resized));
                }
            }
        }
    };
    let page = base_document(&format!("{title} Gallery"), CSS, content);
    GalleryDocument(page.into_string())
}

/// Write `doc` to `dir/filename`, replacing any existing file.
pub fn write(doc: &GalleryDocument, dir: &Path, filename: &str) -> Result<PathBuf, GenerateError> {
    let path = dir.join(filename);
    fs::write(&path, doc.as_str())?;
    Ok(path)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// URL for `path` as seen from a page in `base`.
///
/// Each segment is percent-encoded, so `party #1.jpg` links as
/// `party%20%231.jpg` instead of a fragment.
fn link(path: &Path, base: &Path) -> String {
    let (path, root) = match path.strip_prefix(base) {
        Ok(relative) => (relative, ""),
        Err(_) if path.has_root() => (path, "/"),
        Err(_) => (path, ""),
    };
    let segments: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => {
                Some(urlencoding::encode(&part.to_string_lossy()).into_owned())
            }
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();
    format!("{root}{}", segments.join("/"))
}

/// Source name recovered from an output path: `beach_resized.jpg` → `beach`.
fn alt_text(resized: &Path) -> String {
    let stem = resized
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.strip_suffix(Category::Resized.suffix()) {
        Some(name) => name.to_string(),
        None => stem,
    }
}
