//! Centralized file name handling.
//!
//! Both the extension matcher and the output naming scheme need to split a
//! file name into stem and extension the same way: on the **last** dot, with
//! a leading dot (`.bashrc`) or trailing dot (`notes.`) not counting as an
//! extension separator.
//!
//! ## Output Names
//!
//! Each processed source yields two outputs next to each other in the
//! destination folder. The category suffix goes between stem and extension,
//! and the extension is kept exactly as written:
//!
//! - `a.jpg` → `a_resized.jpg`, `a_thumbnail.jpg`
//! - `c.JPG` → `c_resized.JPG`, `c_thumbnail.JPG`
//! - `scan.v2.tif` → `scan.v2_resized.tif`
//! - `README` → `README_resized`

use crate::types::Category;
use std::path::{Path, PathBuf};

/// Split a file name into `(stem, extension)`; the extension excludes the dot.
pub fn split_extension(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < file_name.len() => {
            (&file_name[..dot], Some(&file_name[dot + 1..]))
        }
        _ => (file_name, None),
    }
}

/// File name of the `category` output for `source`.
pub fn output_filename(source: &Path, category: Category) -> String {
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (stem, ext) = split_extension(&file_name);
    match ext {
        Some(ext) => format!("{stem}{}.{ext}", category.suffix()),
        None => format!("{stem}{}", category.suffix()),
    }
}

/// Full destination path of the `category` output for `source`.
pub fn output_path(destination: &Path, source: &Path, category: Category) -> PathBuf {
    destination.join(output_filename(source, category))
}
