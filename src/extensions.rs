//! File-extension matching.
//!
//! Users type extensions however they like: `jpg`, `.JPG`, ` .Tiff `. An
//! [`ExtensionSet`] normalizes all of those to one canonical form (lowercase,
//! leading dot) so the scanner can test file names with a single set lookup.
//!
//! ```text
//! ["jpg", ".JPG", ".tiff", ".TIF", "png"]  →  {.jpg, .png, .tif, .tiff}
//! ```
//!
//! The extension of a file is everything after the **last** dot of its file
//! name, so `archive.tar.gz` has extension `.gz`.

use crate::naming::split_extension;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// A normalized set of file extensions.
///
/// Every entry is lowercase and starts with `.`. Stored ordered so that
/// display and iteration are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    entries: BTreeSet<String>,
}

impl ExtensionSet {
    /// Build a set from user-supplied extension strings.
    ///
    /// Trims, lower-cases and prefixes a `.` where missing. Blank entries are
    /// dropped. Never fails; empty input yields an empty set, which matches
    /// nothing.
    pub fn normalize<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = extensions
            .into_iter()
            .filter_map(|ext| normalize_one(ext.as_ref()))
            .collect();
        Self { entries }
    }

    /// Whether the file name of `path` carries one of the extensions in the set.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy())
            .and_then(|name| extension_of(&name))
            .is_some_and(|ext| self.entries.contains(&ext))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.iter().collect::<Vec<_>>().join(", ");
        write!(f, "{joined}")
    }
}

fn normalize_one(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with('.') {
        Some(lower)
    } else {
        Some(format!(".{lower}"))
    }
}

/// Lowercase extension of a file name, dot included.
fn extension_of(file_name: &str) -> Option<String> {
    let (_, ext) = split_extension(file_name);
    ext.map(|e| format!(".{}", e.to_lowercase()))
}
