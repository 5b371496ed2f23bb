//! # thumb-gal
//!
//! Batch-resizes a folder of photos, makes a thumbnail of each, and writes a
//! static HTML page linking every thumbnail to its resized copy.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      photos/         →  [a.jpg, trips/c.JPG, ...]   (extension filter)
//! 2. Process   file list       →  <output>/<label>/*_resized.*, *_thumbnail.*
//! 3. Generate  Manifest        →  <output>/<label>/index.html
//! ```
//!
//! Each stage is a plain function with explicit inputs, so tests can run any
//! stage on its own. The [`Manifest`](types::Manifest) passed from stage 2 to
//! stage 3 is also written to `manifest.json` for inspection.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`extensions`] | Normalized, case-insensitive extension sets |
//! | [`scan`] | Recursive walk returning matching files in a stable order |
//! | [`imaging`] | Decode, scale, thumbnail, encode on top of the `image` crate |
//! | [`storage`] | Destination folders and format-aware image writing |
//! | [`naming`] | Stem/extension splitting and output file names |
//! | [`process`] | Batch loop: skip rules, progress events, the manifest |
//! | [`generate`] | The HTML gallery page, rendered with Maud |
//! | [`types`] | Types shared between stages (`Manifest`, `Category`) |
//! | [`config`] | Optional `config.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Skip-If-Exists for Images, Always-Write for HTML
//!
//! An output image that is already on disk is kept and recorded as if it had
//! just been written. Re-running over a large folder only encodes what is
//! missing. The gallery page is cheap and reflects the current manifest, so it
//! is rewritten every time.
//!
//! ## Format Substitution
//!
//! Outputs keep the source extension (`c.JPG` → `c_resized.JPG`) unless the
//! format cannot hold the image: a transparent image bound for JPEG is
//! written as PNG instead. See [`storage::resolve_target`].
//!
//! ## Sniffed Formats
//!
//! Decoding looks at the file's bytes, not its name. A text file called
//! `notes.jpg` is reported as "not an image" and skipped; a PNG called
//! `photo.jpg` decodes fine.

pub mod config;
pub mod extensions;
pub mod generate;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;
pub mod storage;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
