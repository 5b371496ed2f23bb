//! Parameter types for image operations.
//!
//! These types describe *what* to produce, not *how*. They sit between the
//! high-level [`operations`](super::operations) / [`storage`](crate::storage)
//! code and the [`backend`](super::backend) that does the pixel work.
//!
//! ## Types
//!
//! - [`Quality`]: lossy encoding quality (1-100, default 90), clamped on construction
//! - [`ColorMode`]: whether an image carries transparency
//! - [`OutputFormat`]: encodable formats, derived from a file extension

use std::fmt;
use std::path::Path;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Color mode of a decoded image.
///
/// Palette images are expanded by the decoders, so "indexed with a
/// transparent entry" shows up here as [`ColorMode::Transparent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// RGB or grayscale without alpha. Safe for every output format.
    Opaque,
    /// Has an alpha channel. Needs a format that can store it.
    Transparent,
}

/// Formats the writer knows how to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Tiff,
    WebP,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [Self::Jpeg, Self::Png, Self::Tiff, Self::WebP];

    /// Map a file extension (with or without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "tif" | "tiff" => Some(Self::Tiff),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Format implied by the extension of `path`, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Tiff => "tif",
            Self::WebP => "webp",
        }
    }

    /// Whether an image in `mode` can be stored in this format as-is.
    ///
    /// JPEG has no alpha channel; everything else here does.
    pub fn supports(self, mode: ColorMode) -> bool {
        match (self, mode) {
            (Self::Jpeg, ColorMode::Transparent) => false,
            _ => true,
        }
    }

    pub(crate) fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::Tiff => image::ImageFormat::Tiff,
            Self::WebP => image::ImageFormat::WebP,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Tiff => "TIFF",
            Self::WebP => "WebP",
        };
        f.write_str(name)
    }
}
