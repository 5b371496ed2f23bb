//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the pipeline needs
//! from an image library: decode bytes, resize pixels, encode to a format.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the recording [`MockBackend`](tests::MockBackend) so the
//! batch processor can be exercised without real codecs.

use super::params::{ColorMode, OutputFormat};
use image::DynamicImage;
use thiserror::Error;

/// Why a byte stream could not be turned into a [`RasterImage`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// The bytes do not start with any known image signature.
    #[error("not an image")]
    NotAnImage,
    /// A known format whose decoding failed part-way.
    #[error("corrupt image: {0}")]
    Corrupt(String),
    /// A known format this build cannot decode.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
}

/// Decoding failed. Always recoverable: the caller skips the file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct DecodeError {
    pub reason: DecodeFailure,
}

impl From<DecodeFailure> for DecodeError {
    fn from(reason: DecodeFailure) -> Self {
        Self { reason }
    }
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{format} encoding failed: {message}")]
    Encode {
        format: OutputFormat,
        message: String,
    },
}

/// Width and height of a decoded image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A decoded image held in memory.
///
/// Owned by one file's processing step and dropped when that step finishes.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: DynamicImage,
}

impl RasterImage {
    pub fn new(pixels: DynamicImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width(),
            height: self.height(),
        }
    }

    pub fn color_mode(&self) -> ColorMode {
        if self.pixels.color().has_alpha() {
            ColorMode::Transparent
        } else {
            ColorMode::Opaque
        }
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }
}

impl From<DynamicImage> for RasterImage {
    fn from(pixels: DynamicImage) -> Self {
        Self::new(pixels)
    }
}

/// Trait for image processing backends.
///
/// Backends never touch the filesystem: reading source bytes and writing
/// encoded bytes is the caller's job, which keeps "not an image" separate
/// from I/O failures.
pub trait ImageBackend {
    /// Decode an encoded image, sniffing the format from its contents.
    fn decode(&self, bytes: &[u8]) -> Result<RasterImage, DecodeError>;

    /// Resample to exactly `width` x `height`. Does not modify `image`.
    fn resize(&self, image: &RasterImage, width: u32, height: u32) -> RasterImage;

    /// Encode into `format`.
    fn encode(&self, image: &RasterImage, format: OutputFormat) -> Result<Vec<u8>, BackendError>;
}
