//! Pure Rust image backend on top of the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Sniff format | `image::guess_format` (magic bytes, not the file name) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::load_from_memory_with_format` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (quality-controlled) |
//! | Encode → PNG / TIFF / WebP | `DynamicImage::write_to` (lossless) |
//!
//! Encoders only accept a handful of pixel layouts, so everything is brought
//! down to 8-bit RGB or RGBA before encoding.

use super::backend::{BackendError, DecodeError, DecodeFailure, ImageBackend, RasterImage};
use super::params::{OutputFormat, Quality};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError};
use std::io::Cursor;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend {
    quality: Quality,
}

impl RustBackend {
    pub fn new() -> Self {
        Self::with_quality(Quality::default())
    }

    /// Backend whose lossy encoders use `quality`.
    pub fn with_quality(quality: Quality) -> Self {
        Self { quality }
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(e) => DecodeFailure::UnsupportedFormat(e.to_string()).into(),
        other => DecodeFailure::Corrupt(other.to_string()).into(),
    }
}

/// Reduce to 8-bit RGB/RGBA, the layouts every encoder here accepts.
fn to_8bit(img: &DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img.clone(),
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, bytes: &[u8]) -> Result<RasterImage, DecodeError> {
        let format = image::guess_format(bytes).map_err(|_| DecodeFailure::NotAnImage)?;
        if !format.reading_enabled() {
            return Err(DecodeFailure::UnsupportedFormat(format!("{format:?}")).into());
        }
        image::load_from_memory_with_format(bytes, format)
            .map(RasterImage::new)
            .map_err(classify)
    }

    fn resize(&self, image: &RasterImage, width: u32, height: u32) -> RasterImage {
        RasterImage::new(
            image
                .pixels()
                .resize_exact(width, height, FilterType::Lanczos3),
        )
    }

    fn encode(&self, image: &RasterImage, format: OutputFormat) -> Result<Vec<u8>, BackendError> {
        let encode_err = |e: ImageError| BackendError::Encode {
            format,
            message: e.to_string(),
        };

        let mut buf = Cursor::new(Vec::new());
        match format {
            OutputFormat::Jpeg => {
                // JPEG has no alpha: flatten whatever we were given
                let rgb = DynamicImage::ImageRgb8(image.pixels().to_rgb8());
                let encoder = JpegEncoder::new_with_quality(&mut buf, self.quality.value() as u8);
                rgb.write_with_encoder(encoder).map_err(encode_err)?;
            }
            other => {
                to_8bit(image.pixels())
                    .write_to(&mut buf, other.image_format())
                    .map_err(encode_err)?;
            }
        }
        Ok(buf.into_inner())
    }
}
