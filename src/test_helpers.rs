//! Shared test utilities for the thumb-gal test suite.
//!
//! Synthetic images are generated in memory so no binary fixtures need to be
//! checked in.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_test_image(&tmp.path().join("a.jpg"), 800, 600);
//! write_test_text(&tmp.path().join("b.txt"));
//! ```

use crate::imaging::{OutputFormat, RasterImage};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

// =========================================================================
// In-memory images
// =========================================================================

/// Opaque RGB gradient. Non-uniform pixels keep lossy encoders honest.
pub fn gradient_rgb(width: u32, height: u32) -> RasterImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    RasterImage::new(DynamicImage::ImageRgb8(img))
}

/// RGBA gradient with varying alpha.
pub fn gradient_rgba(width: u32, height: u32) -> RasterImage {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, ((x * 7 + y) % 256) as u8])
    });
    RasterImage::new(DynamicImage::ImageRgba8(img))
}

/// Encode with the `image` crate directly, independent of any backend.
pub fn encode_test_image(image: &RasterImage, format: OutputFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    let pixels = match format {
        OutputFormat::Jpeg => DynamicImage::ImageRgb8(image.pixels().to_rgb8()),
        _ => image.pixels().clone(),
    };
    pixels.write_to(&mut buf, format.image_format()).unwrap();
    buf.into_inner()
}

// =========================================================================
// Files on disk
// =========================================================================

/// Write an opaque gradient to `path`, encoded per its extension.
pub fn write_test_image(path: &Path, width: u32, height: u32) {
    write_raster(path, &gradient_rgb(width, height));
}

/// Write an RGBA gradient to `path`, encoded per its extension.
pub fn write_test_image_rgba(path: &Path, width: u32, height: u32) {
    write_raster(path, &gradient_rgba(width, height));
}

fn write_raster(path: &Path, image: &RasterImage) {
    let format = ImageFormat::from_path(path)
        .ok()
        .and_then(|f| OutputFormat::ALL.into_iter().find(|o| o.image_format() == f))
        .unwrap_or_else(|| panic!("no test encoder for {}", path.display()));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, encode_test_image(image, format)).unwrap();
}

/// A plain text file, which no decoder accepts.
pub fn write_test_text(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, "shopping list: film, batteries\n").unwrap();
}

/// `(width, height)` of an image file on disk.
pub fn dimensions_of(path: &Path) -> (u32, u32) {
    image::image_dimensions(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}
