//! High-level image operations.
//!
//! These functions combine calculations with backend execution: compute the
//! target dimensions, then ask the backend to resample.

use super::backend::{ImageBackend, RasterImage};
use super::calculations::{fit_within, percent_dimensions};

/// Copy of `image` scaled by `percent` on both axes (Lanczos3 in the Rust
/// backend). The input is left untouched.
pub fn scale_by_percent(backend: &impl ImageBackend, image: &RasterImage, percent: u32) -> RasterImage {
    let (width, height) = percent_dimensions((image.width(), image.height()), percent);
    backend.resize(image, width, height)
}

/// Copy of `image` that fits inside `max_edge` x `max_edge`.
///
/// Aspect ratio is preserved and small images are never enlarged: an image
/// that already fits comes back as an unscaled copy.
pub fn thumbnail(backend: &impl ImageBackend, image: &RasterImage, max_edge: u32) -> RasterImage {
    let original = (image.width(), image.height());
    let (width, height) = fit_within(original, max_edge);
    if (width, height) == original {
        return image.clone();
    }
    backend.resize(image, width, height)
}
