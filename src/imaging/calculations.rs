//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//! Arithmetic is done in `u64` so large images times large percentages
//! cannot overflow.

/// Scale both dimensions by `percent`, rounding down.
///
/// `floor(w * percent / 100) x floor(h * percent / 100)`, never below 1 pixel
/// so the result can still be encoded.
///
/// # Examples
/// ```
/// # use thumb_gal::imaging::calculations::percent_dimensions;
/// assert_eq!(percent_dimensions((800, 600), 75), (600, 450));
/// assert_eq!(percent_dimensions((101, 33), 50), (50, 16));
/// ```
pub fn percent_dimensions(original: (u32, u32), percent: u32) -> (u32, u32) {
    let (w, h) = original;
    (scale(w, percent, 100), scale(h, percent, 100))
}

/// Dimensions that fit inside a `max_edge` x `max_edge` box, preserving
/// aspect ratio.
///
/// Images that already fit are returned unchanged (never upscaled). Otherwise
/// the longer edge becomes `max_edge` and the shorter edge is scaled
/// proportionally, rounded to nearest, at least 1.
///
/// # Examples
/// ```
/// # use thumb_gal::imaging::calculations::fit_within;
/// assert_eq!(fit_within((800, 600), 128), (128, 96));
/// assert_eq!(fit_within((100, 50), 128), (100, 50));
/// ```
pub fn fit_within(original: (u32, u32), max_edge: u32) -> (u32, u32) {
    let (w, h) = original;
    if w <= max_edge && h <= max_edge {
        return (w, h);
    }

    if w >= h {
        // Landscape or square: width is the long edge
        (max_edge, scale_rounded(h, max_edge, w))
    } else {
        // Portrait
        (scale_rounded(w, max_edge, h), max_edge)
    }
}

fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = value as u64 * numerator as u64 / denominator as u64;
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

fn scale_rounded(value: u32, numerator: u32, denominator: u32) -> u32 {
    let d = denominator as u64;
    let scaled = (value as u64 * numerator as u64 + d / 2) / d;
    u32::try_from(scaled).unwrap_or(u32::MAX).clamp(1, numerator.max(1))
}
