//! Image processing in pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::guess_format` + `load_from_memory_with_format` |
//! | **Scale by percent** | `resize_exact` + Lanczos3 |
//! | **Thumbnail** | fit-within box, `resize_exact` + Lanczos3 |
//! | **Encode** | JPEG (quality), PNG / TIFF / WebP (lossless) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Quality, color mode, output formats
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
pub mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{
    BackendError, DecodeError, DecodeFailure, Dimensions, ImageBackend, RasterImage,
};
pub use operations::{scale_by_percent, thumbnail};
pub use params::{ColorMode, OutputFormat, Quality};
pub use rust_backend::RustBackend;
