//! Error types for exmatch.

use thiserror::Error;

/// Result alias for exmatch operations.
pub type ExMatchResult<T> = std::result::Result<T, ExMatchError>;

/// Errors that can occur when building pixel buffers or running a match.
///
/// Every failure is a validation failure detected before any pixel work
/// starts; there are no partial results and no transient failure modes.
#[derive(Debug, Error, PartialEq)]
pub enum ExMatchError {
    /// A buffer, template or search area has a non-positive dimension, or a
    /// template does not fit inside the clipped search area.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// The stride is too small to hold a row of `width` pixels.
    #[error("stride {stride} smaller than row of {width} pixels ({bytes_per_pixel} bytes each)")]
    InvalidStride {
        width: usize,
        stride: usize,
        bytes_per_pixel: usize,
    },

    /// The backing byte slice is shorter than the geometry requires.
    #[error("buffer too small: needed {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },

    /// A pixel coordinate lies outside the buffer extents.
    #[error("pixel ({x}, {y}) outside {width}x{height} buffer")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A pixel format the matcher cannot compare, or a source/template
    /// format mismatch.
    #[error("unsupported pixel format: {reason}")]
    UnsupportedFormat { reason: &'static str },

    /// Decoding or encoding through the `image` crate failed.
    #[cfg(feature = "image-io")]
    #[error("image i/o failed: {reason}")]
    ImageIo { reason: String },
}
