//! Convenience helpers for loading pixel buffers via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. The `image` crate stores
//! color channels in R,G,B order; these helpers swap into the packed B,G,R
//! order the buffer types use.

use crate::buffer::{PixelBuffer, PixelFormat, PixelView};
use crate::util::{ExMatchError, ExMatchResult};
use std::path::Path;

/// Creates a borrowed `Gray8` view over a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> ExMatchResult<PixelView<'_>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelView::from_slice(img.as_raw(), width, height, PixelFormat::Gray8)
}

/// Creates an owned `Gray8` buffer from a grayscale image buffer.
pub fn buffer_from_gray_image(img: &image::GrayImage) -> ExMatchResult<PixelBuffer> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelBuffer::from_vec(img.as_raw().clone(), width, height, PixelFormat::Gray8)
}

/// Creates an owned `Rgb24` buffer from an RGB image buffer.
pub fn buffer_from_rgb_image(img: &image::RgbImage) -> ExMatchResult<PixelBuffer> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let mut data = Vec::with_capacity(width * height * 3);
    for px in img.pixels() {
        data.extend_from_slice(&[px.0[2], px.0[1], px.0[0]]);
    }
    PixelBuffer::from_vec(data, width, height, PixelFormat::Rgb24)
}

/// Creates an owned `Rgb24` buffer from a dynamic image.
pub fn buffer_from_dynamic_image(img: &image::DynamicImage) -> ExMatchResult<PixelBuffer> {
    buffer_from_rgb_image(&img.to_rgb8())
}

/// Loads an image from disk into an owned `Rgb24` buffer.
pub fn load_image<P: AsRef<Path>>(path: P) -> ExMatchResult<PixelBuffer> {
    let img = image::open(path).map_err(|err| ExMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    buffer_from_dynamic_image(&img)
}
