//! Whole-image similarity convenience entry.
//!
//! Available when the `image-io` feature is enabled. Decodes two images,
//! clamps the larger one to a bounded dimension so runtime stays predictable,
//! resizes the second to the first's geometry and scores the single resulting
//! placement.

use std::path::Path;

use image::imageops::FilterType;

use crate::buffer::io::buffer_from_dynamic_image;
use crate::geom::Rect;
use crate::matcher::find_matches;
use crate::util::{ExMatchError, ExMatchResult};

/// Largest dimension fed into the matcher; bigger inputs are scaled down.
const MAX_DIMENSION: u32 = 2000;

/// Scores how similar two decoded images are, in `[0, 1]`.
pub fn similarity(a: &image::DynamicImage, b: &image::DynamicImage) -> ExMatchResult<f32> {
    let bounded = a.thumbnail(MAX_DIMENSION, MAX_DIMENSION);
    let resized = b.resize_exact(bounded.width(), bounded.height(), FilterType::Triangle);

    let source = buffer_from_dynamic_image(&bounded)?;
    let template = buffer_from_dynamic_image(&resized)?;

    let region = Rect::full(source.width(), source.height());
    let matches = find_matches(source.view(), template.view(), region, 0.0)?;
    // The template fills the region, so at most one placement exists; an
    // empty result means the worst-case difference was reached.
    Ok(matches.first().map_or(0.0, |m| m.similarity))
}

/// Loads two image files and scores their similarity.
pub fn compare_images<P: AsRef<Path>, Q: AsRef<Path>>(a: P, b: Q) -> ExMatchResult<f32> {
    let img_a = image::open(a).map_err(|err| ExMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    let img_b = image::open(b).map_err(|err| ExMatchError::ImageIo {
        reason: err.to_string(),
    })?;
    similarity(&img_a, &img_b)
}
