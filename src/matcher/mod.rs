//! Exhaustive template matching.
//!
//! The matcher slides a template over a clipped search region of the source,
//! accumulates an integer sum of absolute channel differences per placement,
//! gates placements on a similarity threshold, suppresses non-maxima in a
//! 5x5 window and returns the survivors ranked by similarity. It is a pure
//! function of its arguments and holds no state, so concurrent calls on
//! independent (or shared read-only) buffers are safe by construction.

use std::cmp::Ordering;

use crate::buffer::PixelView;
use crate::geom::Rect;
use crate::matcher::map::SimilarityMap;
use crate::matcher::nms::extract_local_maxima;
use crate::trace::{trace_event, trace_span};
use crate::util::{ExMatchError, ExMatchResult};

pub(crate) mod map;
pub(crate) mod nms;
pub(crate) mod sad;

#[cfg(feature = "rayon")]
pub(crate) mod parallel;

/// One template placement accepted by the matcher.
///
/// `rect` has the template's extent; `similarity` is the fraction of the
/// theoretical worst-case difference not spent, in `[0, 1]` with `1.0`
/// meaning a byte-exact match on every compared channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchRecord {
    pub rect: Rect,
    pub similarity: f32,
}

fn record_cmp_desc(a: &MatchRecord, b: &MatchRecord) -> Ordering {
    b.similarity
        .total_cmp(&a.similarity)
        .then_with(|| a.rect.y.cmp(&b.rect.y))
        .then_with(|| a.rect.x.cmp(&b.rect.x))
}

/// Searches `region` of `source` for placements of `template` with
/// similarity at or above `threshold`.
///
/// `source` and `template` must share a pixel format; alpha and pad bytes of
/// the 32-bit formats do not participate in the difference sum. The region
/// is clipped to the source bounds first. Records come back sorted by
/// similarity descending, ties broken by top-left `(y, x)` ascending. An
/// empty result is not an error.
pub fn find_matches(
    source: PixelView<'_>,
    template: PixelView<'_>,
    region: Rect,
    threshold: f32,
) -> ExMatchResult<Vec<MatchRecord>> {
    if source.format() != template.format() {
        return Err(ExMatchError::UnsupportedFormat {
            reason: "source and template pixel formats differ",
        });
    }

    let clipped = region
        .clip_to(source.width(), source.height())
        .ok_or(ExMatchError::InvalidDimensions {
            width: 0,
            height: 0,
        })?;
    if template.width() > clipped.width || template.height() > clipped.height {
        return Err(ExMatchError::InvalidDimensions {
            width: template.width(),
            height: template.height(),
        });
    }

    let map_width = clipped.width - template.width() + 1;
    let map_height = clipped.height - template.height() + 1;
    let _span = trace_span!(
        "exhaustive_match",
        map_width = map_width,
        map_height = map_height
    )
    .entered();

    let channels = source.format().channels_compared();
    let max_diff = (template.width() * template.height() * channels) as u64 * 255;
    let threshold_int = (f64::from(threshold.clamp(0.0, 1.0)) * max_diff as f64).floor() as u64;

    let mut map = SimilarityMap::new(map_width, map_height);
    #[cfg(feature = "rayon")]
    parallel::fill_similarity_map_par(
        &source,
        &template,
        clipped,
        max_diff,
        threshold_int,
        &mut map,
    );
    #[cfg(not(feature = "rayon"))]
    sad::fill_similarity_map(
        &source,
        &template,
        clipped,
        max_diff,
        threshold_int,
        &mut map,
    );

    let mut out: Vec<MatchRecord> = extract_local_maxima(&map)
        .into_iter()
        .map(|(x, y, value)| MatchRecord {
            rect: Rect::new(
                (clipped.x + x) as i32,
                (clipped.y + y) as i32,
                template.width() as i32,
                template.height() as i32,
            ),
            similarity: (value as f64 / max_diff as f64) as f32,
        })
        .collect();
    out.sort_by(record_cmp_desc);

    trace_event!("matches", count = out.len());
    Ok(out)
}

/// Computes the similarity of the single placement with top-left `(x, y)`,
/// in source coordinates, without building a map.
pub fn similarity_at(
    source: PixelView<'_>,
    template: PixelView<'_>,
    x: usize,
    y: usize,
) -> ExMatchResult<f32> {
    if source.format() != template.format() {
        return Err(ExMatchError::UnsupportedFormat {
            reason: "source and template pixel formats differ",
        });
    }
    if x + template.width() > source.width() || y + template.height() > source.height() {
        return Err(ExMatchError::OutOfBounds {
            x,
            y,
            width: source.width(),
            height: source.height(),
        });
    }
    let channels = source.format().channels_compared();
    let max_diff = (template.width() * template.height() * channels) as u64 * 255;
    let diff = sad::sad_at(&source, &template, x, y);
    Ok(((max_diff - diff) as f64 / max_diff as f64) as f32)
}

/// Immutable convenience wrapper holding a similarity threshold.
///
/// Construct once, share freely; the threshold is never mutated, so a single
/// `Matcher` may serve concurrent callers.
#[derive(Clone, Copy, Debug)]
pub struct Matcher {
    threshold: f32,
}

impl Matcher {
    /// Creates a matcher with a fixed similarity threshold.
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Returns the configured threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Runs [`find_matches`] over an explicit region.
    pub fn run(
        &self,
        source: PixelView<'_>,
        template: PixelView<'_>,
        region: Rect,
    ) -> ExMatchResult<Vec<MatchRecord>> {
        find_matches(source, template, region, self.threshold)
    }

    /// Runs [`find_matches`] over the whole source.
    pub fn run_full(
        &self,
        source: PixelView<'_>,
        template: PixelView<'_>,
    ) -> ExMatchResult<Vec<MatchRecord>> {
        let region = Rect::full(source.width(), source.height());
        find_matches(source, template, region, self.threshold)
    }
}
