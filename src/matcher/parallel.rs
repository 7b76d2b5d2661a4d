//! Row-parallel similarity map fill (rayon).
//!
//! Each map row is an independent unit of work and the metric is integer,
//! so the parallel fill produces bit-identical cells to the scalar path.

use rayon::prelude::*;

use crate::buffer::PixelView;
use crate::geom::ClippedRect;
use crate::matcher::map::{SimilarityMap, PAD};
use crate::matcher::sad::sad_bounded;

/// Parallel equivalent of [`crate::matcher::sad::fill_similarity_map`].
pub(crate) fn fill_similarity_map_par(
    source: &PixelView<'_>,
    template: &PixelView<'_>,
    region: ClippedRect,
    max_diff: u64,
    threshold_int: u64,
    map: &mut SimilarityMap,
) {
    let budget = max_diff - threshold_int;
    let map_width = map.width();
    let map_height = map.height();
    let padded_width = map.padded_width();

    map.cells_mut()
        .par_chunks_mut(padded_width)
        .skip(PAD)
        .take(map_height)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..map_width {
                let diff = sad_bounded(source, template, region.x + x, region.y + y, budget);
                if diff <= budget {
                    row[PAD + x] = max_diff - diff;
                }
            }
        });
}
