//! Scalar sum-of-absolute-differences kernel.
//!
//! All per-pixel accumulation is integer arithmetic; only the final
//! similarity ratio ever touches floating point, so results are exactly
//! reproducible regardless of rounding mode.

use crate::buffer::{PixelFormat, PixelView};
use crate::geom::ClippedRect;
use crate::matcher::map::SimilarityMap;

/// Absolute difference over one packed row span.
///
/// For color formats the fourth byte of each pixel (alpha or pad) is
/// excluded from the sum.
#[inline]
fn row_diff(src: &[u8], tpl: &[u8], format: PixelFormat) -> u64 {
    match format {
        PixelFormat::Gray8 | PixelFormat::Rgb24 => src
            .iter()
            .zip(tpl)
            .map(|(s, t)| u64::from(s.abs_diff(*t)))
            .sum(),
        PixelFormat::Rgb32 | PixelFormat::Argb32 => src
            .chunks_exact(4)
            .zip(tpl.chunks_exact(4))
            .map(|(s, t)| {
                u64::from(s[0].abs_diff(t[0]))
                    + u64::from(s[1].abs_diff(t[1]))
                    + u64::from(s[2].abs_diff(t[2]))
            })
            .sum(),
    }
}

/// Computes the full difference sum for the placement with top-left `(sx, sy)`
/// in source coordinates.
pub(crate) fn sad_at(source: &PixelView<'_>, template: &PixelView<'_>, sx: usize, sy: usize) -> u64 {
    sad_bounded(source, template, sx, sy, u64::MAX)
}

/// Like [`sad_at`] but abandons the placement once the running sum exceeds
/// `budget`; the returned value is then only guaranteed to be `> budget`.
pub(crate) fn sad_bounded(
    source: &PixelView<'_>,
    template: &PixelView<'_>,
    sx: usize,
    sy: usize,
    budget: u64,
) -> u64 {
    let format = source.format();
    let bpp = format.bytes_per_pixel();
    let tpl_row_len = template.width() * bpp;
    let x0 = sx * bpp;

    let mut diff = 0u64;
    for ty in 0..template.height() {
        let src_row = source
            .row_bytes(sy + ty)
            .expect("placement row within source bounds");
        let tpl_row = template.row_bytes(ty).expect("template row within bounds");
        diff += row_diff(&src_row[x0..x0 + tpl_row_len], tpl_row, format);
        if diff > budget {
            break;
        }
    }
    diff
}

/// Fills the similarity map for every placement inside `region`.
///
/// Placements whose integer similarity falls below `threshold_int` are left
/// at the sentinel value zero.
#[cfg_attr(feature = "rayon", allow(dead_code))]
pub(crate) fn fill_similarity_map(
    source: &PixelView<'_>,
    template: &PixelView<'_>,
    region: ClippedRect,
    max_diff: u64,
    threshold_int: u64,
    map: &mut SimilarityMap,
) {
    let budget = max_diff - threshold_int;
    for y in 0..map.height() {
        for x in 0..map.width() {
            let diff = sad_bounded(source, template, region.x + x, region.y + y, budget);
            if diff <= budget {
                map.set(x, y, max_diff - diff);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{row_diff, sad_at};
    use crate::buffer::{PixelFormat, PixelView};

    #[test]
    fn row_diff_skips_fourth_byte_for_32bit() {
        let src = [10u8, 20, 30, 255, 0, 0, 0, 0];
        let tpl = [13u8, 16, 30, 0, 0, 0, 0, 128];
        assert_eq!(row_diff(&src, &tpl, PixelFormat::Argb32), 3 + 4);
        assert_eq!(row_diff(&src, &tpl, PixelFormat::Rgb32), 3 + 4);
    }

    #[test]
    fn sad_at_sums_over_all_template_rows() {
        let src_data = [0u8, 0, 0, 0, 10, 20, 0, 0, 30, 40, 0, 0];
        let tpl_data = [11u8, 22, 33, 44];
        let source = PixelView::new(&src_data, 3, 3, 4, PixelFormat::Gray8).unwrap();
        let template = PixelView::from_slice(&tpl_data, 2, 2, PixelFormat::Gray8).unwrap();
        assert_eq!(sad_at(&source, &template, 0, 1), 1 + 2 + 3 + 4);
    }
}
