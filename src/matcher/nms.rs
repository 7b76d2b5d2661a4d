//! Local-maxima extraction over the similarity map.

use crate::matcher::map::{SimilarityMap, PAD};

/// Returns every nonzero cell that has no strictly greater cell in the 5x5
/// window centered on it, as `(x, y, value)` placement tuples.
///
/// The comparison is strict, so plateaus of equal-valued cells all survive;
/// a flat region therefore reports one match per placement rather than a
/// single deduplicated one.
pub(crate) fn extract_local_maxima(map: &SimilarityMap) -> Vec<(usize, usize, u64)> {
    let mut kept = Vec::new();
    for y in 0..map.height() {
        for x in 0..map.width() {
            let value = map.get(x, y);
            if value == 0 {
                continue;
            }
            // Center sits at padded (x + PAD, y + PAD); the window spans the
            // sentinel border without any bounds checks.
            let mut suppressed = false;
            'window: for py in y..y + 2 * PAD + 1 {
                for px in x..x + 2 * PAD + 1 {
                    if map.get_padded(px, py) > value {
                        suppressed = true;
                        break 'window;
                    }
                }
            }
            if !suppressed {
                kept.push((x, y, value));
            }
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::extract_local_maxima;
    use crate::matcher::map::SimilarityMap;

    #[test]
    fn strictly_greater_neighbor_suppresses() {
        let mut map = SimilarityMap::new(5, 5);
        map.set(2, 2, 100);
        map.set(3, 3, 90);
        map.set(0, 0, 80);
        let kept = extract_local_maxima(&map);
        // (3,3) and (0,0) both sit within the 5x5 window of (2,2).
        assert_eq!(kept, vec![(2, 2, 100)]);
    }

    #[test]
    fn equal_plateau_is_not_suppressed() {
        let mut map = SimilarityMap::new(4, 1);
        for x in 0..4 {
            map.set(x, 0, 55);
        }
        let kept = extract_local_maxima(&map);
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn distant_peaks_both_survive() {
        let mut map = SimilarityMap::new(8, 1);
        map.set(0, 0, 70);
        map.set(7, 0, 90);
        let kept = extract_local_maxima(&map);
        assert_eq!(kept, vec![(0, 0, 70), (7, 0, 90)]);
    }
}
