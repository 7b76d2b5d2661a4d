//! With the `rayon` feature enabled `find_matches` fills the similarity map
//! row-parallel; the metric is integer, so results must be bit-identical to
//! an independently computed scalar reference.

#![cfg(feature = "rayon")]

use exmatch::{find_matches, MatchRecord, PixelFormat, PixelView, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn reference_matches(
    data: &[u8],
    img_width: usize,
    img_height: usize,
    tpl: &[u8],
    tpl_width: usize,
    tpl_height: usize,
    threshold: f32,
) -> Vec<MatchRecord> {
    let map_width = img_width - tpl_width + 1;
    let map_height = img_height - tpl_height + 1;
    let max_diff = (tpl_width * tpl_height * 255) as u64;
    let threshold_int = (f64::from(threshold) * max_diff as f64).floor() as u64;

    let mut map = vec![0u64; map_width * map_height];
    for y in 0..map_height {
        for x in 0..map_width {
            let mut diff = 0u64;
            for ty in 0..tpl_height {
                for tx in 0..tpl_width {
                    let s = data[(y + ty) * img_width + (x + tx)];
                    let t = tpl[ty * tpl_width + tx];
                    diff += u64::from(s.abs_diff(t));
                }
            }
            let sim = max_diff - diff;
            if sim >= threshold_int && sim > 0 {
                map[y * map_width + x] = sim;
            }
        }
    }

    let mut out = Vec::new();
    for y in 0..map_height {
        for x in 0..map_width {
            let value = map[y * map_width + x];
            if value == 0 {
                continue;
            }
            let mut suppressed = false;
            for dy in -2i64..=2 {
                for dx in -2i64..=2 {
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx < 0 || ny < 0 || nx >= map_width as i64 || ny >= map_height as i64 {
                        continue;
                    }
                    if map[ny as usize * map_width + nx as usize] > value {
                        suppressed = true;
                    }
                }
            }
            if !suppressed {
                out.push(MatchRecord {
                    rect: Rect::new(x as i32, y as i32, tpl_width as i32, tpl_height as i32),
                    similarity: (value as f64 / max_diff as f64) as f32,
                });
            }
        }
    }
    out.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.rect.y.cmp(&b.rect.y))
            .then_with(|| a.rect.x.cmp(&b.rect.x))
    });
    out
}

#[test]
fn parallel_fill_matches_scalar_reference() {
    let img_width = 48;
    let img_height = 36;
    let tpl_width = 7;
    let tpl_height = 6;
    let mut rng = StdRng::seed_from_u64(1234);
    let data: Vec<u8> = (0..img_width * img_height).map(|_| rng.random()).collect();

    for (x0, y0, threshold) in [(5usize, 4usize, 0.5f32), (30, 20, 0.75), (0, 0, 0.9)] {
        let mut tpl = Vec::with_capacity(tpl_width * tpl_height);
        for y in 0..tpl_height {
            for x in 0..tpl_width {
                tpl.push(data[(y0 + y) * img_width + (x0 + x)]);
            }
        }

        let source =
            PixelView::from_slice(&data, img_width, img_height, PixelFormat::Gray8).unwrap();
        let template =
            PixelView::from_slice(&tpl, tpl_width, tpl_height, PixelFormat::Gray8).unwrap();

        let got = find_matches(
            source,
            template,
            Rect::full(img_width, img_height),
            threshold,
        )
        .unwrap();
        let expected = reference_matches(
            &data, img_width, img_height, &tpl, tpl_width, tpl_height, threshold,
        );
        assert_eq!(got, expected, "template at ({x0}, {y0})");
    }
}
