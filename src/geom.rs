//! Rectangle geometry for search regions and match placements.

/// Axis-aligned rectangle in pixel coordinates.
///
/// Coordinates are signed so a search region may start off-buffer and be
/// clipped; rectangles produced by the matcher always have non-negative
/// origin and positive extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge (column of the top-left corner).
    pub x: i32,
    /// Top edge (row of the top-left corner).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and extent.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle covering a full `width x height` buffer.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            x: 0,
            y: 0,
            width: width as i32,
            height: height as i32,
        }
    }

    /// Clips the rectangle to a `width x height` buffer.
    ///
    /// Returns `None` when the intersection is empty. The clipped rectangle
    /// satisfies `0 <= x`, `0 <= y`, `x + width <= buffer width` and
    /// `y + height <= buffer height`.
    pub fn clip_to(self, width: usize, height: usize) -> Option<ClippedRect> {
        let x0 = i64::from(self.x).max(0);
        let y0 = i64::from(self.y).max(0);
        let x1 = (i64::from(self.x) + i64::from(self.width)).min(width as i64);
        let y1 = (i64::from(self.y) + i64::from(self.height)).min(height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(ClippedRect {
            x: x0 as usize,
            y: y0 as usize,
            width: (x1 - x0) as usize,
            height: (y1 - y0) as usize,
        })
    }
}

/// A rectangle already clipped to buffer bounds, in unsigned coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClippedRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}
