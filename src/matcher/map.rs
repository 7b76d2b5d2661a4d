//! Similarity map with a sentinel border.
//!
//! One cell per valid template placement, stored inside a border of
//! `PAD`-wide zero cells. The border lets the 5x5 suppression window scan
//! run without bounds checks, and the zero value doubles as "below
//! threshold": gated placements are simply never written.

/// Border width matching the suppression window radius.
pub(crate) const PAD: usize = 2;

pub(crate) struct SimilarityMap {
    cells: Vec<u64>,
    width: usize,
    height: usize,
    padded_width: usize,
}

impl SimilarityMap {
    /// Creates a zeroed map for `width x height` placements.
    pub(crate) fn new(width: usize, height: usize) -> Self {
        let padded_width = width + 2 * PAD;
        let padded_height = height + 2 * PAD;
        Self {
            cells: vec![0u64; padded_width * padded_height],
            width,
            height,
            padded_width,
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn padded_width(&self) -> usize {
        self.padded_width
    }

    /// Interior cell accessor; `(x, y)` are placement coordinates.
    #[inline]
    pub(crate) fn get(&self, x: usize, y: usize) -> u64 {
        debug_assert!(x < self.width && y < self.height);
        self.cells[(y + PAD) * self.padded_width + (x + PAD)]
    }

    #[inline]
    pub(crate) fn set(&mut self, x: usize, y: usize, value: u64) {
        debug_assert!(x < self.width && y < self.height);
        self.cells[(y + PAD) * self.padded_width + (x + PAD)] = value;
    }

    /// Raw accessor over padded coordinates, used by the window scan.
    #[inline]
    pub(crate) fn get_padded(&self, px: usize, py: usize) -> u64 {
        self.cells[py * self.padded_width + px]
    }

    /// Mutable access to all padded cells, row-major.
    #[cfg(feature = "rayon")]
    pub(crate) fn cells_mut(&mut self) -> &mut [u64] {
        &mut self.cells
    }
}
