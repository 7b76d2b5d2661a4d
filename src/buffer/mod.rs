//! Owned and borrowed pixel buffers.
//!
//! `PixelView` is a borrowed 2D view over packed pixel bytes with an explicit
//! stride in bytes, so a stride larger than `width * bytes_per_pixel`
//! represents alignment-padded rows. `PixelBuffer` owns its bytes and frees
//! them on drop; wrapping externally owned memory goes through `PixelView`,
//! whose lifetime ties the view to the caller's allocation. There is no
//! manual release and therefore no use-after-release state to guard against.

use crate::util::{ExMatchError, ExMatchResult};

pub mod format;
#[cfg(feature = "image-io")]
pub mod io;

pub use format::PixelFormat;

/// One decoded pixel. Formats without alpha read back as fully opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Borrowed view over packed pixel memory with explicit geometry.
#[derive(Copy, Clone)]
pub struct PixelView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> PixelView<'a> {
    /// Creates a tightly packed view with `stride == width * bytes_per_pixel`.
    pub fn from_slice(
        data: &'a [u8],
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> ExMatchResult<Self> {
        let stride = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or(ExMatchError::InvalidDimensions { width, height })?;
        Self::new(data, width, height, stride, format)
    }

    /// Creates a view with an explicit stride in bytes.
    ///
    /// The caller guarantees the backing memory stays valid and unmodified by
    /// other writers for the lifetime of the view.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> ExMatchResult<Self> {
        let needed = required_len(width, height, stride, format)?;
        if data.len() < needed {
            return Err(ExMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the backing bytes including any row padding.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the packed bytes of row `y`, excluding row padding.
    pub fn row_bytes(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.format.bytes_per_pixel())?;
        self.data.get(start..end)
    }

    /// Reads the pixel at `(x, y)`.
    pub fn get_pixel(&self, x: usize, y: usize) -> ExMatchResult<Rgba> {
        if x >= self.width || y >= self.height {
            return Err(ExMatchError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let px = &self.data[y * self.stride + x * self.format.bytes_per_pixel()..];
        Ok(match self.format {
            PixelFormat::Gray8 => Rgba {
                r: px[0],
                g: px[0],
                b: px[0],
                a: 255,
            },
            PixelFormat::Rgb24 | PixelFormat::Rgb32 => Rgba {
                r: px[2],
                g: px[1],
                b: px[0],
                a: 255,
            },
            PixelFormat::Argb32 => Rgba {
                r: px[2],
                g: px[1],
                b: px[0],
                a: px[3],
            },
        })
    }
}

/// Owned, contiguous pixel buffer. Backing memory is freed on drop.
pub struct PixelBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl PixelBuffer {
    /// Allocates a zero-filled buffer.
    ///
    /// The stride is `width * bytes_per_pixel` rounded up to the next
    /// multiple of four bytes.
    pub fn alloc(width: usize, height: usize, format: PixelFormat) -> ExMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(ExMatchError::InvalidDimensions { width, height });
        }
        let row = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or(ExMatchError::InvalidDimensions { width, height })?;
        let stride = row
            .checked_add(3)
            .map(|v| v & !3)
            .ok_or(ExMatchError::InvalidDimensions { width, height })?;
        let len = stride
            .checked_mul(height)
            .ok_or(ExMatchError::InvalidDimensions { width, height })?;
        Ok(Self {
            data: vec![0u8; len],
            width,
            height,
            stride,
            format,
        })
    }

    /// Takes ownership of a tightly packed byte vector.
    ///
    /// `data` must hold exactly `width * height * bytes_per_pixel` bytes.
    pub fn from_vec(
        data: Vec<u8>,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> ExMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(ExMatchError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(format.bytes_per_pixel()))
            .ok_or(ExMatchError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(ExMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(ExMatchError::InvalidDimensions { width, height });
        }
        let stride = width * format.bytes_per_pixel();
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Bulk-copies a view into a new owned buffer with a tight stride.
    pub fn from_view(view: PixelView<'_>) -> ExMatchResult<Self> {
        let width = view.width();
        let height = view.height();
        let row_len = width * view.format().bytes_per_pixel();
        let mut data = vec![0u8; row_len * height];
        for y in 0..height {
            let row = view.row_bytes(y).ok_or(ExMatchError::BufferTooSmall {
                needed: y * view.stride() + row_len,
                got: view.as_bytes().len(),
            })?;
            data[y * row_len..(y + 1) * row_len].copy_from_slice(row);
        }
        Self::from_vec(data, width, height, view.format())
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the backing bytes including any row padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the whole buffer.
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
        }
    }

    /// Reads the pixel at `(x, y)`.
    pub fn get_pixel(&self, x: usize, y: usize) -> ExMatchResult<Rgba> {
        self.view().get_pixel(x, y)
    }

    /// Writes the pixel at `(x, y)`.
    ///
    /// For `Gray8` the `r` component is stored as the luminance value. The
    /// alpha component is ignored for formats without an alpha channel, and
    /// the `Rgb32` pad byte is left untouched.
    pub fn set_pixel(&mut self, x: usize, y: usize, value: Rgba) -> ExMatchResult<()> {
        if x >= self.width || y >= self.height {
            return Err(ExMatchError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let at = y * self.stride + x * self.format.bytes_per_pixel();
        let px = &mut self.data[at..];
        match self.format {
            PixelFormat::Gray8 => px[0] = value.r,
            PixelFormat::Rgb24 | PixelFormat::Rgb32 => {
                px[0] = value.b;
                px[1] = value.g;
                px[2] = value.r;
            }
            PixelFormat::Argb32 => {
                px[0] = value.b;
                px[1] = value.g;
                px[2] = value.r;
                px[3] = value.a;
            }
        }
        Ok(())
    }
}

fn required_len(
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
) -> ExMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(ExMatchError::InvalidDimensions { width, height });
    }
    let row = width
        .checked_mul(format.bytes_per_pixel())
        .ok_or(ExMatchError::InvalidDimensions { width, height })?;
    if stride < row {
        return Err(ExMatchError::InvalidStride {
            width,
            stride,
            bytes_per_pixel: format.bytes_per_pixel(),
        });
    }
    // The last row does not need to carry its padding.
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row))
        .ok_or(ExMatchError::InvalidDimensions { width, height })?;
    Ok(needed)
}

#[cfg(test)]
mod tests {
    use super::{PixelBuffer, PixelFormat, PixelView, Rgba};

    #[test]
    fn alloc_aligns_stride_to_four_bytes() {
        let buf = PixelBuffer::alloc(3, 2, PixelFormat::Gray8).unwrap();
        assert_eq!(buf.stride(), 4);
        let buf = PixelBuffer::alloc(5, 1, PixelFormat::Rgb24).unwrap();
        assert_eq!(buf.stride(), 16);
        let buf = PixelBuffer::alloc(5, 1, PixelFormat::Argb32).unwrap();
        assert_eq!(buf.stride(), 20);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn from_view_compacts_padded_rows() {
        let mut buf = PixelBuffer::alloc(3, 2, PixelFormat::Gray8).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                let v = (10 * y + x) as u8;
                buf.set_pixel(x, y, Rgba { r: v, g: v, b: v, a: 255 }).unwrap();
            }
        }
        let copy = PixelBuffer::from_view(buf.view()).unwrap();
        assert_eq!(copy.stride(), 3);
        assert_eq!(copy.as_bytes(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn view_row_bytes_excludes_padding() {
        let data = [1u8, 2, 3, 0, 4, 5, 6, 0];
        let view = PixelView::new(&data, 3, 2, 4, PixelFormat::Gray8).unwrap();
        assert_eq!(view.row_bytes(0).unwrap(), &[1, 2, 3]);
        assert_eq!(view.row_bytes(1).unwrap(), &[4, 5, 6]);
        assert!(view.row_bytes(2).is_none());
    }
}
