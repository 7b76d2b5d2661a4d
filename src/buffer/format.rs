//! Packed pixel format descriptors.

/// Closed set of packed 8-bit-per-channel pixel formats.
///
/// Multi-byte formats store channels in B,G,R(,A) order within each pixel,
/// the common packed little-endian convention. `Rgb32` is B,G,R plus one
/// unused pad byte; `Argb32` carries a real alpha channel in the fourth byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single 8-bit luminance channel.
    Gray8,
    /// 24-bit color, packed B,G,R.
    Rgb24,
    /// 32-bit color, packed B,G,R,pad.
    Rgb32,
    /// 32-bit color with alpha, packed B,G,R,A.
    Argb32,
}

impl PixelFormat {
    /// Bytes occupied by one pixel.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb24 => 3,
            Self::Rgb32 | Self::Argb32 => 4,
        }
    }

    /// Whether the fourth byte is a meaningful alpha channel.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Argb32)
    }

    /// Channels that participate in a difference computation.
    ///
    /// Alpha and the 32-bit pad byte never contribute to a match score, so
    /// every color format compares exactly the three B,G,R bytes.
    #[inline]
    pub const fn channels_compared(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb24 | Self::Rgb32 | Self::Argb32 => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PixelFormat;

    #[test]
    fn descriptor_values_are_fixed() {
        let cases = [
            (PixelFormat::Gray8, 1, 1, false),
            (PixelFormat::Rgb24, 3, 3, false),
            (PixelFormat::Rgb32, 4, 3, false),
            (PixelFormat::Argb32, 4, 3, true),
        ];
        for (format, bpp, compared, alpha) in cases {
            assert_eq!(format.bytes_per_pixel(), bpp);
            assert_eq!(format.channels_compared(), compared);
            assert_eq!(format.has_alpha(), alpha);
        }
    }
}
