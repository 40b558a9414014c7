/// PTM format tag, from header line 1.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PtmFormat {
    /// Full polynomial per color channel (18 coefficients per pixel).
    Rgb,
    /// Luminance polynomial without color.
    Lum,
    /// One luminance polynomial plus a base color per pixel.
    Lrgb,
    JpegRgb,
    JpegLrgb,
    JpegLsRgb,
    JpegLsLrgb,
}

impl PtmFormat {
    /// Parse a header format name. Accepts both `PTM_FORMAT_LRGB` and `LRGB`.
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = name.strip_prefix("PTM_FORMAT_").unwrap_or(name);
        match tag {
            "RGB" => Some(Self::Rgb),
            "LUM" => Some(Self::Lum),
            "LRGB" => Some(Self::Lrgb),
            "JPEG_RGB" => Some(Self::JpegRgb),
            "JPEG_LRGB" => Some(Self::JpegLrgb),
            "JPEGLS_RGB" => Some(Self::JpegLsRgb),
            "JPEGLS_LRGB" => Some(Self::JpegLsLrgb),
            _ => None,
        }
    }

    /// Canonical header spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rgb => "PTM_FORMAT_RGB",
            Self::Lum => "PTM_FORMAT_LUM",
            Self::Lrgb => "PTM_FORMAT_LRGB",
            Self::JpegRgb => "PTM_FORMAT_JPEG_RGB",
            Self::JpegLrgb => "PTM_FORMAT_JPEG_LRGB",
            Self::JpegLsRgb => "PTM_FORMAT_JPEGLS_RGB",
            Self::JpegLsLrgb => "PTM_FORMAT_JPEGLS_LRGB",
        }
    }

    /// Stored bytes per pixel for the uncompressed formats this crate decodes.
    ///
    /// `None` for formats without a fixed per-pixel size.
    pub fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            Self::Lrgb => Some(9),
            Self::Rgb => Some(18),
            _ => None,
        }
    }
}

/// On-disk arrangement of the pixel region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaneLayout {
    /// All bytes of one pixel are adjacent; scanlines top-to-bottom.
    Interleaved,
    /// One plane per stored coefficient (and color); scanlines bottom-to-top.
    Planar,
}

/// How the decoder picks a [`PlaneLayout`].
///
/// Producers disagree on the layout of PTM_1.2 files, so it is never hard-coded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutStrategy {
    /// Guess from the pixel data (see [`crate::detect_layout`]).
    #[default]
    Detect,
    /// Always use the given layout.
    Fixed(PlaneLayout),
}
