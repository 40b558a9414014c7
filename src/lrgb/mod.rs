//! LRGB: one luminance polynomial plus a base color per pixel (9 stored bytes).
//!
//! - Interleaved: `R G B a0 a1 a2 a3 a4 a5` per pixel, scanlines top-to-bottom.
//! - Planar: six coefficient planes of `width * height` bytes (a0..a5), then one
//!   `width * height * 3` color plane; scanlines bottom-to-top in every plane.

mod decode;
mod encode;

use enough::Stop;
use rgb::RGB8;

use crate::error::PtmError;
use crate::field::CoefficientField;
use crate::format::PlaneLayout;
use crate::header::Header;

/// Stored bytes per LRGB pixel.
pub(crate) const BYTES_PER_PIXEL: usize = 9;

/// Decode an LRGB pixel region (already bounds-checked by the caller).
pub(crate) fn decode(
    pixels: &[u8],
    header: &Header,
    layout: PlaneLayout,
    stop: &dyn Stop,
) -> Result<(CoefficientField, Vec<RGB8>), PtmError> {
    match layout {
        PlaneLayout::Interleaved => decode::decode_interleaved(pixels, header, stop),
        PlaneLayout::Planar => decode::decode_planar(pixels, header, stop),
    }
}

/// Encode raw LRGB bytes (top-down, row-major) into a pixel region.
pub(crate) fn encode(
    coefficients: &[[u8; 6]],
    colors: &[RGB8],
    width: u32,
    height: u32,
    layout: PlaneLayout,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PtmError> {
    encode::encode_lrgb(coefficients, colors, width, height, layout, stop)
}
