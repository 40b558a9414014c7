//! RGB: one polynomial per color channel (18 stored bytes per pixel).
//!
//! - Interleaved: `R:a0..a5 G:a0..a5 B:a0..a5` per pixel, scanlines top-to-bottom.
//! - Planar: 18 planes of `width * height` bytes, ordered R a0..a5, G a0..a5,
//!   B a0..a5; scanlines bottom-to-top in every plane.
//!
//! The three channel polynomials are averaged into one luminance polynomial.
//! Base color is each channel's dequantized constant term, i.e. the
//! appearance under overhead light.

mod decode;
mod encode;

use enough::Stop;
use rgb::RGB8;

use crate::error::PtmError;
use crate::field::CoefficientField;
use crate::format::PlaneLayout;
use crate::header::Header;

/// Stored bytes per RGB pixel.
pub(crate) const BYTES_PER_PIXEL: usize = 18;

/// Decode an RGB pixel region (already bounds-checked by the caller).
pub(crate) fn decode(
    pixels: &[u8],
    header: &Header,
    layout: PlaneLayout,
    stop: &dyn Stop,
) -> Result<(CoefficientField, Vec<RGB8>), PtmError> {
    decode::decode_rgb(pixels, header, layout, stop)
}

/// Encode raw per-channel coefficient bytes (top-down, row-major).
pub(crate) fn encode(
    coefficients: &[[[u8; 6]; 3]],
    width: u32,
    height: u32,
    layout: PlaneLayout,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PtmError> {
    encode::encode_rgb(coefficients, width, height, layout, stop)
}
