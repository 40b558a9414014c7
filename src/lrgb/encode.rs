//! LRGB pixel region encoder, the inverse of the decoder's byte arrangement.

use enough::Stop;
use rgb::RGB8;

use super::BYTES_PER_PIXEL;
use crate::decode::stored_row;
use crate::error::PtmError;
use crate::format::PlaneLayout;

pub(crate) fn encode_lrgb(
    coefficients: &[[u8; 6]],
    colors: &[RGB8],
    width: u32,
    height: u32,
    layout: PlaneLayout,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PtmError> {
    let w = width as usize;
    let h = height as usize;
    let n = w
        .checked_mul(h)
        .ok_or(PtmError::DimensionsTooLarge { width, height })?;
    let total = n
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or(PtmError::DimensionsTooLarge { width, height })?;
    for len in [coefficients.len(), colors.len()] {
        if len < n {
            return Err(PtmError::BufferTooSmall {
                needed: n,
                actual: len,
            });
        }
    }

    let mut out = Vec::with_capacity(total);
    match layout {
        PlaneLayout::Interleaved => {
            for y in 0..h {
                if y % 16 == 0 {
                    stop.check()?;
                }
                let row = y * w..(y + 1) * w;
                for (color, coefs) in colors[row.clone()].iter().zip(&coefficients[row]) {
                    out.extend_from_slice(&[color.r, color.g, color.b]);
                    out.extend_from_slice(coefs);
                }
            }
        }
        PlaneLayout::Planar => {
            for c in 0..6 {
                stop.check()?;
                for s in 0..h {
                    let y = stored_row(layout, h, s);
                    out.extend(coefficients[y * w..(y + 1) * w].iter().map(|px| px[c]));
                }
            }
            for s in 0..h {
                if s % 16 == 0 {
                    stop.check()?;
                }
                let y = stored_row(layout, h, s);
                for color in &colors[y * w..(y + 1) * w] {
                    out.extend_from_slice(&[color.r, color.g, color.b]);
                }
            }
        }
    }

    debug_assert_eq!(out.len(), total);
    Ok(out)
}
