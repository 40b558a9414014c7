//! RGB pixel region encoder.

use enough::Stop;

use super::BYTES_PER_PIXEL;
use crate::decode::stored_row;
use crate::error::PtmError;
use crate::format::PlaneLayout;

pub(crate) fn encode_rgb(
    coefficients: &[[[u8; 6]; 3]],
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
    if coefficients.len() < n {
        return Err(PtmError::BufferTooSmall {
            needed: n,
            actual: coefficients.len(),
        });
    }

    let mut out = Vec::with_capacity(total);
    match layout {
        PlaneLayout::Interleaved => {
            for (y, row) in coefficients[..n].chunks_exact(w).enumerate() {
                if y % 16 == 0 {
                    stop.check()?;
                }
                for px in row {
                    for channel in px {
                        out.extend_from_slice(channel);
                    }
                }
            }
        }
        PlaneLayout::Planar => {
            for ch in 0..3 {
                for c in 0..6 {
                    stop.check()?;
                    for s in 0..h {
                        let y = stored_row(layout, h, s);
                        out.extend(coefficients[y * w..(y + 1) * w].iter().map(|px| px[ch][c]));
                    }
                }
            }
        }
    }

    debug_assert_eq!(out.len(), total);
    Ok(out)
}
