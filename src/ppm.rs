//! Export of relit images and coefficient planes as PNM.
//!
//! - P6 (PPM) for 8-bit RGB renders.
//! - Pf (grayscale PFM) for inspecting one floating-point coefficient plane.

use enough::Stop;
use imgref::ImgRef;
use rgb::RGB8;

use crate::error::PtmError;
use crate::field::CoefficientField;

/// Encode an RGB image as binary PPM (maxval 255).
pub fn encode_ppm(img: ImgRef<'_, RGB8>, stop: impl Stop) -> Result<Vec<u8>, PtmError> {
    let (w, h) = (img.width(), img.height());
    let header = format!("P6\n{w} {h}\n255\n");
    let body = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(3))
        .ok_or(PtmError::DimensionsTooLarge {
            width: w as u32,
            height: h as u32,
        })?;
    let mut out = Vec::with_capacity(header.len() + body);
    out.extend_from_slice(header.as_bytes());

    for (y, row) in img.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.extend_from_slice(&[px.r, px.g, px.b]);
        }
    }

    Ok(out)
}

/// Encode coefficient plane `c` as grayscale little-endian PFM.
pub fn encode_pfm_plane(
    field: &CoefficientField,
    c: usize,
    stop: impl Stop,
) -> Result<Vec<u8>, PtmError> {
    if c >= 6 {
        return Err(PtmError::InvalidParameter(format!(
            "coefficient index {c} out of range 0..6"
        )));
    }
    let (width, height) = (field.width(), field.height());
    let w = width as usize;
    let h = height as usize;
    let header = format!("Pf\n{width} {height}\n-1.0\n");
    let body = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(4))
        .ok_or(PtmError::DimensionsTooLarge { width, height })?;
    let mut out = Vec::with_capacity(header.len().saturating_add(body));
    out.extend_from_slice(header.as_bytes());

    // PFM stores bottom-to-top
    let plane = field.plane(c);
    for row in (0..h).rev() {
        if row % 16 == 0 {
            stop.check()?;
        }
        for &v in &plane[row * w..(row + 1) * w] {
            out.extend_from_slice(&(v as f32).to_le_bytes());
        }
    }

    Ok(out)
}
