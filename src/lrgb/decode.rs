//! LRGB pixel plane decoder.

use enough::Stop;
use rgb::RGB8;

use super::BYTES_PER_PIXEL;
use crate::decode::{empty_output, stored_row};
use crate::error::PtmError;
use crate::field::CoefficientField;
use crate::format::PlaneLayout;
use crate::header::Header;

pub(crate) fn decode_interleaved(
    pixels: &[u8],
    header: &Header,
    stop: &dyn Stop,
) -> Result<(CoefficientField, Vec<RGB8>), PtmError> {
    let w = header.width as usize;
    let (mut field, mut colors) = empty_output(header);
    let planes = field.planes_mut();

    for (y, row) in pixels.chunks_exact(w * BYTES_PER_PIXEL).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (x, px) in row.chunks_exact(BYTES_PER_PIXEL).enumerate() {
            let i = y * w + x;
            colors[i] = RGB8::new(px[0], px[1], px[2]);
            for (c, &raw) in px[3..].iter().enumerate() {
                planes[c][i] = header.dequantize(c, raw);
            }
        }
    }

    Ok((field, colors))
}

pub(crate) fn decode_planar(
    pixels: &[u8],
    header: &Header,
    stop: &dyn Stop,
) -> Result<(CoefficientField, Vec<RGB8>), PtmError> {
    let w = header.width as usize;
    let h = header.height as usize;
    let n = w * h;
    let (mut field, mut colors) = empty_output(header);

    for (c, plane) in field.planes_mut().iter_mut().enumerate() {
        let src = &pixels[c * n..(c + 1) * n];
        for y in 0..h {
            if y % 16 == 0 {
                stop.check()?;
            }
            let s = stored_row(PlaneLayout::Planar, h, y);
            let src_row = &src[s * w..(s + 1) * w];
            for (dst, &raw) in plane[y * w..(y + 1) * w].iter_mut().zip(src_row) {
                *dst = header.dequantize(c, raw);
            }
        }
    }

    let color_plane = &pixels[6 * n..9 * n];
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let s = stored_row(PlaneLayout::Planar, h, y);
        let src_row = &color_plane[s * w * 3..(s + 1) * w * 3];
        for (dst, px) in colors[y * w..(y + 1) * w]
            .iter_mut()
            .zip(src_row.chunks_exact(3))
        {
            *dst = RGB8::new(px[0], px[1], px[2]);
        }
    }

    Ok((field, colors))
}
