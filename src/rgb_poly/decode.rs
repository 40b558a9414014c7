//! RGB pixel plane decoder with per-channel averaging.

use enough::Stop;
use rgb::RGB8;

use super::BYTES_PER_PIXEL;
use crate::decode::{empty_output, stored_row};
use crate::error::PtmError;
use crate::field::CoefficientField;
use crate::format::PlaneLayout;
use crate::header::Header;

pub(crate) fn decode_rgb(
    pixels: &[u8],
    header: &Header,
    layout: PlaneLayout,
    stop: &dyn Stop,
) -> Result<(CoefficientField, Vec<RGB8>), PtmError> {
    let w = header.width as usize;
    let h = header.height as usize;
    let n = w * h;
    let (mut field, mut colors) = empty_output(header);
    let planes = field.planes_mut();

    // Byte offset of (channel, coefficient) for the pixel at output (x, y).
    let offset = |ch: usize, c: usize, x: usize, y: usize| match layout {
        PlaneLayout::Interleaved => (y * w + x) * BYTES_PER_PIXEL + ch * 6 + c,
        PlaneLayout::Planar => (ch * 6 + c) * n + stored_row(layout, h, y) * w + x,
    };

    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        for x in 0..w {
            let i = y * w + x;
            let mut base = [0u8; 3];
            for c in 0..6 {
                let mut sum = 0.0;
                for (ch, channel_base) in base.iter_mut().enumerate() {
                    let value = header.dequantize(c, pixels[offset(ch, c, x, y)]);
                    if c == 5 {
                        *channel_base = to_color(value);
                    }
                    sum += value;
                }
                planes[c][i] = sum / 3.0;
            }
            colors[i] = RGB8::new(base[0], base[1], base[2]);
        }
    }

    Ok((field, colors))
}

fn to_color(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
