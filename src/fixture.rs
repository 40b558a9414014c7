//! Synthetic PTMs with known geometry, for tests and demos that skip decoding.

use rgb::RGB8;

use crate::decode::DecodedPtm;
use crate::error::PtmError;
use crate::field::CoefficientField;
use crate::format::PtmFormat;
use crate::header::Header;

/// Albedo of the synthetic surface.
pub const DOME_ALBEDO: RGB8 = RGB8 {
    r: 220,
    g: 180,
    b: 140,
};

/// A hemisphere bulging out of a flat plane, as an LRGB PTM.
///
/// Each pixel's polynomial is the second-order expansion of a Lambertian
/// `n·l` with `lz ≈ 1 - (lu² + lv²) / 2`, so `(a3, a4)` equals the true
/// `(nx, ny)` and the estimated normals match the geometry exactly.
/// The `v` axis points up the image.
pub fn dome(width: u32, height: u32) -> Result<DecodedPtm, PtmError> {
    if width == 0 || height == 0 {
        return Err(PtmError::InvalidParameter(format!(
            "dimensions must be non-zero, got {width}x{height}"
        )));
    }
    let w = width as usize;
    let h = height as usize;
    let n = w
        .checked_mul(h)
        .ok_or(PtmError::DimensionsTooLarge { width, height })?;

    let cx = w as f64 / 2.0;
    let cy = h as f64 / 2.0;
    let radius = cx.min(cy);

    let mut planes: [Vec<f64>; 6] = core::array::from_fn(|_| Vec::with_capacity(n));
    let mut base = Vec::with_capacity(n);
    for y in 0..h {
        for x in 0..w {
            let dx = (x as f64 + 0.5 - cx) / radius;
            let dy = (cy - (y as f64 + 0.5)) / radius;
            let d2 = dx * dx + dy * dy;
            let [nx, ny, nz] = if d2 < 1.0 {
                [dx, dy, (1.0 - d2).sqrt()]
            } else {
                [0.0, 0.0, 1.0]
            };
            let coefs = [-nz / 2.0, -nz / 2.0, 0.0, nx, ny, nz];
            for (plane, v) in planes.iter_mut().zip(coefs) {
                plane.push(v);
            }
            let shade = |c: u8| (f64::from(c) * nz).round() as u8;
            base.push(RGB8::new(
                shade(DOME_ALBEDO.r),
                shade(DOME_ALBEDO.g),
                shade(DOME_ALBEDO.b),
            ));
        }
    }

    let header = Header {
        version: "PTM_1.2".into(),
        format: PtmFormat::Lrgb,
        width,
        height,
        scale: [1.0; 6],
        bias: [0.0; 6],
    };
    let field = CoefficientField::from_planes(width, height, planes)
        .ok_or(PtmError::DimensionsTooLarge { width, height })?;
    DecodedPtm::from_parts(header, field, base)
}
