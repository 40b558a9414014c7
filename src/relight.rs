//! Relighting: evaluate the per-pixel biquadratic under a chosen light.
//!
//! All shading is done in `f64` and quantized to 8 bits only at the end.
//! Each output pixel depends only on its own inputs, so rows are shaded
//! independently (in parallel with the `rayon` feature).

use imgref::ImgVec;
use rgb::RGB8;

use crate::decode::DecodedPtm;
use crate::error::PtmError;
use crate::field::NormalField;
use crate::pack::PackedCoefficients;

/// Exponent concentrating the Blinn-Phong highlight.
pub const SPECULAR_EXPONENT: i32 = 20;

/// Upper bound of the diffuse luminance ratio after gain.
pub const MAX_DIFFUSE_RATIO: f64 = 4.0;

/// Reference luminances at or below this are treated as unlit.
const REFERENCE_EPSILON: f64 = 1e-6;

/// Light direction projected onto the surface plane, kept inside the unit disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightDirection {
    lu: f64,
    lv: f64,
}

impl Default for LightDirection {
    fn default() -> Self {
        Self::OVERHEAD
    }
}

impl LightDirection {
    /// Light straight above the surface.
    pub const OVERHEAD: Self = Self { lu: 0.0, lv: 0.0 };

    /// Clamp each component to `[-1, 1]` and project back onto the unit disk.
    /// Non-finite components become 0.
    pub fn new(lu: f64, lv: f64) -> Self {
        let sanitize = |v: f64| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        let (lu, lv) = (sanitize(lu), sanitize(lv));
        let len2 = lu * lu + lv * lv;
        if len2 > 1.0 {
            let len = len2.sqrt();
            Self {
                lu: lu / len,
                lv: lv / len,
            }
        } else {
            Self { lu, lv }
        }
    }

    pub fn lu(&self) -> f64 {
        self.lu
    }

    pub fn lv(&self) -> f64 {
        self.lv
    }

    /// Unit light vector `(lu, lv, sqrt(max(0, 1 - lu² - lv²)))`.
    pub fn vector(&self) -> [f64; 3] {
        let lz = (1.0 - self.lu * self.lu - self.lv * self.lv).max(0.0).sqrt();
        [self.lu, self.lv, lz]
    }
}

/// What the evaluator renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Base color modulated by relit luminance, plus a specular highlight.
    #[default]
    Default,
    /// Grayscale deviation of relit luminance from the overhead reference.
    SpecularOnly,
    /// Normals remapped from `[-1, 1]` to `0..=255`.
    Normals,
}

/// Per-frame rendering parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelightParams {
    pub light: LightDirection,
    pub view_mode: ViewMode,
    /// Specular enhancement. Also scales the deviation in [`ViewMode::SpecularOnly`].
    pub specular_gain: f64,
    /// Multiplier on the diffuse luminance ratio.
    pub diffuse_gain: f64,
}

impl Default for RelightParams {
    fn default() -> Self {
        Self {
            light: LightDirection::OVERHEAD,
            view_mode: ViewMode::Default,
            specular_gain: 0.0,
            diffuse_gain: 1.0,
        }
    }
}

impl RelightParams {
    pub fn new(light: LightDirection) -> Self {
        Self {
            light,
            ..Self::default()
        }
    }

    pub fn with_light(mut self, light: LightDirection) -> Self {
        self.light = light;
        self
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    pub fn with_specular_gain(mut self, gain: f64) -> Self {
        self.specular_gain = gain;
        self
    }

    pub fn with_diffuse_gain(mut self, gain: f64) -> Self {
        self.diffuse_gain = gain;
        self
    }
}

/// `a0·lu² + a1·lv² + a2·lu·lv + a3·lu + a4·lv + a5`.
#[inline]
pub fn luminance(a: &[f64; 6], light: LightDirection) -> f64 {
    let (lu, lv) = (light.lu, light.lv);
    a[0] * lu * lu + a[1] * lv * lv + a[2] * lu * lv + a[3] * lu + a[4] * lv + a[5]
}

/// Blinn-Phong term of `normal` against `light` with the viewer on +z.
#[inline]
pub fn specular(normal: [f64; 3], light: LightDirection) -> f64 {
    let l = light.vector();
    let h = [l[0], l[1], l[2] + 1.0];
    let len = (h[0] * h[0] + h[1] * h[1] + h[2] * h[2]).sqrt();
    let n_dot_h = (normal[0] * h[0] + normal[1] * h[1] + normal[2] * h[2]) / len;
    n_dot_h.max(0.0).powi(SPECULAR_EXPONENT)
}

/// Shade one pixel.
pub fn shade(a: &[f64; 6], base: RGB8, normal: [f64; 3], params: &RelightParams) -> RGB8 {
    match params.view_mode {
        ViewMode::Default => {
            let reference = a[5];
            let relit = luminance(a, params.light);
            let ratio = if reference > REFERENCE_EPSILON {
                relit / reference
            } else {
                1.0
            };
            let ratio = (ratio * params.diffuse_gain).clamp(0.0, MAX_DIFFUSE_RATIO);
            let highlight = specular(normal, params.light) * params.specular_gain * 255.0;
            let channel = |v: u8| to_u8(f64::from(v) * ratio + highlight);
            RGB8::new(channel(base.r), channel(base.g), channel(base.b))
        }
        ViewMode::SpecularOnly => {
            let deviation = (luminance(a, params.light) - a[5]) * params.specular_gain;
            let gray = to_u8(127.5 + 127.5 * deviation.clamp(-1.0, 1.0));
            RGB8::new(gray, gray, gray)
        }
        ViewMode::Normals => {
            let remap = |v: f64| to_u8((v * 0.5 + 0.5) * 255.0);
            RGB8::new(remap(normal[0]), remap(normal[1]), remap(normal[2]))
        }
    }
}

/// Relight a decoded image.
pub fn evaluate(decoded: &DecodedPtm, params: &RelightParams) -> ImgVec<RGB8> {
    let coefficients = decoded.coefficients();
    let base = decoded.base_color();
    let normals = decoded.normals().as_slice();
    render(decoded.width(), decoded.height(), |i| {
        shade(&coefficients.coefficients(i), base[i], normals[i], params)
    })
}

/// Relight from 8-bit packed coefficients, unpacking each pixel on the fly.
pub fn evaluate_packed(
    packed: &PackedCoefficients,
    base: &[RGB8],
    normals: &NormalField,
    params: &RelightParams,
) -> Result<ImgVec<RGB8>, PtmError> {
    let len = packed.width() as usize * packed.height() as usize;
    if normals.width() != packed.width() || normals.height() != packed.height() {
        return Err(PtmError::InvalidParameter(format!(
            "normals are {}x{}, coefficients are {}x{}",
            normals.width(),
            normals.height(),
            packed.width(),
            packed.height()
        )));
    }
    if base.len() < len {
        return Err(PtmError::BufferTooSmall {
            needed: len,
            actual: base.len(),
        });
    }
    let normals = normals.as_slice();
    Ok(render(packed.width(), packed.height(), |i| {
        shade(&packed.coefficients(i), base[i], normals[i], params)
    }))
}

fn render<F>(width: u32, height: u32, pixel: F) -> ImgVec<RGB8>
where
    F: Fn(usize) -> RGB8 + Sync,
{
    let w = width as usize;
    let h = height as usize;
    let mut out = vec![RGB8::new(0, 0, 0); w * h];
    if out.is_empty() {
        return ImgVec::new(out, w, h);
    }
    let fill_row = |(y, row): (usize, &mut [RGB8])| {
        for (x, px) in row.iter_mut().enumerate() {
            *px = pixel(y * w + x);
        }
    };

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        out.par_chunks_mut(w).enumerate().for_each(fill_row);
    }
    #[cfg(not(feature = "rayon"))]
    out.chunks_mut(w).enumerate().for_each(fill_row);

    ImgVec::new(out, w, h)
}

#[inline]
fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
