//! Dense per-pixel planes, row-major with a top-left origin.

/// Six parallel coefficient planes of the biquadratic
/// `L(lu, lv) = a0·lu² + a1·lv² + a2·lu·lv + a3·lu + a4·lv + a5`.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientField {
    width: u32,
    height: u32,
    planes: [Vec<f64>; 6],
}

impl CoefficientField {
    /// Build a field from six planes of `width * height` values each.
    ///
    /// Returns `None` if any plane has the wrong length.
    pub fn from_planes(width: u32, height: u32, planes: [Vec<f64>; 6]) -> Option<Self> {
        let len = (width as usize).checked_mul(height as usize)?;
        if planes.iter().any(|p| p.len() != len) {
            return None;
        }
        Some(Self {
            width,
            height,
            planes,
        })
    }

    /// Build a field whose plane lengths are already known to be `width * height`.
    pub(crate) fn from_planes_unchecked(width: u32, height: u32, planes: [Vec<f64>; 6]) -> Self {
        debug_assert!(
            planes
                .iter()
                .all(|p| p.len() == width as usize * height as usize)
        );
        Self {
            width,
            height,
            planes,
        }
    }

    pub(crate) fn zeroed(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            planes: core::array::from_fn(|_| vec![0.0; len]),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.planes[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes[0].is_empty()
    }

    /// Plane `c` (0..6).
    pub fn plane(&self, c: usize) -> &[f64] {
        &self.planes[c]
    }

    pub fn planes(&self) -> &[Vec<f64>; 6] {
        &self.planes
    }

    pub(crate) fn planes_mut(&mut self) -> &mut [Vec<f64>; 6] {
        &mut self.planes
    }

    /// The six coefficients of the pixel at row-major index `i`.
    #[inline]
    pub fn coefficients(&self, i: usize) -> [f64; 6] {
        core::array::from_fn(|c| self.planes[c][i])
    }

    /// The six coefficients of the pixel at `(x, y)`.
    pub fn at(&self, x: u32, y: u32) -> [f64; 6] {
        self.coefficients(y as usize * self.width as usize + x as usize)
    }
}

/// Per-pixel unit surface normals.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalField {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) normals: Vec<[f64; 3]>,
}

impl NormalField {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_slice(&self) -> &[[f64; 3]] {
        &self.normals
    }

    pub fn at(&self, x: u32, y: u32) -> [f64; 3] {
        self.normals[y as usize * self.width as usize + x as usize]
    }
}
