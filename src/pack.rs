//! 8-bit transport of floating-point coefficient planes.
//!
//! Renderers that consume 8-bit textures need each coefficient squeezed into
//! 0..=255. [`RangePolicy::Computed`] maps each plane's own `[min, max]` onto
//! that range; [`RangePolicy::Fixed`] maps a constant range such as `[-2, 2]`
//! and clips anything outside it.

use crate::field::CoefficientField;

/// Packed value used for flat planes (`min == max`).
pub const FLAT_MIDPOINT: u8 = 128;

/// The historical fixed packing range.
pub const LEGACY_FIXED_RANGE: CoefficientRange = CoefficientRange {
    min: -2.0,
    max: 2.0,
};

/// Value range of one coefficient plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoefficientRange {
    pub min: f64,
    pub max: f64,
}

impl CoefficientRange {
    /// Scan a plane for its extremes. An empty plane yields `[0, 0]`.
    pub fn of(values: &[f64]) -> Self {
        let mut iter = values.iter().copied();
        let Some(first) = iter.next() else {
            return Self { min: 0.0, max: 0.0 };
        };
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self { min, max }
    }

    pub fn is_flat(&self) -> bool {
        self.max == self.min
    }

    /// `round(clamp((value - min) / (max - min), 0, 1) * 255)`.
    #[inline]
    pub fn pack(&self, value: f64) -> u8 {
        if self.is_flat() {
            return FLAT_MIDPOINT;
        }
        let t = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        (t * 255.0).round() as u8
    }

    /// `min + packed / 255 * (max - min)`.
    #[inline]
    pub fn unpack(&self, packed: u8) -> f64 {
        self.min + f64::from(packed) / 255.0 * (self.max - self.min)
    }
}

/// How packing ranges are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RangePolicy {
    /// Per-plane `[min, max]` from a full scan.
    #[default]
    Computed,
    /// Same range for every plane; values outside it clip.
    Fixed(CoefficientRange),
}

/// Per-coefficient ranges for all six planes.
pub fn compute_ranges(field: &CoefficientField) -> [CoefficientRange; 6] {
    core::array::from_fn(|c| CoefficientRange::of(field.plane(c)))
}

/// Six 8-bit coefficient planes and the ranges needed to unpack them.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedCoefficients {
    width: u32,
    height: u32,
    planes: [Vec<u8>; 6],
    ranges: [CoefficientRange; 6],
}

impl PackedCoefficients {
    /// Quantize a field under the given policy.
    pub fn pack(field: &CoefficientField, policy: RangePolicy) -> Self {
        let ranges = match policy {
            RangePolicy::Computed => compute_ranges(field),
            RangePolicy::Fixed(range) => [range; 6],
        };
        let planes = core::array::from_fn(|c| {
            let range = ranges[c];
            field.plane(c).iter().map(|&v| range.pack(v)).collect()
        });
        Self {
            width: field.width(),
            height: field.height(),
            planes,
            ranges,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn plane(&self, c: usize) -> &[u8] {
        &self.planes[c]
    }

    pub fn ranges(&self) -> &[CoefficientRange; 6] {
        &self.ranges
    }

    /// Unpacked coefficients of the pixel at row-major index `i`.
    #[inline]
    pub fn coefficients(&self, i: usize) -> [f64; 6] {
        core::array::from_fn(|c| self.ranges[c].unpack(self.planes[c][i]))
    }

    /// Interleave the six planes as two RGB8 textures (a0 a1 a2 | a3 a4 a5).
    pub fn to_textures(&self) -> [Vec<[u8; 3]>; 2] {
        core::array::from_fn(|t| {
            let base = t * 3;
            (0..self.planes[0].len())
                .map(|i| {
                    [
                        self.planes[base][i],
                        self.planes[base + 1][i],
                        self.planes[base + 2][i],
                    ]
                })
                .collect()
        })
    }

    /// Expand back into a floating-point field.
    pub fn unpack(&self) -> CoefficientField {
        let planes = core::array::from_fn(|c| {
            let range = self.ranges[c];
            self.planes[c].iter().map(|&p| range.unpack(p)).collect()
        });
        // Packed planes keep the source field's length.
        CoefficientField::from_planes_unchecked(self.width, self.height, planes)
    }
}
