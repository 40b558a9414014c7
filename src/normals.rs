//! Surface normals from the linear PTM coefficients.
//!
//! This is a gradient-as-normal approximation: the light-space slope
//! `(a3, a4)` at the origin is taken as the normal's tangent-plane
//! component. It is not an exact inverse of the reflectance model.

use crate::field::{CoefficientField, NormalField};

/// Normal for one pixel's linear coefficients.
///
/// Slopes on or outside the unit circle are rescaled onto it with `nz = 0`.
/// Non-finite slopes keep only their direction; NaN counts as 0.
#[inline]
pub fn normal_from_slope(a3: f64, a4: f64) -> [f64; 3] {
    if !(a3.is_finite() && a4.is_finite()) {
        let direction = |v: f64| if v.is_infinite() { v.signum() } else { 0.0 };
        let (x, y) = (direction(a3), direction(a4));
        if x == 0.0 && y == 0.0 {
            return [0.0, 0.0, 1.0];
        }
        return normal_from_slope(x * 2.0, y * 2.0);
    }
    let len2 = a3 * a3 + a4 * a4;
    if len2 >= 1.0 {
        // hypot avoids overflow of the squared length
        let len = a3.hypot(a4);
        [a3 / len, a4 / len, 0.0]
    } else {
        [a3, a4, (1.0 - len2).sqrt()]
    }
}

/// Derive a [`NormalField`] from a [`CoefficientField`].
pub fn estimate_normals(field: &CoefficientField) -> NormalField {
    let a3 = field.plane(3);
    let a4 = field.plane(4);
    let normals = a3
        .iter()
        .zip(a4)
        .map(|(&x, &y)| normal_from_slope(x, y))
        .collect();
    NormalField {
        width: field.width(),
        height: field.height(),
        normals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn norm(n: [f64; 3]) -> f64 {
        (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt()
    }

    #[test]
    fn flat_slope_points_up() {
        assert_eq!(normal_from_slope(0.0, 0.0), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn inside_disk_keeps_slope() {
        let n = normal_from_slope(0.3, -0.4);
        assert_eq!(n[0], 0.3);
        assert_eq!(n[1], -0.4);
        assert_relative_eq!(n[2], 0.75f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(norm(n), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn grazing_slope_is_rescaled() {
        let n = normal_from_slope(30.0, 40.0);
        assert_relative_eq!(n[0], 0.6, epsilon = 1e-12);
        assert_relative_eq!(n[1], 0.8, epsilon = 1e-12);
        assert_eq!(n[2], 0.0);

        let edge = normal_from_slope(1.0, 0.0);
        assert_eq!(edge, [1.0, 0.0, 0.0]);

        let huge = normal_from_slope(1e200, -1e200);
        assert_relative_eq!(norm(huge), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn non_finite_slopes_stay_unit() {
        assert_eq!(normal_from_slope(f64::INFINITY, 0.0), [1.0, 0.0, 0.0]);
        assert_eq!(normal_from_slope(f64::NAN, f64::NAN), [0.0, 0.0, 1.0]);
        let n = normal_from_slope(f64::NEG_INFINITY, f64::INFINITY);
        assert_relative_eq!(norm(n), 1.0, epsilon = 1e-12);
        assert!(n[0] < 0.0 && n[1] > 0.0);
    }

    #[test]
    fn field_normals_are_unit() {
        let mut state: u32 = 0x1234_5678;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % 4001) as f64 / 1000.0 - 2.0
        };
        let planes: [Vec<f64>; 6] = core::array::from_fn(|_| (0..64).map(|_| next()).collect());
        let field = CoefficientField::from_planes(8, 8, planes).unwrap();
        let normals = estimate_normals(&field);
        assert_eq!(normals.as_slice().len(), 64);
        for &n in normals.as_slice() {
            assert!((norm(n) - 1.0).abs() < 1e-9, "{n:?}");
            assert!(n[2] >= 0.0);
        }
    }
}
