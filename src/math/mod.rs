pub mod arc_2d;
pub mod polygon_2d;
pub mod polynomial;
pub mod rectify;

pub use polynomial::{Polynomial, Polynomial2D};
pub use rectify::{rectify, ArcLengthParams};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3x3 homogeneous matrix used for 2D affine transforms.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// 2D rotation type.
pub type Rotation2 = nalgebra::Rotation2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Threshold under which two points are treated as the same location.
pub const POINT_EPSILON: f64 = 1e-6;

/// Returns `v` rotated by 90 degrees: `(v.y, -v.x)`.
#[must_use]
pub fn perpendicular(v: &Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}

/// Normalizes `v`, returning the zero vector when `v` has no length.
#[must_use]
pub fn normalize_or_zero(v: &Vector2) -> Vector2 {
    v.try_normalize(TOLERANCE).unwrap_or_else(Vector2::zeros)
}

/// Unit vector pointing at `angle` radians.
#[must_use]
pub fn from_radians(angle: f64) -> Vector2 {
    Vector2::new(angle.cos(), angle.sin())
}

/// Angle of `v` in radians, measured from the positive x axis.
#[must_use]
pub fn radians(v: &Vector2) -> f64 {
    v.y.atan2(v.x)
}

/// Linear interpolation between two points.
#[must_use]
pub fn lerp_point(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

/// Returns whether two points coincide within [`POINT_EPSILON`].
#[must_use]
pub fn points_equal(a: &Point2, b: &Point2) -> bool {
    (a.x - b.x).abs() <= POINT_EPSILON && (a.y - b.y).abs() <= POINT_EPSILON
}

/// Maps `value` from `[from_min, from_max]` onto `[to_min, to_max]`.
#[must_use]
pub fn remap(from_min: f64, from_max: f64, to_min: f64, to_max: f64, value: f64) -> f64 {
    let span = from_max - from_min;
    if span.abs() < f64::EPSILON {
        return to_min;
    }
    to_min + (value - from_min) / span * (to_max - to_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perpendicular_rotates_quarter_turn() {
        let p = perpendicular(&Vector2::new(1.0, 0.0));
        assert!((p - Vector2::new(0.0, -1.0)).norm() < TOLERANCE);
        assert!(p.dot(&Vector2::new(1.0, 0.0)).abs() < TOLERANCE);
    }

    #[test]
    fn normalize_zero_vector_is_safe() {
        let n = normalize_or_zero(&Vector2::zeros());
        assert!(n.x.is_finite() && n.y.is_finite());
        assert!(n.norm() < TOLERANCE);
    }

    #[test]
    fn remap_degenerate_range() {
        assert!((remap(2.0, 2.0, 0.25, 0.5, 2.0) - 0.25).abs() < TOLERANCE);
        assert!((remap(0.0, 10.0, 0.0, 1.0, 5.0) - 0.5).abs() < TOLERANCE);
    }
}
