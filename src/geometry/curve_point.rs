use crate::math::{normalize_or_zero, perpendicular, Point2, Vector2};

/// A position on a curve with its direction of travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub position: Point2,
    /// Unit direction of travel, or zero on degenerate geometry.
    pub tangent: Vector2,
    /// `tangent` rotated by 90 degrees.
    pub normal: Vector2,
}

impl CurvePoint {
    /// Creates a curve point, normalizing `tangent`.
    #[must_use]
    pub fn new(position: Point2, tangent: Vector2) -> Self {
        let tangent = normalize_or_zero(&tangent);
        Self {
            position,
            tangent,
            normal: perpendicular(&tangent),
        }
    }
}

impl Default for CurvePoint {
    fn default() -> Self {
        Self::new(Point2::origin(), Vector2::x())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tangent_is_normalized() {
        let point = CurvePoint::new(Point2::new(1.0, 2.0), Vector2::new(3.0, 4.0));
        assert!((point.tangent.norm() - 1.0).abs() < 1e-12);
        assert!(point.tangent.dot(&point.normal).abs() < 1e-12);
    }

    #[test]
    fn zero_tangent_stays_finite() {
        let point = CurvePoint::new(Point2::origin(), Vector2::zeros());
        assert!(point.tangent.iter().all(|v| v.is_finite()));
        assert!(point.normal.iter().all(|v| v.is_finite()));
    }
}
