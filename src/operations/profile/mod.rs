//! Builders that turn shape descriptions into [`CurveProfile`]s.
//!
//! Every builder is an operation struct: configure it with `new(...)`, then
//! call `execute()`. Builders never fail on odd geometry; degenerate input
//! yields an empty or partial profile.
//!
//! [`CurveProfile`]: crate::geometry::CurveProfile

mod circle;
mod path;
mod polyline;
mod rect;
mod spline;

pub use circle::CircleProfile;
pub use path::PathProfile;
pub use polyline::PolylineProfile;
pub use rect::{adjust_rect_radius, CornerRadii, RectProfile};
pub use spline::BezierSplineProfile;

use crate::geometry::{Curve, Segment};
use crate::math::Vector2;

/// Sine of half the angle between two unit vectors.
pub(crate) fn half_angle_sine(a: &Vector2, b: &Vector2) -> f64 {
    let angle = a.dot(b).clamp(-1.0, 1.0).acos();
    (angle / 2.0).sin().abs()
}

/// Smallest half-angle sine over every join of `segments`, including the
/// join from the last segment back to the first.
pub(crate) fn joint_min_sin(segments: &[Segment]) -> f64 {
    let count = segments.len();
    (0..count)
        .map(|i| {
            let incoming = -segments[i].point_at(1.0).tangent;
            let outgoing = segments[(i + 1) % count].point_at(0.0).tangent;
            half_angle_sine(&incoming, &outgoing)
        })
        .fold(1.0, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LineSegment;
    use crate::math::Point2;
    use approx::assert_abs_diff_eq;

    #[test]
    fn straight_continuation_has_no_corner() {
        let sine = half_angle_sine(&Vector2::new(-1.0, 0.0), &Vector2::new(1.0, 0.0));
        assert_abs_diff_eq!(sine, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn right_angle_join() {
        let segments: Vec<Segment> = vec![
            LineSegment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)).into(),
            LineSegment::new(Point2::new(10.0, 0.0), Point2::new(10.0, 10.0)).into(),
        ];
        let sine = joint_min_sin(&segments);
        assert_abs_diff_eq!(sine, std::f64::consts::FRAC_PI_4.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(joint_min_sin(&[]), 1.0, epsilon = 1e-12);
    }
}
