use std::f64::consts::TAU;

use crate::geometry::{ArcSegment, CurveProfile, LineSegment};
use crate::math::{from_radians, Point2, Vector2};

/// Builds the profile of an ellipse, an elliptical arc or a sector.
///
/// The ellipse is centered at the origin with radii `size`. Angles are in
/// radians and increase toward +y. The swept part is split into two arcs at
/// its middle angle so that each half stays below a full half turn.
#[derive(Debug)]
pub struct CircleProfile {
    size: Vector2,
    start_angle: f64,
    end_angle: f64,
    closed: bool,
    counterclockwise: bool,
}

impl CircleProfile {
    /// Creates a new circle profile operation.
    ///
    /// A `closed` profile adds the two radii joining the arc to the center.
    #[must_use]
    pub fn new(
        size: Vector2,
        start_angle: f64,
        end_angle: f64,
        closed: bool,
        counterclockwise: bool,
    ) -> Self {
        Self {
            size,
            start_angle,
            end_angle,
            closed,
            counterclockwise,
        }
    }

    /// A full ellipse with radii `size`.
    #[must_use]
    pub fn ellipse(size: Vector2) -> Self {
        Self::new(size, 0.0, TAU, false, false)
    }

    /// Signed sweep from the start angle to the end angle.
    ///
    /// The end angle is first brought within one turn after the start angle.
    /// Counterclockwise arcs take the complementary way round, except for
    /// empty and full turns which keep their extent.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        let start = self.start_angle;
        let mut end = self.end_angle;
        if end < start {
            end += TAU * (((start - end) / TAU).floor() + 1.0);
        } else if end > start + TAU {
            end -= TAU * ((end - start) / TAU).floor();
        }

        let clockwise = end - start;
        if !self.counterclockwise {
            clockwise
        } else if clockwise <= f64::EPSILON {
            0.0
        } else if clockwise >= TAU {
            -TAU
        } else {
            clockwise - TAU
        }
    }

    /// Executes the operation.
    #[must_use]
    pub fn execute(&self) -> CurveProfile {
        let mut profile = CurveProfile::new();

        let delta = self.sweep();
        let middle_angle = self.start_angle + delta / 2.0;
        let end_angle = self.start_angle + delta;

        let from = self.point_at_angle(self.start_angle);
        let middle = self.point_at_angle(middle_angle);
        let to = self.point_at_angle(end_angle);
        let sweep = delta > 0.0;

        if self.closed {
            profile.push(LineSegment::new(Point2::origin(), from));
        }
        profile.push(ArcSegment::new(from, self.size, 0.0, false, sweep, middle));
        profile.push(ArcSegment::new(middle, self.size, 0.0, false, sweep, to));
        if self.closed {
            profile.push(LineSegment::new(to, Point2::origin()));
        }

        profile
    }

    fn point_at_angle(&self, angle: f64) -> Point2 {
        Point2::from(self.size.component_mul(&from_radians(angle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Curve, Segment};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, PI};

    /// Perimeter of the 100 x 50 ellipse from a high-resolution integration.
    const ELLIPSE_PERIMETER: f64 = 484.422_411_027_392_06;

    fn assert_point_near(actual: Point2, expected: Point2) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-9);
    }

    #[test]
    fn full_circle() {
        let profile = CircleProfile::ellipse(Vector2::new(50.0, 50.0)).execute();
        assert_eq!(profile.segments.len(), 2);
        assert_relative_eq!(profile.arc_length, 100.0 * PI, max_relative = 1e-9);
        assert_abs_diff_eq!(profile.min_sin, 1.0, epsilon = 1e-12);
        assert_point_near(profile.point_at_distance(0.0).position, Point2::new(50.0, 0.0));
        assert_point_near(
            profile.point_at_distance(25.0 * PI).position,
            Point2::new(0.0, 50.0),
        );
    }

    #[test]
    fn full_turn_ignores_direction() {
        let size = Vector2::new(100.0, 50.0);
        for counterclockwise in [false, true] {
            let profile = CircleProfile::new(size, 0.0, TAU, false, counterclockwise).execute();
            assert_relative_eq!(profile.arc_length, ELLIPSE_PERIMETER, max_relative = 1e-6);
        }
    }

    #[test]
    fn partial_arcs() {
        let size = Vector2::new(100.0, 100.0);
        let quarter = CircleProfile::new(size, 0.0, FRAC_PI_2, false, false).execute();
        assert_relative_eq!(quarter.arc_length, 50.0 * PI, max_relative = 1e-9);

        let rest = CircleProfile::new(size, 0.0, FRAC_PI_2, false, true).execute();
        assert_relative_eq!(rest.arc_length, 150.0 * PI, max_relative = 1e-9);
        let middle = rest.point_at_distance(rest.arc_length / 2.0).position;
        assert_point_near(middle, Point2::new(-100.0 / 2f64.sqrt(), -100.0 / 2f64.sqrt()));
    }

    #[test]
    fn end_angle_is_normalised() {
        let size = Vector2::new(10.0, 10.0);
        let wrapped = CircleProfile::new(size, FRAC_PI_2, 0.0, false, false);
        assert_abs_diff_eq!(wrapped.sweep(), 1.5 * PI, epsilon = 1e-12);

        let many_turns = CircleProfile::new(size, 0.0, 4.0 * TAU + FRAC_PI_2, false, false);
        assert_abs_diff_eq!(many_turns.sweep(), FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn closed_sector_adds_radii() {
        let size = Vector2::new(10.0, 10.0);
        let profile = CircleProfile::new(size, 0.0, FRAC_PI_2, true, false).execute();
        assert_eq!(profile.segments.len(), 4);
        assert!(matches!(profile.segments[0], Segment::Line(_)));
        assert!(matches!(profile.segments[3], Segment::Line(_)));
        assert_relative_eq!(profile.arc_length, 20.0 + 5.0 * PI, max_relative = 1e-9);
        assert_point_near(profile.segments[3].end_point(), Point2::origin());
        let total: f64 = profile.segments.iter().map(Curve::arc_length).sum();
        assert_relative_eq!(total, profile.arc_length, max_relative = 1e-12);
    }

    #[test]
    fn empty_sweep() {
        let profile = CircleProfile::new(Vector2::new(10.0, 10.0), 1.0, 1.0, false, true).execute();
        assert_abs_diff_eq!(profile.arc_length, 0.0, epsilon = 1e-12);
    }
}
