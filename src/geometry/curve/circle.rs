use crate::geometry::CurvePoint;
use crate::math::{from_radians, radians, Point2, Vector2};
use crate::sink::{EllipseArc, PathSink};

use super::Curve;

/// Sweeps shorter than this are not drawn.
const MIN_DRAWN_ANGLE: f64 = 1e-4;

/// A circular corner blend between two radial directions.
///
/// `from` and `to` are unit vectors pointing from the center to the arc's
/// start and end. The arc takes the short way between them, turning toward
/// decreasing angles when `counter` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSegment {
    center: Point2,
    radius: f64,
    from: Vector2,
    to: Vector2,
    counter: bool,
    angle: f64,
    length: f64,
}

impl CircleSegment {
    /// Creates a new corner arc.
    #[must_use]
    pub fn new(center: Point2, radius: f64, from: Vector2, to: Vector2, counter: bool) -> Self {
        let angle = from.dot(&to).clamp(-1.0, 1.0).acos();
        Self {
            center,
            radius,
            from,
            to,
            counter,
            angle,
            length: (angle * radius).abs(),
        }
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns `true` if the arc turns toward decreasing angles.
    #[must_use]
    pub fn counter(&self) -> bool {
        self.counter
    }

    /// Signed sweep in radians, negative when `counter` is set.
    #[must_use]
    pub fn sweep_angle(&self) -> f64 {
        self.angle * self.direction()
    }

    /// Radial direction toward the start of the arc.
    #[must_use]
    pub fn start_direction(&self) -> &Vector2 {
        &self.from
    }

    /// Radial direction toward the end of the arc.
    #[must_use]
    pub fn end_direction(&self) -> &Vector2 {
        &self.to
    }

    fn direction(&self) -> f64 {
        if self.counter {
            -1.0
        } else {
            1.0
        }
    }

    fn angle_at(&self, fraction: f64) -> f64 {
        radians(&self.from) + fraction * self.sweep_angle()
    }

    fn point_at_angle(&self, angle: f64) -> CurvePoint {
        let radial = from_radians(angle);
        let travel = Vector2::new(-radial.y, radial.x) * self.direction();
        CurvePoint::new(self.center + radial * self.radius, travel)
    }
}

impl Curve for CircleSegment {
    fn arc_length(&self) -> f64 {
        self.length
    }

    fn point_at(&self, fraction: f64) -> CurvePoint {
        self.point_at_angle(self.angle_at(fraction))
    }

    fn draw(
        &self,
        sink: &mut dyn PathSink,
        start: f64,
        end: f64,
        move_to: bool,
    ) -> (CurvePoint, CurvePoint) {
        let start_angle = self.angle_at(start);
        let end_angle = self.angle_at(end);
        let start_point = self.point_at_angle(start_angle);
        let end_point = self.point_at_angle(end_angle);

        if move_to {
            sink.move_to(start_point.position);
        }
        if self.angle.abs() > MIN_DRAWN_ANGLE {
            sink.ellipse(EllipseArc {
                center: self.center,
                radii: Vector2::new(self.radius, self.radius),
                rotation: 0.0,
                start_angle,
                end_angle,
                counterclockwise: self.counter,
            });
        }

        (start_point, end_point)
    }

    fn points(&self) -> Vec<Point2> {
        let edge = Vector2::new(self.radius, self.radius);
        vec![self.center - edge, self.center + edge]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{PathOp, PathRecorder};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_2;

    fn assert_point_near(actual: Point2, expected: Point2) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-9);
    }

    #[test]
    fn quarter_turn_both_directions() {
        let clockwise = CircleSegment::new(
            Point2::origin(),
            10.0,
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
            false,
        );
        assert_relative_eq!(
            clockwise.arc_length(),
            5.0 * std::f64::consts::PI,
            max_relative = 1e-12
        );
        assert_point_near(clockwise.point_at(1.0).position, Point2::new(0.0, 10.0));

        let counter = CircleSegment::new(
            Point2::origin(),
            10.0,
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, -1.0),
            true,
        );
        assert_abs_diff_eq!(counter.sweep_angle(), -FRAC_PI_2, epsilon = 1e-12);
        assert_point_near(counter.point_at(1.0).position, Point2::new(0.0, -10.0));
        let mid = counter.point_at(0.5);
        assert!(mid.tangent.x < 0.0 && mid.tangent.y < 0.0);
    }

    #[test]
    fn drawn_ellipse_matches_points() {
        let segment = CircleSegment::new(
            Point2::new(5.0, 5.0),
            2.0,
            Vector2::new(0.0, -1.0),
            Vector2::new(1.0, 0.0),
            false,
        );
        let mut recorder = PathRecorder::new();
        let (start, end) = segment.draw(&mut recorder, 0.25, 1.0, true);
        let PathOp::Ellipse(arc) = recorder.ops()[1] else {
            panic!("expected an ellipse");
        };
        assert_point_near(arc.point_at_angle(arc.start_angle), start.position);
        assert_point_near(arc.point_at_angle(arc.start_angle + arc.sweep()), end.position);
        assert_point_near(end.position, Point2::new(7.0, 5.0));
    }

    #[test]
    fn zero_angle_draws_nothing() {
        let segment = CircleSegment::new(
            Point2::origin(),
            1.0,
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 0.0),
            false,
        );
        let mut recorder = PathRecorder::new();
        segment.draw(&mut recorder, 0.0, 1.0, false);
        assert!(recorder.ops().is_empty());
        assert!(segment.arc_length().abs() < f64::EPSILON);
    }
}
