use std::f64::consts::{PI, TAU};

use crate::geometry::{BBox, CurvePoint};
use crate::math::arc_2d::{endpoint_to_center, CenterArc};
use crate::math::{rectify, ArcLengthParams, Point2, Vector2};
use crate::sink::{EllipseArc, PathSink};

use super::Curve;

/// An elliptical arc in SVG endpoint form.
///
/// The center form is resolved at construction; radii that cannot span the
/// endpoints are scaled up uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    start: Point2,
    end: Point2,
    large_arc: bool,
    sweep: bool,
    arc: CenterArc,
    length: f64,
}

impl ArcSegment {
    /// Creates an arc from `start` to `end`.
    ///
    /// `x_axis_rotation` is given in degrees.
    #[must_use]
    pub fn new(
        start: Point2,
        radius: Vector2,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: Point2,
    ) -> Self {
        let arc = endpoint_to_center(
            &start,
            &end,
            &radius,
            x_axis_rotation.to_radians(),
            large_arc,
            sweep,
        );
        let length = arc_length_of(&arc);

        Self {
            start,
            end,
            large_arc,
            sweep,
            arc,
            length,
        }
    }

    /// Returns the start point of the arc.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Returns the end point of the arc.
    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    /// Returns the center of the ellipse.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.arc.center
    }

    /// Radii after out-of-range correction.
    #[must_use]
    pub fn radii(&self) -> &Vector2 {
        &self.arc.radii
    }

    /// Rotation of the ellipse x axis, in radians.
    #[must_use]
    pub fn x_axis_rotation(&self) -> f64 {
        self.arc.x_axis_rotation
    }

    /// Returns the ellipse angle at the start point, in radians.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.arc.start_angle
    }

    /// Returns the signed swept angle, in radians.
    #[must_use]
    pub fn delta_angle(&self) -> f64 {
        self.arc.delta_angle
    }

    /// Returns the SVG large-arc flag.
    #[must_use]
    pub fn large_arc(&self) -> bool {
        self.large_arc
    }

    /// Returns the SVG sweep flag.
    #[must_use]
    pub fn sweep(&self) -> bool {
        self.sweep
    }

    /// Exact bounds of the swept arc.
    #[must_use]
    pub fn bbox(&self) -> BBox {
        let mut candidates = vec![self.start, self.end];
        let (sin, cos) = self.arc.x_axis_rotation.sin_cos();
        let rx = self.arc.radii.x;
        let ry = self.arc.radii.y;

        let x_extreme = (-ry * sin).atan2(rx * cos);
        let y_extreme = (ry * cos).atan2(rx * sin);
        for base in [x_extreme, y_extreme] {
            for angle in [base, base + PI] {
                if self.contains_angle(angle) {
                    candidates.push(self.arc.point_at_angle(angle));
                }
            }
        }

        BBox::from_points(&candidates)
    }

    fn contains_angle(&self, angle: f64) -> bool {
        let delta = self.arc.delta_angle;
        let offset = if delta >= 0.0 {
            (angle - self.arc.start_angle).rem_euclid(TAU)
        } else {
            (self.arc.start_angle - angle).rem_euclid(TAU)
        };
        offset <= delta.abs()
    }

    fn is_degenerate(&self) -> bool {
        self.arc.delta_angle.abs() < f64::EPSILON
    }

    fn direction_at(&self, angle: f64) -> Vector2 {
        self.arc.derivative_at_angle(angle) * self.arc.delta_angle.signum()
    }
}

fn arc_length_of(arc: &CenterArc) -> f64 {
    if arc.delta_angle.abs() < f64::EPSILON {
        return 0.0;
    }
    if arc.is_circular() {
        return arc.radii.x * arc.delta_angle.abs();
    }
    let sweep = arc.delta_angle.abs();
    rectify(
        |t| arc.derivative_at_angle(arc.angle_at(t)).norm() * sweep,
        &ArcLengthParams::default(),
    )
}

impl Curve for ArcSegment {
    fn arc_length(&self) -> f64 {
        self.length
    }

    #[allow(clippy::float_cmp)]
    fn point_at(&self, fraction: f64) -> CurvePoint {
        if self.is_degenerate() {
            return CurvePoint::new(self.start, self.end - self.start);
        }

        let angle = self.arc.angle_at(fraction);
        let position = if fraction == 0.0 {
            self.start
        } else if fraction == 1.0 {
            self.end
        } else {
            self.arc.point_at_angle(angle)
        };
        CurvePoint::new(position, self.direction_at(angle))
    }

    fn draw(
        &self,
        sink: &mut dyn PathSink,
        start: f64,
        end: f64,
        move_to: bool,
    ) -> (CurvePoint, CurvePoint) {
        let start_point = self.point_at(start);
        let end_point = self.point_at(end);

        if move_to {
            sink.move_to(start_point.position);
        }

        if self.is_degenerate() {
            sink.line_to(end_point.position);
        } else {
            sink.ellipse(EllipseArc {
                center: self.arc.center,
                radii: self.arc.radii,
                rotation: self.arc.x_axis_rotation,
                start_angle: self.arc.angle_at(start),
                end_angle: self.arc.angle_at(end),
                counterclockwise: self.arc.delta_angle < 0.0,
            });
        }

        (start_point, end_point)
    }

    fn points(&self) -> Vec<Point2> {
        let bbox = self.bbox();
        vec![bbox.min, bbox.max]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{PathOp, PathRecorder};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn assert_point_near(actual: Point2, expected: Point2) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-9);
    }

    #[test]
    fn quarter_circle() {
        let arc = ArcSegment::new(
            Point2::new(10.0, 0.0),
            Vector2::new(10.0, 10.0),
            0.0,
            false,
            true,
            Point2::new(0.0, 10.0),
        );
        assert_relative_eq!(arc.arc_length(), 5.0 * PI, max_relative = 1e-12);
        let mid = arc.point_at(0.5);
        let h = 10.0 / 2.0_f64.sqrt();
        assert_point_near(mid.position, Point2::new(h, h));
        assert_abs_diff_eq!(mid.tangent.x, -(0.5_f64.sqrt()), epsilon = 1e-9);
        assert_abs_diff_eq!(mid.tangent.y, 0.5_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn half_ellipse_length() {
        // Upper half of the 100×50 ellipse centered at the origin.
        let arc = ArcSegment::new(
            Point2::new(100.0, 0.0),
            Vector2::new(100.0, 50.0),
            0.0,
            false,
            true,
            Point2::new(-100.0, 0.0),
        );
        assert_relative_eq!(arc.arc_length(), 484.422_411_027_392_06 / 2.0, max_relative = 1e-8);
    }

    #[test]
    fn endpoints_are_exact() {
        let start = Point2::new(1.0, 2.0);
        let end = Point2::new(40.0, -7.0);
        let arc = ArcSegment::new(start, Vector2::new(30.0, 12.0), 30.0, true, true, end);
        assert_eq!(arc.point_at(0.0).position, start);
        assert_eq!(arc.point_at(1.0).position, end);
    }

    #[test]
    fn draw_emits_ellipse() {
        let arc = ArcSegment::new(
            Point2::new(10.0, 0.0),
            Vector2::new(10.0, 10.0),
            0.0,
            false,
            false,
            Point2::new(0.0, 10.0),
        );
        let mut recorder = PathRecorder::new();
        arc.draw(&mut recorder, 0.0, 1.0, true);
        let ops = recorder.ops();
        assert_eq!(ops.len(), 2);
        let PathOp::Ellipse(ellipse) = ops[1] else {
            panic!("expected an ellipse, got {:?}", ops[1]);
        };
        assert!(ellipse.counterclockwise);
        assert_abs_diff_eq!(ellipse.sweep(), arc.delta_angle(), epsilon = 1e-9);
        assert_relative_eq!(arc.arc_length(), 5.0 * PI, max_relative = 1e-12);
    }

    #[test]
    fn bbox_covers_swept_part_only() {
        // Quarter arc in the first quadrant.
        let arc = ArcSegment::new(
            Point2::new(10.0, 0.0),
            Vector2::new(10.0, 10.0),
            0.0,
            false,
            true,
            Point2::new(0.0, 10.0),
        );
        let bbox = arc.bbox();
        assert_point_near(bbox.min, Point2::new(0.0, 0.0));
        assert_point_near(bbox.max, Point2::new(10.0, 10.0));

        let flipped = ArcSegment::new(
            Point2::new(10.0, 0.0),
            Vector2::new(10.0, 10.0),
            0.0,
            true,
            false,
            Point2::new(0.0, 10.0),
        );
        let bbox = flipped.bbox();
        assert_point_near(bbox.min, Point2::new(-10.0, -10.0));
        assert_point_near(bbox.max, Point2::new(10.0, 10.0));
    }

    #[test]
    fn coincident_endpoints() {
        let p = Point2::new(5.0, 5.0);
        let arc = ArcSegment::new(p, Vector2::new(3.0, 3.0), 0.0, false, true, p);
        assert!(arc.arc_length().abs() < f64::EPSILON);
        let mid = arc.point_at(0.5);
        assert_eq!(mid.position, p);
        assert!(mid.tangent.x.is_finite());
    }
}
