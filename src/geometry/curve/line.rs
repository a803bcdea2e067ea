use crate::geometry::CurvePoint;
use crate::math::{lerp_point, Point2, Vector2};
use crate::sink::PathSink;

use super::Curve;

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    from: Point2,
    to: Point2,
    length: f64,
}

impl LineSegment {
    /// Creates a new line between two points.
    #[must_use]
    pub fn new(from: Point2, to: Point2) -> Self {
        Self {
            from,
            to,
            length: (to - from).norm(),
        }
    }

    /// Returns the start point of the line.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.from
    }

    /// Returns the end point of the line.
    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.to
    }

    /// Unnormalized direction `to - from`.
    #[must_use]
    pub fn vector(&self) -> Vector2 {
        self.to - self.from
    }
}

impl Curve for LineSegment {
    fn arc_length(&self) -> f64 {
        self.length
    }

    fn point_at(&self, fraction: f64) -> CurvePoint {
        CurvePoint::new(lerp_point(&self.from, &self.to, fraction), self.vector())
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
        sink.line_to(end_point.position);

        (start_point, end_point)
    }

    fn points(&self) -> Vec<Point2> {
        vec![self.from, self.to]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{PathOp, PathRecorder};
    use approx::assert_abs_diff_eq;

    #[test]
    fn length_and_midpoint() {
        let line = LineSegment::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert_abs_diff_eq!(line.arc_length(), 5.0, epsilon = 1e-12);
        let mid = line.point_at(0.5);
        assert_abs_diff_eq!(mid.position.x, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(mid.tangent.x, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(mid.tangent.y, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_line_is_finite() {
        let p = Point2::new(2.0, 2.0);
        let line = LineSegment::new(p, p);
        assert!(line.arc_length().abs() < f64::EPSILON);
        let point = line.point_at(0.5);
        assert!(point.normal.x.is_finite() && point.normal.y.is_finite());
    }

    #[test]
    fn partial_draw() {
        let line = LineSegment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let mut recorder = PathRecorder::new();
        let (start, end) = line.draw(&mut recorder, 0.2, 0.7, true);
        assert_abs_diff_eq!(start.position.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(end.position.x, 7.0, epsilon = 1e-12);
        assert_eq!(
            recorder.ops(),
            &[
                PathOp::MoveTo(start.position),
                PathOp::LineTo(end.position),
            ]
        );
    }
}
