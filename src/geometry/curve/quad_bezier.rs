use crate::geometry::CurvePoint;
use crate::math::{lerp_point, Point2, Polynomial2D, Vector2};
use crate::sink::PathSink;

use super::polynomial::{polynomial_length, relative_end_t};
use super::{Curve, PolynomialSegment, UniformPolynomialCurveSampler};

/// A quadratic Bézier segment.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadBezierSegment {
    p0: Point2,
    p1: Point2,
    p2: Point2,
    curve: Polynomial2D,
    length: f64,
    sampler: UniformPolynomialCurveSampler,
}

impl QuadBezierSegment {
    /// Creates a new quadratic segment from its control points.
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2) -> Self {
        let curve = Polynomial2D::from_coefficients(
            p0.coords,
            (p1 - p0) * 2.0,
            p0.coords - p1.coords * 2.0 + p2.coords,
            Vector2::zeros(),
        );
        let length = polynomial_length(&curve);
        let sampler = UniformPolynomialCurveSampler::new(
            curve,
            length,
            UniformPolynomialCurveSampler::DEFAULT_SAMPLES,
        );

        Self {
            p0,
            p1,
            p2,
            curve,
            length,
            sampler,
        }
    }

    /// Returns the start point.
    #[must_use]
    pub fn p0(&self) -> &Point2 {
        &self.p0
    }

    /// Returns the control point.
    #[must_use]
    pub fn p1(&self) -> &Point2 {
        &self.p1
    }

    /// Returns the end point.
    #[must_use]
    pub fn p2(&self) -> &Point2 {
        &self.p2
    }

    fn control_points(&self) -> [Point2; 3] {
        [self.p0, self.p1, self.p2]
    }
}

fn subdivide(points: [Point2; 3], t: f64) -> ([Point2; 3], [Point2; 3]) {
    let [p0, p1, p2] = points;
    let a = lerp_point(&p0, &p1, t);
    let b = lerp_point(&p1, &p2, t);
    let p = lerp_point(&a, &b, t);

    ([p0, a, p], [p, b, p2])
}

impl PolynomialSegment for QuadBezierSegment {
    fn polynomial(&self) -> &Polynomial2D {
        &self.curve
    }

    fn sampler(&self) -> &UniformPolynomialCurveSampler {
        &self.sampler
    }

    fn split(&self, t: f64) -> (Self, Self) {
        let (left, right) = subdivide(self.control_points(), t);
        (
            Self::new(left[0], left[1], left[2]),
            Self::new(right[0], right[1], right[2]),
        )
    }

    #[allow(clippy::float_cmp)]
    fn draw_between(
        &self,
        sink: &mut dyn PathSink,
        start_t: f64,
        end_t: f64,
        move_to: bool,
    ) -> (Point2, Point2) {
        let points = if start_t == 0.0 && end_t == 1.0 {
            self.control_points()
        } else {
            let (_, rest) = subdivide(self.control_points(), start_t);
            subdivide(rest, relative_end_t(start_t, end_t)).0
        };

        if move_to {
            sink.move_to(points[0]);
        }
        sink.quadratic_curve_to(points[1], points[2]);

        (points[0], points[2])
    }
}

impl Curve for QuadBezierSegment {
    fn arc_length(&self) -> f64 {
        self.length
    }

    fn point_at(&self, fraction: f64) -> CurvePoint {
        self.point_at_fraction(fraction)
    }

    fn draw(
        &self,
        sink: &mut dyn PathSink,
        start: f64,
        end: f64,
        move_to: bool,
    ) -> (CurvePoint, CurvePoint) {
        self.draw_range(sink, start, end, move_to)
    }

    fn points(&self) -> Vec<Point2> {
        self.control_points().to_vec()
    }
}
