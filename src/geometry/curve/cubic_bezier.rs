use crate::geometry::CurvePoint;
use crate::math::{lerp_point, Point2, Polynomial2D};
use crate::sink::PathSink;

use super::polynomial::{polynomial_length, relative_end_t};
use super::{Curve, PolynomialSegment, UniformPolynomialCurveSampler};

/// A cubic Bézier segment.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicBezierSegment {
    p0: Point2,
    p1: Point2,
    p2: Point2,
    p3: Point2,
    curve: Polynomial2D,
    length: f64,
    sampler: UniformPolynomialCurveSampler,
}

impl CubicBezierSegment {
    /// Creates a new cubic segment from its control points.
    #[must_use]
    pub fn new(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Self {
        let curve = Polynomial2D::from_coefficients(
            p0.coords,
            (p1 - p0) * 3.0,
            p0.coords * 3.0 - p1.coords * 6.0 + p2.coords * 3.0,
            -p0.coords + p1.coords * 3.0 - p2.coords * 3.0 + p3.coords,
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
            p3,
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

    /// Returns the control point leaving the start.
    #[must_use]
    pub fn p1(&self) -> &Point2 {
        &self.p1
    }

    /// Returns the control point entering the end.
    #[must_use]
    pub fn p2(&self) -> &Point2 {
        &self.p2
    }

    /// Returns the end point.
    #[must_use]
    pub fn p3(&self) -> &Point2 {
        &self.p3
    }

    fn control_points(&self) -> [Point2; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }
}

/// De Casteljau subdivision of a cubic control polygon at `t`.
fn subdivide(points: [Point2; 4], t: f64) -> ([Point2; 4], [Point2; 4]) {
    let [p0, p1, p2, p3] = points;
    let a = lerp_point(&p0, &p1, t);
    let b = lerp_point(&p1, &p2, t);
    let c = lerp_point(&p2, &p3, t);
    let d = lerp_point(&a, &b, t);
    let e = lerp_point(&b, &c, t);
    let p = lerp_point(&d, &e, t);

    ([p0, a, d, p], [p, e, c, p3])
}

impl PolynomialSegment for CubicBezierSegment {
    fn polynomial(&self) -> &Polynomial2D {
        &self.curve
    }

    fn sampler(&self) -> &UniformPolynomialCurveSampler {
        &self.sampler
    }

    fn split(&self, t: f64) -> (Self, Self) {
        let (left, right) = subdivide(self.control_points(), t);
        (
            Self::new(left[0], left[1], left[2], left[3]),
            Self::new(right[0], right[1], right[2], right[3]),
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
        sink.bezier_curve_to(points[1], points[2], points[3]);

        (points[0], points[3])
    }
}

impl Curve for CubicBezierSegment {
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
