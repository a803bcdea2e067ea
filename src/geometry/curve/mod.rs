mod arc;
mod circle;
mod cubic_bezier;
mod line;
mod polynomial;
mod quad_bezier;
mod sampler;

pub use arc::ArcSegment;
pub use circle::CircleSegment;
pub use cubic_bezier::CubicBezierSegment;
pub use line::LineSegment;
pub use polynomial::PolynomialSegment;
pub use quad_bezier::QuadBezierSegment;
pub use sampler::UniformPolynomialCurveSampler;

use crate::geometry::CurvePoint;
use crate::math::Point2;
use crate::sink::PathSink;

/// Common contract of every profile segment.
///
/// Fractions passed to [`Curve::point_at`] and [`Curve::draw`] are portions of
/// the segment's arc length in `[0, 1]`.
pub trait Curve {
    /// Length of the segment. Never negative.
    fn arc_length(&self) -> f64;

    /// Position and direction at `fraction` of the arc length.
    fn point_at(&self, fraction: f64) -> CurvePoint;

    /// Draws the portion between `start` and `end` into `sink`, starting a
    /// new subpath first when `move_to` is set.
    ///
    /// Callers guarantee `0 <= start <= end <= 1`. Returns the curve points at
    /// both ends of the drawn portion.
    fn draw(
        &self,
        sink: &mut dyn PathSink,
        start: f64,
        end: f64,
        move_to: bool,
    ) -> (CurvePoint, CurvePoint);

    /// Defining points of the segment, used for bounds and transforms.
    fn points(&self) -> Vec<Point2>;

    /// Position where the segment begins.
    fn start_point(&self) -> Point2 {
        self.point_at(0.0).position
    }

    /// Position where the segment ends.
    fn end_point(&self) -> Point2 {
        self.point_at(1.0).position
    }
}
