use crate::geometry::{BBox, CurvePoint};
use crate::math::{rectify, ArcLengthParams, Point2, Polynomial2D};
use crate::sink::PathSink;

use super::{Curve, UniformPolynomialCurveSampler};

/// Shared behaviour of Bézier segments backed by a [`Polynomial2D`].
///
/// Implementors supply the polynomial, the sampler built for it and their
/// native subdivision; fractional queries go through the sampler so that
/// fractions are proportional to arc length.
pub trait PolynomialSegment: Curve + Sized {
    fn polynomial(&self) -> &Polynomial2D;

    fn sampler(&self) -> &UniformPolynomialCurveSampler;

    /// Splits at curve parameter `t` into two segments of the same kind.
    #[must_use]
    fn split(&self, t: f64) -> (Self, Self);

    /// Draws the part between curve parameters `start_t` and `end_t` with a
    /// single native curve call. Returns the positions at both ends.
    fn draw_between(
        &self,
        sink: &mut dyn PathSink,
        start_t: f64,
        end_t: f64,
        move_to: bool,
    ) -> (Point2, Point2);

    /// Position and direction at curve parameter `t`.
    fn eval(&self, t: f64) -> CurvePoint {
        CurvePoint::new(self.polynomial().eval(t), self.polynomial().eval_derivative(t))
    }

    /// Tight bounds of the curve, not of its control polygon.
    fn bbox(&self) -> BBox {
        self.polynomial().bounds()
    }

    /// Point at `fraction` of the arc length.
    fn point_at_fraction(&self, fraction: f64) -> CurvePoint {
        self.sampler().point_at_distance(self.arc_length() * fraction)
    }

    /// Draws the portion between two arc-length fractions.
    #[allow(clippy::float_cmp)]
    fn draw_range(
        &self,
        sink: &mut dyn PathSink,
        start: f64,
        end: f64,
        move_to: bool,
    ) -> (CurvePoint, CurvePoint) {
        let (start_t, end_t) = if start == 0.0 && end == 1.0 {
            (0.0, 1.0)
        } else {
            let length = self.arc_length();
            (
                self.sampler().distance_to_t(length * start),
                self.sampler().distance_to_t(length * end),
            )
        };

        let (start_position, end_position) = self.draw_between(sink, start_t, end_t, move_to);

        (
            CurvePoint::new(start_position, self.polynomial().eval_derivative(start_t)),
            CurvePoint::new(end_position, self.polynomial().eval_derivative(end_t)),
        )
    }
}

/// Arc length of `curve` over `t ∈ [0, 1]`.
pub(super) fn polynomial_length(curve: &Polynomial2D) -> f64 {
    rectify(
        |t| curve.eval_derivative(t).norm(),
        &ArcLengthParams::default(),
    )
}

/// Parameter of `end_t` within the curve that remains after splitting at
/// `start_t`.
pub(super) fn relative_end_t(start_t: f64, end_t: f64) -> f64 {
    let rest = 1.0 - start_t;
    if rest <= f64::EPSILON {
        0.0
    } else {
        ((end_t - start_t) / rest).clamp(0.0, 1.0)
    }
}
