use crate::geometry::CurvePoint;
use crate::math::{remap, Polynomial2D};

/// Samples a polynomial curve uniformly by arc length.
///
/// The native parameter `t` of a Bézier curve does not advance proportionally
/// to distance. The sampler tabulates the distance travelled at evenly spaced
/// `t` values and inverts that table piecewise linearly.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformPolynomialCurveSampler {
    curve: Polynomial2D,
    arc_length: f64,
    sampled_distances: Vec<f64>,
}

impl UniformPolynomialCurveSampler {
    /// Number of samples taken when none is specified.
    pub const DEFAULT_SAMPLES: usize = 20;

    /// Creates a sampler for `curve` whose authoritative length is
    /// `arc_length`.
    #[must_use]
    pub fn new(curve: Polynomial2D, arc_length: f64, samples: usize) -> Self {
        let mut sampler = Self {
            curve,
            arc_length,
            sampled_distances: Vec::new(),
        };
        sampler.resample(samples);
        sampler
    }

    /// Discards the table and samples the curve again at `samples` points.
    ///
    /// At least two samples are always taken.
    #[allow(clippy::cast_precision_loss)]
    pub fn resample(&mut self, samples: usize) {
        let samples = samples.max(2);
        self.sampled_distances.clear();
        self.sampled_distances.reserve(samples);
        self.sampled_distances.push(0.0);

        let mut length = 0.0;
        let mut previous = self.curve.eval(0.0);
        for i in 1..samples {
            let t = i as f64 / (samples - 1) as f64;
            let position = self.curve.eval(t);
            length += (position - previous).norm();
            self.sampled_distances.push(length);
            previous = position;
        }

        // The last entry carries the accumulated chord error; pin it.
        if let Some(last) = self.sampled_distances.last_mut() {
            *last = self.arc_length;
        }
    }

    /// Number of entries in the distance table.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.sampled_distances.len()
    }

    /// Curve parameter of the point `distance` along the curve.
    ///
    /// Distances outside `[0, arc_length]` are clamped.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distance_to_t(&self, distance: f64) -> f64 {
        let distance = distance.clamp(0.0, self.arc_length.max(0.0));
        let last = (self.sampled_distances.len() - 1) as f64;

        for (i, pair) in self.sampled_distances.windows(2).enumerate() {
            let (lower, upper) = (pair[0], pair[1]);
            if distance >= lower && distance <= upper {
                return remap(
                    lower,
                    upper,
                    i as f64 / last,
                    (i + 1) as f64 / last,
                    distance,
                );
            }
        }

        1.0
    }

    /// The point `distance` along the curve.
    #[must_use]
    pub fn point_at_distance(&self, distance: f64) -> CurvePoint {
        let t = self.distance_to_t(distance);
        CurvePoint::new(self.curve.eval(t), self.curve.eval_derivative(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{rectify, ArcLengthParams, Point2, Vector2};
    use approx::assert_abs_diff_eq;

    fn cubic(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> Polynomial2D {
        Polynomial2D::from_coefficients(
            p0.coords,
            (p1 - p0) * 3.0,
            p0.coords * 3.0 - p1.coords * 6.0 + p2.coords * 3.0,
            -p0.coords + p1.coords * 3.0 - p2.coords * 3.0 + p3.coords,
        )
    }

    fn length_to(curve: &Polynomial2D, t: f64) -> f64 {
        rectify(
            |s| curve.eval_derivative(s * t).norm() * t,
            &ArcLengthParams::default(),
        )
    }

    #[test]
    fn straight_line_is_linear() {
        let curve = Polynomial2D::from_coefficients(
            Vector2::zeros(),
            Vector2::new(10.0, 0.0),
            Vector2::zeros(),
            Vector2::zeros(),
        );
        let sampler = UniformPolynomialCurveSampler::new(
            curve,
            10.0,
            UniformPolynomialCurveSampler::DEFAULT_SAMPLES,
        );
        assert_eq!(sampler.sample_count(), 20);
        assert_abs_diff_eq!(sampler.distance_to_t(2.5), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(sampler.distance_to_t(-4.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sampler.distance_to_t(40.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn round_trip_against_integration() {
        let curve = cubic(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 100.0),
            Point2::new(100.0, 100.0),
            Point2::new(100.0, 0.0),
        );
        let total = length_to(&curve, 1.0);
        let sampler = UniformPolynomialCurveSampler::new(curve, total, 200);

        for i in 1..10 {
            let d = total * f64::from(i) / 10.0;
            let t = sampler.distance_to_t(d);
            // The true distance at the chosen parameter.
            assert_abs_diff_eq!(length_to(&curve, t), d, epsilon = total * 1e-3);
        }
    }

    #[test]
    fn zero_length_curve() {
        let curve = Polynomial2D::from_coefficients(
            Vector2::new(4.0, 4.0),
            Vector2::zeros(),
            Vector2::zeros(),
            Vector2::zeros(),
        );
        let sampler = UniformPolynomialCurveSampler::new(curve, 0.0, 20);
        let t = sampler.distance_to_t(0.0);
        assert!(t.is_finite());
        let point = sampler.point_at_distance(0.0);
        assert_eq!(point.position, Point2::new(4.0, 4.0));
        assert!(point.tangent.x.is_finite());
    }
}
