//! Numerical arc-length rectification.
//!
//! Curves without a closed-form length (Bézier curves, elliptical arcs) are
//! measured by integrating their speed `|C'(t)|` over `[0, 1]` with a
//! composite 8-point Gauss–Legendre rule. The interval count is doubled until
//! two successive estimates agree.

/// Gauss–Legendre nodes and weights on `[-1, 1]`, as `(weight, abscissa)`.
const GAUSS_LEGENDRE_COEFFS_8: [(f64, f64); 8] = [
    (0.362_683_783_378_362_0, -0.183_434_642_495_649_8),
    (0.362_683_783_378_362_0, 0.183_434_642_495_649_8),
    (0.313_706_645_877_887_3, -0.525_532_409_916_329_0),
    (0.313_706_645_877_887_3, 0.525_532_409_916_329_0),
    (0.222_381_034_453_374_5, -0.796_666_477_413_626_7),
    (0.222_381_034_453_374_5, 0.796_666_477_413_626_7),
    (0.101_228_536_290_376_3, -0.960_289_856_497_536_3),
    (0.101_228_536_290_376_3, 0.960_289_856_497_536_3),
];

const INITIAL_INTERVALS: usize = 4;

/// Parameters controlling numerical arc-length computation.
#[derive(Debug, Clone, Copy)]
pub struct ArcLengthParams {
    /// Relative agreement required between successive estimates.
    pub accuracy: f64,
    /// Upper bound on the number of integration intervals.
    pub max_intervals: usize,
}

impl Default for ArcLengthParams {
    fn default() -> Self {
        Self {
            accuracy: 1e-9,
            max_intervals: 1024,
        }
    }
}

/// Integrates `speed` over `[0, 1]`, returning the arc length.
///
/// Non-finite results collapse to `0.0` so callers never see NaN lengths.
#[must_use]
pub fn rectify<F>(speed: F, params: &ArcLengthParams) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut intervals = INITIAL_INTERVALS;
    let mut previous = integrate(&speed, intervals);

    loop {
        intervals *= 2;
        let current = integrate(&speed, intervals);

        if !current.is_finite() {
            tracing::warn!("arc length integration produced a non-finite value");
            return 0.0;
        }

        let converged = (current - previous).abs() <= params.accuracy * current.abs().max(1.0);
        if converged {
            return current;
        }
        if intervals >= params.max_intervals {
            tracing::debug!(
                intervals,
                delta = (current - previous).abs(),
                "arc length did not converge, using last estimate"
            );
            return current;
        }
        previous = current;
    }
}

#[allow(clippy::cast_precision_loss)]
fn integrate<F>(speed: &F, intervals: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let width = 1.0 / intervals as f64;
    let half = width * 0.5;
    let mut sum = 0.0;
    for i in 0..intervals {
        let mid = (i as f64 + 0.5) * width;
        for (weight, x) in GAUSS_LEGENDRE_COEFFS_8 {
            sum += weight * speed(mid + half * x);
        }
    }
    sum * half
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn constant_speed() {
        let len = rectify(|_| 3.5, &ArcLengthParams::default());
        assert_relative_eq!(len, 3.5, max_relative = 1e-12);
    }

    #[test]
    fn quarter_circle_speed() {
        // A circle of radius 2 swept over a quarter turn.
        let len = rectify(|_| 2.0 * PI / 2.0, &ArcLengthParams::default());
        assert_relative_eq!(len, PI, max_relative = 1e-12);
    }

    #[test]
    fn ellipse_matches_series() {
        // Ellipse with a = 3, b = 1 over a full turn.
        let a: f64 = 3.0;
        let b: f64 = 1.0;
        let speed = |t: f64| {
            let angle = t * 2.0 * PI;
            2.0 * PI * ((a * angle.sin()).powi(2) + (b * angle.cos()).powi(2)).sqrt()
        };
        let len = rectify(speed, &ArcLengthParams::default());
        // Reference value of the complete elliptic integral 4aE(e).
        assert_relative_eq!(len, 13.364_893_220_555_262, max_relative = 1e-9);
    }

    #[test]
    fn non_finite_speed_is_zero() {
        let len = rectify(|_| f64::NAN, &ArcLengthParams::default());
        assert!(len.abs() < f64::EPSILON);
    }
}
