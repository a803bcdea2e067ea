use crate::geometry::{CubicBezierSegment, CurveProfile, KnotInfo, QuadBezierSegment, Segment};
use crate::math::{lerp_point, normalize_or_zero};

use super::half_angle_sine;

/// Joins whose handles are this close to mirrored are treated as smooth.
const BROKEN_HANDLE_THRESHOLD: f64 = 1e-4;

/// Builds the profile of a Bézier spline through a list of knots.
///
/// Each knot's handles are blended toward smooth handles computed from its
/// neighbours by the knot's [`KnotAuto`](crate::geometry::KnotAuto) weights.
/// The ends of an open spline become quadratic segments when their knot is
/// fully automatic.
#[derive(Debug)]
pub struct BezierSplineProfile {
    knots: Vec<KnotInfo>,
    closed: bool,
    smoothness: f64,
}

impl BezierSplineProfile {
    /// Creates a new spline profile operation.
    ///
    /// `smoothness` scales the automatically computed handles.
    #[must_use]
    pub fn new(knots: Vec<KnotInfo>, closed: bool, smoothness: f64) -> Self {
        Self {
            knots,
            closed,
            smoothness,
        }
    }

    /// Knots with their handles blended toward the smooth handles.
    #[must_use]
    pub fn resolved_knots(&self) -> Vec<KnotInfo> {
        let count = self.knots.len();
        (0..count)
            .map(|i| {
                let previous = &self.knots[(i + count - 1) % count];
                let next = &self.knots[(i + 1) % count];
                smooth_handles(&self.knots[i], previous, next, self.smoothness)
            })
            .collect()
    }

    /// Executes the operation. Fewer than two knots give an empty profile.
    #[must_use]
    pub fn execute(&self) -> CurveProfile {
        let mut profile = CurveProfile::new();
        if self.knots.len() < 2 {
            return profile;
        }

        let knots = self.resolved_knots();
        let count = knots.len();
        let first = &knots[0];
        let second = &knots[1];
        let last = &knots[count - 1];
        let second_to_last = &knots[count - 2];

        if !self.closed && first.auto.is_fully_auto() {
            profile.push(QuadBezierSegment::new(
                first.position,
                second.start_handle,
                second.position,
            ));
        } else {
            profile.push(cubic_between(first, second));
        }

        for pair in knots[1..count - 1].windows(2) {
            profile.push(cubic_between(&pair[0], &pair[1]));
        }

        if count > 2 {
            if !self.closed && last.auto.is_fully_auto() {
                profile.push(QuadBezierSegment::new(
                    second_to_last.position,
                    second_to_last.end_handle,
                    last.position,
                ));
            } else {
                profile.push(cubic_between(second_to_last, last));
            }
        }

        if self.closed {
            profile.push(cubic_between(last, first));
        }

        profile.min_sin = cubic_joint_min_sin(&profile.segments);
        profile
    }
}

fn cubic_between(start: &KnotInfo, end: &KnotInfo) -> CubicBezierSegment {
    CubicBezierSegment::new(start.position, start.end_handle, end.start_handle, end.position)
}

/// Blends the handles of `knot` toward the handles that connect it smoothly
/// to `previous` and `next`.
fn smooth_handles(
    knot: &KnotInfo,
    previous: &KnotInfo,
    next: &KnotInfo,
    smoothness: f64,
) -> KnotInfo {
    if knot.auto.is_manual() {
        return *knot;
    }

    let to_previous = (knot.position - previous.position).norm();
    let to_next = (next.position - knot.position).norm();
    let total = to_previous + to_next;
    let fa = if total > 0.0 {
        smoothness * to_previous / total
    } else {
        0.0
    };
    let fb = smoothness - fa;
    let span = next.position - previous.position;

    let start = knot.position - span * fa;
    let end = knot.position + span * fb;

    KnotInfo {
        start_handle: lerp_point(&knot.start_handle, &start, knot.auto.start()),
        end_handle: lerp_point(&knot.end_handle, &end, knot.auto.end()),
        ..*knot
    }
}

/// Smallest half-angle sine over the joins between two cubic segments whose
/// handles are broken.
fn cubic_joint_min_sin(segments: &[Segment]) -> f64 {
    let count = segments.len();
    let mut min_sin: f64 = 1.0;
    for i in 0..count {
        let (Some(a), Some(b)) = (segments[i].as_cubic(), segments[(i + 1) % count].as_cubic())
        else {
            continue;
        };

        let incoming = normalize_or_zero(&(a.p2() - a.p3()));
        let outgoing = normalize_or_zero(&(b.p1() - b.p0()));
        if 1.0 - incoming.dot(&outgoing).abs() <= BROKEN_HANDLE_THRESHOLD {
            continue;
        }
        min_sin = min_sin.min(half_angle_sine(&incoming, &outgoing));
    }
    min_sin
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Curve, KnotAuto};
    use crate::math::{Point2, Vector2};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn assert_point_near(actual: Point2, expected: Point2) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-9);
    }

    fn auto_knots(points: &[(f64, f64)]) -> Vec<KnotInfo> {
        points
            .iter()
            .map(|&(x, y)| KnotInfo::auto(Point2::new(x, y)))
            .collect()
    }

    #[test]
    fn too_few_knots() {
        let profile = BezierSplineProfile::new(auto_knots(&[(0.0, 0.0)]), true, 0.4).execute();
        assert!(profile.is_empty());
        assert_abs_diff_eq!(profile.min_sin, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn open_auto_spline_uses_quadratic_ends() {
        let knots = auto_knots(&[(0.0, 0.0), (100.0, 50.0), (200.0, 0.0), (300.0, 50.0)]);
        let profile = BezierSplineProfile::new(knots, false, 0.4).execute();
        assert_eq!(profile.segments.len(), 3);
        assert!(matches!(profile.segments[0], Segment::QuadBezier(_)));
        assert!(matches!(profile.segments[1], Segment::CubicBezier(_)));
        assert!(matches!(profile.segments[2], Segment::QuadBezier(_)));
        assert_point_near(profile.segments[2].end_point(), Point2::new(300.0, 50.0));

        let total: f64 = profile.segments.iter().map(Curve::arc_length).sum();
        assert_relative_eq!(total, profile.arc_length, max_relative = 1e-12);
    }

    #[test]
    fn closed_spline_is_all_cubic_and_smooth() {
        let knots = auto_knots(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);
        let profile = BezierSplineProfile::new(knots, true, 0.4).execute();
        assert_eq!(profile.segments.len(), 4);
        assert!(profile
            .segments
            .iter()
            .all(|segment| matches!(segment, Segment::CubicBezier(_))));
        assert_point_near(profile.segments[3].end_point(), Point2::new(0.0, 0.0));
        // Auto handles are mirrored, so no join is sharp.
        assert_abs_diff_eq!(profile.min_sin, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn two_knots() {
        let open = BezierSplineProfile::new(
            auto_knots(&[(0.0, 0.0), (100.0, 0.0)]),
            false,
            0.4,
        )
        .execute();
        assert_eq!(open.segments.len(), 1);
        assert_abs_diff_eq!(open.arc_length, 100.0, epsilon = 1e-6);

        let closed = BezierSplineProfile::new(
            auto_knots(&[(0.0, 0.0), (100.0, 0.0)]),
            true,
            0.4,
        )
        .execute();
        assert_eq!(closed.segments.len(), 2);
    }

    #[test]
    fn manual_handles_are_kept() {
        let knots = vec![
            KnotInfo::with_handles(
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 50.0),
            ),
            KnotInfo::mirrored(Point2::new(100.0, 0.0), Vector2::new(0.0, -50.0)),
            KnotInfo::with_handles(
                Point2::new(200.0, 0.0),
                Point2::new(200.0, 50.0),
                Point2::new(200.0, 0.0),
            ),
        ];
        let spline = BezierSplineProfile::new(knots.clone(), false, 0.4);
        assert_eq!(spline.resolved_knots(), knots);

        let profile = spline.execute();
        let Segment::CubicBezier(first) = &profile.segments[0] else {
            panic!("expected a cubic segment");
        };
        assert_point_near(*first.p1(), Point2::new(0.0, 50.0));
        assert_point_near(*first.p2(), Point2::new(100.0, 50.0));
        // Mirrored middle knot: no sharp join between the two cubics.
        assert_abs_diff_eq!(profile.min_sin, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn broken_handles_lower_min_sin() {
        let corner = KnotInfo::with_handles(
            Point2::new(100.0, 0.0),
            Point2::new(50.0, 0.0),
            Point2::new(100.0, 50.0),
        );
        let knots = vec![
            KnotInfo::with_handles(
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 0.0),
                Point2::new(50.0, 0.0),
            ),
            corner,
            KnotInfo::with_handles(
                Point2::new(100.0, 100.0),
                Point2::new(100.0, 50.0),
                Point2::new(100.0, 100.0),
            ),
        ];
        let profile = BezierSplineProfile::new(knots, false, 0.4).execute();
        assert_eq!(profile.segments.len(), 2);
        assert_abs_diff_eq!(
            profile.min_sin,
            std::f64::consts::FRAC_PI_4.sin(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn partial_auto_weight_blends_handles() {
        let knots = vec![
            KnotInfo::with_handles(
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 0.0),
            ),
            KnotInfo::new(
                Point2::new(100.0, 0.0),
                Point2::new(100.0, 0.0),
                Point2::new(100.0, 0.0),
                KnotAuto::new(0.5, 0.0).unwrap(),
            ),
            KnotInfo::with_handles(
                Point2::new(200.0, 0.0),
                Point2::new(200.0, 0.0),
                Point2::new(200.0, 0.0),
            ),
        ];
        let resolved = BezierSplineProfile::new(knots, false, 0.5).resolved_knots();
        // Halfway between the declared handle and the smooth one.
        assert_point_near(resolved[1].start_handle, Point2::new(75.0, 0.0));
        assert_point_near(resolved[1].end_handle, Point2::new(100.0, 0.0));
    }
}
