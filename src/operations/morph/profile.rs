use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{
    ArcSegment, CircleSegment, CubicBezierSegment, Curve, CurveProfile, LineSegment,
    QuadBezierSegment, Segment,
};
use crate::math::polygon_2d::{
    bisect, polyline_length, remove_recurring_point, round_points, signed_area_2d,
};
use crate::math::{lerp_point, points_equal, Point2, Vector2};
use crate::operations::profile::{half_angle_sine, joint_min_sin, PolylineProfile};

use super::points::{best_rotation, lerp_distance, lerp_points};

/// Polygonisation settings for profile morphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphParams {
    /// Maximum distance between neighbouring polygon points.
    pub precision: f64,
    /// Decimal places the polygon points are rounded to.
    pub round: u32,
}

impl Default for MorphParams {
    fn default() -> Self {
        Self {
            precision: 5.0,
            round: 4,
        }
    }
}

impl MorphParams {
    /// Creates validated morph parameters.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if `precision` is not a
    /// positive finite number.
    pub fn new(precision: f64, round: u32) -> Result<Self> {
        if !(precision.is_finite() && precision > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "morph precision must be positive, got {precision}"
            ))
            .into());
        }
        Ok(Self { precision, round })
    }
}

/// One connected run of segments.
#[derive(Debug)]
struct Subcurve {
    profile: CurveProfile,
    closed: bool,
}

/// Span of an open polygon that was closed by walking back along itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ForceClosed {
    first: usize,
    last: usize,
}

/// Polygon approximation of a subcurve. Closed polygons do not repeat
/// their first point.
#[derive(Debug, Clone, PartialEq)]
struct Polygon {
    points: Vec<Point2>,
    closed: bool,
    force_closed: Option<ForceClosed>,
}

impl Polygon {
    fn from_subcurve(curve: &Subcurve, precision: f64) -> Self {
        let points = exact_polygon_points(curve, precision)
            .unwrap_or_else(|| approximate_polygon_points(curve, precision));
        Self {
            points,
            closed: curve.closed,
            force_closed: None,
        }
    }

    /// Closes an open polygon by appending its inner points in reverse.
    fn force_close(&mut self) {
        let last = self.points.len().saturating_sub(1);
        if last > 1 {
            let mut back = self.points[1..last].to_vec();
            back.reverse();
            self.points.extend(back);
        }
        self.closed = true;
        self.force_closed = Some(ForceClosed { first: 0, last });
    }

    /// Inserts `count` points spaced evenly along the outline.
    fn add_points(&mut self, count: usize) {
        if count == 0 || self.points.is_empty() {
            return;
        }

        let desired = self.points.len() + count;
        #[allow(clippy::cast_precision_loss)]
        let step = polyline_length(&self.points) / count as f64;
        let mut i = 0;
        let mut cursor = 0.0;
        let mut insert_at = step / 2.0;

        while self.points.len() < desired {
            let len = self.points.len();
            let a = self.points[i % len];
            let b = self.points[(i + 1) % len];
            let length = (b - a).norm();

            if insert_at <= cursor + length {
                let point = if length > 0.0 {
                    lerp_point(&a, &b, (insert_at - cursor) / length)
                } else {
                    a
                };
                let index = i % len + 1;
                self.points.insert(index, point);
                if let Some(markers) = &mut self.force_closed {
                    if index <= markers.first {
                        markers.first += 1;
                    }
                    if index <= markers.last {
                        markers.last += 1;
                    }
                }
                insert_at += step;
            } else {
                cursor += length;
                i += 1;
            }
        }
    }

    /// Reorders the points to travel the least toward `reference`.
    fn rotate_toward(&mut self, reference: &Polygon) {
        if self.closed {
            let offset = best_rotation(&self.points, &reference.points);
            if offset == 0 {
                return;
            }
            let len = self.points.len();
            self.points.rotate_left(offset);
            if let Some(markers) = &mut self.force_closed {
                markers.first = (markers.first + len - offset) % len;
                markers.last = (markers.last + len - offset) % len;
            }
        } else {
            let mut reversed = self.points.clone();
            reversed.reverse();
            if lerp_distance(&reversed, &reference.points, 0)
                < lerp_distance(&self.points, &reference.points, 0)
            {
                self.points = reversed;
            }
        }
    }

    fn normalize_markers(&mut self) {
        if let Some(markers) = &mut self.force_closed {
            if markers.first > markers.last {
                std::mem::swap(&mut markers.first, &mut markers.last);
            }
        }
    }
}

/// Splits a profile wherever a segment does not start where the previous
/// one ended.
fn split_curve(profile: &CurveProfile) -> Vec<Subcurve> {
    let mut subcurves: Vec<Subcurve> = Vec::new();
    let mut end: Option<Point2> = None;

    for segment in &profile.segments {
        let start = segment.start_point();
        let connected = end.is_some_and(|end| points_equal(&start, &end));
        if !connected || subcurves.is_empty() {
            subcurves.push(Subcurve {
                profile: CurveProfile::new(),
                closed: false,
            });
        }
        if let Some(current) = subcurves.last_mut() {
            current.profile.push(segment.clone());
        }
        end = Some(segment.end_point());
    }

    for subcurve in &mut subcurves {
        let segments = &subcurve.profile.segments;
        if let (Some(first), Some(last)) = (segments.first(), segments.last()) {
            subcurve.closed = points_equal(&first.start_point(), &last.end_point());
        }
    }

    subcurves
}

/// Pads `subcurves` with degenerate open subcurves placed at the start of the
/// matching `reference` subcurve.
fn balance_subcurves(subcurves: &mut Vec<Subcurve>, reference: &[Subcurve]) {
    for extra in reference.iter().skip(subcurves.len()) {
        let point = extra
            .profile
            .segments
            .first()
            .map_or_else(Point2::origin, Curve::start_point);
        let mut profile = CurveProfile::new();
        profile.push(LineSegment::new(point, point));
        subcurves.push(Subcurve {
            profile,
            closed: false,
        });
    }
}

/// Polygon of a line-only subcurve, or `None` if it holds any curve.
fn exact_polygon_points(curve: &Subcurve, precision: f64) -> Option<Vec<Point2>> {
    let mut points = Vec::with_capacity(curve.profile.segments.len() + 1);
    let mut end: Option<Point2> = None;
    for segment in &curve.profile.segments {
        let Segment::Line(line) = segment else {
            return None;
        };
        points.push(*line.start());
        end = Some(*line.end());
    }

    if let Some(end) = end {
        if !points_equal(&end, &points[0]) {
            points.push(end);
        }
    }
    remove_recurring_point(&mut points);
    bisect(&mut points, curve.closed, precision);
    Some(points)
}

/// Polygon sampled evenly by distance, wound the same way for every shape.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn approximate_polygon_points(curve: &Subcurve, precision: f64) -> Vec<Point2> {
    let length = curve.profile.arc_length;
    let count = ((length / precision).ceil() as usize).max(3);
    let divisor = if curve.closed { count } else { count - 1 };

    let mut points: Vec<Point2> = (0..count)
        .map(|i| {
            let distance = length * (i as f64 / divisor as f64);
            curve.profile.point_at_distance(distance).position
        })
        .collect();

    if signed_area_2d(&points) < 0.0 {
        points.reverse();
    }
    remove_recurring_point(&mut points);
    points
}

/// Returns `true` if two segments can be blended control point by control
/// point.
fn same_kind(a: &Segment, b: &Segment) -> bool {
    match (a, b) {
        (Segment::Line(_), Segment::Line(_))
        | (Segment::QuadBezier(_), Segment::QuadBezier(_))
        | (Segment::CubicBezier(_), Segment::CubicBezier(_)) => true,
        (Segment::Arc(a), Segment::Arc(b)) => {
            a.large_arc() == b.large_arc() && a.sweep() == b.sweep()
        }
        (Segment::Circle(a), Segment::Circle(b)) => a.counter() == b.counter(),
        _ => false,
    }
}

fn same_topology(from: &Subcurve, to: &Subcurve) -> bool {
    let a = &from.profile.segments;
    let b = &to.profile.segments;
    from.closed == to.closed
        && !a.is_empty()
        && a.len() == b.len()
        && a.iter().zip(b).all(|(a, b)| same_kind(a, b))
}

fn lerp_scalar(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_direction(a: &Vector2, b: &Vector2, t: f64) -> Vector2 {
    a.lerp(b, t).try_normalize(f64::EPSILON).unwrap_or(*a)
}

/// Blends two segments of the same kind, or `None` for mismatched kinds.
fn lerp_segment(a: &Segment, b: &Segment, t: f64) -> Option<Segment> {
    let segment = match (a, b) {
        (Segment::Line(a), Segment::Line(b)) => LineSegment::new(
            lerp_point(a.start(), b.start(), t),
            lerp_point(a.end(), b.end(), t),
        )
        .into(),
        (Segment::QuadBezier(a), Segment::QuadBezier(b)) => QuadBezierSegment::new(
            lerp_point(a.p0(), b.p0(), t),
            lerp_point(a.p1(), b.p1(), t),
            lerp_point(a.p2(), b.p2(), t),
        )
        .into(),
        (Segment::CubicBezier(a), Segment::CubicBezier(b)) => CubicBezierSegment::new(
            lerp_point(a.p0(), b.p0(), t),
            lerp_point(a.p1(), b.p1(), t),
            lerp_point(a.p2(), b.p2(), t),
            lerp_point(a.p3(), b.p3(), t),
        )
        .into(),
        (Segment::Arc(a), Segment::Arc(b)) => ArcSegment::new(
            lerp_point(a.start(), b.start(), t),
            a.radii().lerp(b.radii(), t),
            lerp_scalar(a.x_axis_rotation(), b.x_axis_rotation(), t).to_degrees(),
            a.large_arc(),
            a.sweep(),
            lerp_point(a.end(), b.end(), t),
        )
        .into(),
        (Segment::Circle(a), Segment::Circle(b)) => CircleSegment::new(
            lerp_point(a.center(), b.center(), t),
            lerp_scalar(a.radius(), b.radius(), t),
            lerp_direction(a.start_direction(), b.start_direction(), t),
            lerp_direction(a.end_direction(), b.end_direction(), t),
            a.counter(),
        )
        .into(),
        _ => return None,
    };
    Some(segment)
}

/// Smallest half-angle sine over the inner joins of an open run.
fn open_joint_min_sin(segments: &[Segment]) -> f64 {
    segments
        .windows(2)
        .map(|pair| {
            let incoming = -pair[0].point_at(1.0).tangent;
            let outgoing = pair[1].point_at(0.0).tangent;
            half_angle_sine(&incoming, &outgoing)
        })
        .fold(1.0, f64::min)
}

/// How one pair of subcurves is tweened.
#[derive(Debug, Clone, PartialEq)]
enum SubcurveLerp {
    /// Matching segment kinds, blended control point by control point.
    Segments {
        from: Vec<Segment>,
        to: Vec<Segment>,
        closed: bool,
    },
    /// Anything else, blended through equal-sized polygons.
    Polygons { from: Polygon, to: Polygon },
}

impl SubcurveLerp {
    fn at(&self, progress: f64, profile: &mut CurveProfile) {
        match self {
            Self::Segments { from, to, closed } => {
                let segments: Vec<Segment> = if progress <= 0.0 {
                    from.clone()
                } else if progress >= 1.0 {
                    to.clone()
                } else {
                    from.iter()
                        .zip(to)
                        .filter_map(|(a, b)| lerp_segment(a, b, progress))
                        .collect()
                };
                let mut run = CurveProfile::new();
                for segment in segments {
                    run.push(segment);
                }
                run.min_sin = if *closed {
                    joint_min_sin(&run.segments)
                } else {
                    open_joint_min_sin(&run.segments)
                };
                profile.extend(run);
            }
            Self::Polygons { from, to } => {
                let points = lerp_points(&from.points, &to.points, progress);
                let run = to
                    .force_closed
                    .or(from.force_closed)
                    .and_then(|ForceClosed { first, last }| points.get(first..=last))
                    .map(<[Point2]>::to_vec);
                profile.extend(PolylineProfile::new(points, 0.0, from.closed).execute());
                if let Some(run) = run {
                    profile.extend(PolylineProfile::new(run, 0.0, false).execute());
                }
            }
        }
    }
}

/// Prepares a tween between two arbitrary profiles.
///
/// Both profiles are split into connected subcurves that are paired by
/// order. A pair with the same closedness and the same run of segment kinds
/// is blended segment by segment; arcs must also share their flags and
/// corner arcs their turning direction. Any other pair is turned into two
/// polygons with the same number of points, and an open polygon paired with
/// a closed one is closed by walking back along itself.
#[derive(Debug)]
pub struct ProfileMorph<'a> {
    from: &'a CurveProfile,
    to: &'a CurveProfile,
    params: MorphParams,
}

impl<'a> ProfileMorph<'a> {
    /// Creates a new profile morph with default parameters.
    #[must_use]
    pub fn new(from: &'a CurveProfile, to: &'a CurveProfile) -> Self {
        Self {
            from,
            to,
            params: MorphParams::default(),
        }
    }

    /// Replaces the polygonisation parameters.
    #[must_use]
    pub fn with_params(mut self, params: MorphParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the operation.
    #[must_use]
    pub fn execute(&self) -> ProfileLerp {
        let mut from = split_curve(self.from);
        let mut to = split_curve(self.to);
        if from.len() < to.len() {
            balance_subcurves(&mut from, &to);
        } else {
            balance_subcurves(&mut to, &from);
        }

        let pairs: Vec<SubcurveLerp> = from
            .iter()
            .zip(&to)
            .map(|(a, b)| {
                if same_topology(a, b) {
                    SubcurveLerp::Segments {
                        from: a.profile.segments.clone(),
                        to: b.profile.segments.clone(),
                        closed: a.closed,
                    }
                } else {
                    let (from, to) = self.polygon_pair(a, b);
                    SubcurveLerp::Polygons { from, to }
                }
            })
            .collect();

        debug!(
            subcurves = pairs.len(),
            segment_wise = pairs
                .iter()
                .filter(|pair| matches!(pair, SubcurveLerp::Segments { .. }))
                .count(),
            "prepared profile morph"
        );
        ProfileLerp { pairs }
    }

    fn polygon_pair(&self, from: &Subcurve, to: &Subcurve) -> (Polygon, Polygon) {
        let precision = self.params.precision;
        let mut from_ring = Polygon::from_subcurve(from, precision);
        let mut to_ring = Polygon::from_subcurve(to, precision);

        if from_ring.closed && !to_ring.closed {
            to_ring.force_close();
        } else if !from_ring.closed && to_ring.closed {
            from_ring.force_close();
        }

        let from_count = from_ring.points.len();
        let to_count = to_ring.points.len();
        from_ring.add_points(to_count.saturating_sub(from_count));
        to_ring.add_points(from_count.saturating_sub(to_count));

        from_ring.rotate_toward(&to_ring);
        from_ring.normalize_markers();
        to_ring.normalize_markers();

        round_points(&mut from_ring.points, self.params.round);
        round_points(&mut to_ring.points, self.params.round);
        (from_ring, to_ring)
    }
}

/// A prepared profile tween.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileLerp {
    pairs: Vec<SubcurveLerp>,
}

impl ProfileLerp {
    /// Number of subcurve pairs being tweened.
    #[must_use]
    pub fn subcurve_count(&self) -> usize {
        self.pairs.len()
    }

    /// Profile at `progress` in `[0, 1]`.
    ///
    /// Segment-wise pairs give back the source segments at `0` and `1`.
    /// Polygon pairs are rebuilt as sharp polylines, and a force-closed
    /// polygon also redraws its original open run.
    #[must_use]
    pub fn at(&self, progress: f64) -> CurveProfile {
        let mut profile = CurveProfile::new();
        for pair in &self.pairs {
            pair.at(progress, &mut profile);
        }
        profile
    }
}
