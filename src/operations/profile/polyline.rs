use crate::geometry::{CircleSegment, Curve, CurveProfile, LineSegment};
use crate::math::{normalize_or_zero, perpendicular, Point2};

/// Builds the profile of a polyline whose corners are rounded by `radius`.
///
/// Each interior corner becomes a [`CircleSegment`] tangent to both edges.
/// The radius is capped per corner so that two neighbouring roundings never
/// claim more than their edge. A closed polyline is opened at the midpoint
/// between its first and last point so that every vertex is a corner.
#[derive(Debug)]
pub struct PolylineProfile {
    points: Vec<Point2>,
    radius: f64,
    closed: bool,
}

impl PolylineProfile {
    /// Creates a new polyline profile operation.
    #[must_use]
    pub fn new(points: Vec<Point2>, radius: f64, closed: bool) -> Self {
        Self {
            points,
            radius,
            closed,
        }
    }

    /// Executes the operation.
    ///
    /// Segments that collapse to zero length are left out.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn execute(&self) -> CurveProfile {
        let mut profile = CurveProfile::new();
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return profile;
        };

        let points = if self.closed {
            let seam = Point2::from((first.coords + last.coords) * 0.5);
            let mut points = Vec::with_capacity(self.points.len() + 2);
            points.push(seam);
            points.extend_from_slice(&self.points);
            points.push(seam);
            points
        } else {
            self.points.clone()
        };

        let count = points.len();
        let mut cursor = points[0];
        for i in 2..count {
            let start = points[i - 2];
            let center = points[i - 1];
            let end = points[i];

            let center_to_start = start - center;
            let center_to_end = end - center;
            let start_vector = normalize_or_zero(&center_to_start);
            let end_vector = normalize_or_zero(&center_to_end);
            let angle = start_vector.dot(&end_vector).clamp(-1.0, 1.0).acos();
            let angle_tan = (angle / 2.0).tan();
            let angle_sin = (angle / 2.0).sin();

            let start_share = if i == 2 { 1.0 } else { 0.5 };
            let end_share = if i == count - 1 { 1.0 } else { 0.5 };
            let safe_radius = self
                .radius
                .min(angle_tan * center_to_start.norm() * start_share)
                .min(angle_tan * center_to_end.norm() * end_share);

            let circle_offset = if angle_sin == 0.0 {
                0.0
            } else {
                safe_radius / angle_sin
            };
            let point_offset = if angle_tan == 0.0 {
                0.0
            } else {
                safe_radius / angle_tan
            };
            let bisector = normalize_or_zero(&((start_vector + end_vector) * 0.5));
            let circle_center = center + bisector * circle_offset;

            let counter = perpendicular(&start_vector).dot(&end_vector) < 0.0;
            let turn = if counter { 1.0 } else { -1.0 };
            let line = LineSegment::new(cursor, center + start_vector * point_offset);
            let circle = CircleSegment::new(
                circle_center,
                safe_radius,
                perpendicular(&start_vector) * turn,
                perpendicular(&end_vector) * -turn,
                counter,
            );

            if line.arc_length() > 0.0 {
                profile.push(line);
            }
            if circle.arc_length() > 0.0 {
                profile.push(circle);
            }
            profile.min_sin = profile.min_sin.min(angle_sin.abs());

            cursor = center + end_vector * point_offset;
        }

        let line = LineSegment::new(cursor, points[count - 1]);
        if line.arc_length() > 0.0 {
            profile.push(line);
        }

        profile
    }
}
