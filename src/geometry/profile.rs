use crate::math::points_equal;
use crate::sink::PathSink;

use super::curve::Curve;
use super::{BBox, CurvePoint, Segment};

/// An ordered run of segments describing one shape's outline.
///
/// `arc_length` is the sum of the segment lengths. `min_sin` is the smallest
/// half-angle sine over all joins; `1` means no sharp corners.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveProfile {
    pub segments: Vec<Segment>,
    pub arc_length: f64,
    pub min_sin: f64,
}

impl Default for CurveProfile {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            arc_length: 0.0,
            min_sin: 1.0,
        }
    }
}

impl CurveProfile {
    /// Creates an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment and accounts for its length.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        let segment = segment.into();
        self.arc_length += segment.arc_length();
        self.segments.push(segment);
    }

    /// Appends every segment of `other`, keeping the sharper `min_sin`.
    pub fn extend(&mut self, other: CurveProfile) {
        self.arc_length += other.arc_length;
        self.min_sin = self.min_sin.min(other.min_sin);
        self.segments.extend(other.segments);
    }

    /// Returns `true` if the profile has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Point `distance` along the whole profile. Distances are clamped to
    /// the profile's length.
    #[must_use]
    pub fn point_at_distance(&self, distance: f64) -> CurvePoint {
        let distance = distance.clamp(0.0, self.arc_length.max(0.0));
        let mut length = 0.0;

        for segment in &self.segments {
            let previous = length;
            let segment_length = segment.arc_length();
            length += segment_length;
            if length >= distance {
                let fraction = if segment_length > 0.0 {
                    ((distance - previous) / segment_length).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                return segment.point_at(fraction);
            }
        }

        self.segments
            .last()
            .map(|segment| segment.point_at(1.0))
            .unwrap_or_default()
    }

    /// Converts a fraction of the whole profile into a distance.
    #[must_use]
    pub fn percentage_to_distance(&self, percentage: f64) -> f64 {
        (self.arc_length * percentage).clamp(0.0, self.arc_length.max(0.0))
    }

    /// Converts a distance into a fraction of the whole profile.
    #[must_use]
    pub fn distance_to_percentage(&self, distance: f64) -> f64 {
        if self.arc_length > 0.0 {
            distance / self.arc_length
        } else {
            0.0
        }
    }

    /// Bounds of every segment.
    #[must_use]
    pub fn bbox(&self) -> BBox {
        self.segments
            .iter()
            .map(Segment::bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| BBox::from_points(&[]))
    }

    /// Draws the part between two distances into `sink`.
    ///
    /// A new subpath starts whenever a segment does not begin where the
    /// previous one ended. The path is closed only when `closed` is set and
    /// the whole length is drawn. Returns the curve points at both ends of
    /// the drawn part, or `None` when nothing was drawn.
    pub fn draw(
        &self,
        sink: &mut dyn PathSink,
        start_distance: f64,
        end_distance: f64,
        closed: bool,
    ) -> Option<(CurvePoint, CurvePoint)> {
        let (start, end) = if start_distance > end_distance {
            (end_distance, start_distance)
        } else {
            (start_distance, end_distance)
        };

        let mut length = 0.0;
        let mut first: Option<CurvePoint> = None;
        let mut last: Option<CurvePoint> = None;
        let mut subpath_open = false;

        for segment in &self.segments {
            let previous = length;
            let segment_length = segment.arc_length();
            length += segment_length;
            if length < start {
                continue;
            }

            let (relative_start, relative_end) = if segment_length > 0.0 {
                (
                    ((start - previous) / segment_length).clamp(0.0, 1.0),
                    ((end - previous) / segment_length).clamp(0.0, 1.0),
                )
            } else {
                (0.0, 1.0)
            };

            if let Some(end_point) = &last {
                if !points_equal(&segment.start_point(), &end_point.position) {
                    subpath_open = false;
                }
            }

            let (start_point, end_point) =
                segment.draw(sink, relative_start, relative_end, !subpath_open);
            subpath_open = true;
            first.get_or_insert(start_point);
            last = Some(end_point);

            if length >= end {
                break;
            }
        }

        if closed && start <= 0.0 && end >= self.arc_length && !self.is_empty() {
            sink.close_path();
        }

        first.zip(last)
    }
}
