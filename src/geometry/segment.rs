use crate::math::{Matrix3, Point2};
use crate::sink::PathSink;

use super::curve::{
    ArcSegment, CircleSegment, CubicBezierSegment, Curve, LineSegment, PolynomialSegment,
    QuadBezierSegment,
};
use super::{BBox, CurvePoint};

/// One drawable piece of a [`CurveProfile`](super::CurveProfile).
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Line(LineSegment),
    Arc(ArcSegment),
    Circle(CircleSegment),
    QuadBezier(QuadBezierSegment),
    CubicBezier(CubicBezierSegment),
}

impl Segment {
    fn as_curve(&self) -> &dyn Curve {
        match self {
            Self::Line(s) => s,
            Self::Arc(s) => s,
            Self::Circle(s) => s,
            Self::QuadBezier(s) => s,
            Self::CubicBezier(s) => s,
        }
    }

    /// Defining points mapped through a homogeneous 2D transform.
    #[must_use]
    pub fn transform_points(&self, matrix: &Matrix3) -> Vec<Point2> {
        self.points()
            .iter()
            .map(|p| matrix.transform_point(p))
            .collect()
    }

    /// Bounds of the segment's geometry.
    #[must_use]
    pub fn bbox(&self) -> BBox {
        match self {
            Self::Arc(s) => s.bbox(),
            Self::QuadBezier(s) => s.bbox(),
            Self::CubicBezier(s) => s.bbox(),
            Self::Line(_) | Self::Circle(_) => BBox::from_points(&self.points()),
        }
    }

    /// Returns the cubic segment, if this is one.
    #[must_use]
    pub fn as_cubic(&self) -> Option<&CubicBezierSegment> {
        match self {
            Self::CubicBezier(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the line segment, if this is one.
    #[must_use]
    pub fn as_line(&self) -> Option<&LineSegment> {
        match self {
            Self::Line(s) => Some(s),
            _ => None,
        }
    }
}

impl Curve for Segment {
    fn arc_length(&self) -> f64 {
        self.as_curve().arc_length()
    }

    fn point_at(&self, fraction: f64) -> CurvePoint {
        self.as_curve().point_at(fraction)
    }

    fn draw(
        &self,
        sink: &mut dyn PathSink,
        start: f64,
        end: f64,
        move_to: bool,
    ) -> (CurvePoint, CurvePoint) {
        self.as_curve().draw(sink, start, end, move_to)
    }

    fn points(&self) -> Vec<Point2> {
        self.as_curve().points()
    }
}

impl From<LineSegment> for Segment {
    fn from(segment: LineSegment) -> Self {
        Self::Line(segment)
    }
}

impl From<ArcSegment> for Segment {
    fn from(segment: ArcSegment) -> Self {
        Self::Arc(segment)
    }
}

impl From<CircleSegment> for Segment {
    fn from(segment: CircleSegment) -> Self {
        Self::Circle(segment)
    }
}

impl From<QuadBezierSegment> for Segment {
    fn from(segment: QuadBezierSegment) -> Self {
        Self::QuadBezier(segment)
    }
}

impl From<CubicBezierSegment> for Segment {
    fn from(segment: CubicBezierSegment) -> Self {
        Self::CubicBezier(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;

    #[test]
    fn dispatches_to_variant() {
        let segment = Segment::from(LineSegment::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 8.0),
        ));
        assert!((segment.arc_length() - 8.0).abs() < 1e-12);
        assert_eq!(segment.end_point(), Point2::new(0.0, 8.0));
        assert!(segment.as_line().is_some());
        assert!(segment.as_cubic().is_none());
    }

    #[test]
    fn transform_points_translates() {
        let segment = Segment::from(QuadBezierSegment::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 0.0),
        ));
        let m = Matrix3::new_translation(&Vector2::new(5.0, -5.0));
        let points = segment.transform_points(&m);
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], Point2::new(6.0, -4.0));
    }

    #[test]
    fn circle_bbox_is_full_square() {
        let segment = Segment::from(CircleSegment::new(
            Point2::new(1.0, 1.0),
            2.0,
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
            false,
        ));
        let bbox = segment.bbox();
        assert_eq!(bbox.min, Point2::new(-1.0, -1.0));
        assert_eq!(bbox.max, Point2::new(3.0, 3.0));
    }
}
