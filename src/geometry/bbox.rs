use crate::math::{Matrix3, Point2, Vector2};

/// Axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min: Point2,
    pub max: Point2,
}

impl BBox {
    /// Creates a box from its corners.
    #[must_use]
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point. Empty input yields a zero box at
    /// the origin.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let Some(first) = points.first() else {
            return Self::new(Point2::origin(), Point2::origin());
        };
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self { min, max }
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_points(&[self.min, self.max, other.min, other.max])
    }

    /// Returns the extent along x.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the extent along y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the width and height as a vector.
    #[must_use]
    pub fn size(&self) -> Vector2 {
        self.max - self.min
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// Corners in the order top-left, top-right, bottom-right, bottom-left
    /// for a y-down frame.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// Corners mapped through a homogeneous 2D transform.
    #[must_use]
    pub fn transform_corners(&self, matrix: &Matrix3) -> [Point2; 4] {
        self.corners().map(|corner| matrix.transform_point(&corner))
    }

    /// Returns whether `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_spans_all() {
        let bbox = BBox::from_points(&[
            Point2::new(1.0, 5.0),
            Point2::new(-2.0, 3.0),
            Point2::new(4.0, -1.0),
        ]);
        assert_eq!(bbox.min, Point2::new(-2.0, -1.0));
        assert_eq!(bbox.max, Point2::new(4.0, 5.0));
        assert!((bbox.width() - 6.0).abs() < 1e-12);
        assert!((bbox.height() - 6.0).abs() < 1e-12);
        assert_eq!(bbox.center(), Point2::new(1.0, 2.0));
    }

    #[test]
    fn empty_points() {
        let bbox = BBox::from_points(&[]);
        assert!(bbox.width().abs() < f64::EPSILON);
    }

    #[test]
    fn union_and_contains() {
        let a = BBox::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        let b = BBox::new(Point2::new(2.0, -1.0), Point2::new(3.0, 0.5));
        let u = a.union(&b);
        assert!(u.contains(&Point2::new(2.5, 0.9)));
        assert!(!a.contains(&Point2::new(2.5, 0.9)));
    }

    #[test]
    fn translated_corners() {
        let bbox = BBox::new(Point2::new(0.0, 0.0), Point2::new(2.0, 1.0));
        let m = Matrix3::new_translation(&Vector2::new(10.0, 20.0));
        let corners = bbox.transform_corners(&m);
        assert_eq!(corners[0], Point2::new(10.0, 20.0));
        assert_eq!(corners[2], Point2::new(12.0, 21.0));
    }
}
