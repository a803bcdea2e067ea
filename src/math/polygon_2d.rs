use super::{lerp_point, points_equal, Point2};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise in a y-up frame, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Length of the open polyline through `points`.
#[must_use]
pub fn polyline_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}

/// Drops the last point when it repeats the first one.
pub fn remove_recurring_point(points: &mut Vec<Point2>) {
    if points.len() > 1 && points_equal(&points[0], &points[points.len() - 1]) {
        points.pop();
    }
}

/// Halves edges until no two neighbours are further apart than `max_length`.
///
/// The closing edge is included when `closed` is set.
pub fn bisect(points: &mut Vec<Point2>, closed: bool, max_length: f64) {
    if max_length <= 0.0 || !max_length.is_finite() {
        return;
    }
    let mut i = 0;
    while i < points.len() {
        if i == points.len() - 1 && !closed {
            break;
        }
        let a = points[i];
        let mut b = points[(i + 1) % points.len()];
        while (a - b).norm() > max_length {
            b = lerp_point(&a, &b, 0.5);
            points.insert(i + 1, b);
        }
        i += 1;
    }
}

/// Rounds every coordinate to `decimals` decimal places.
///
/// Values below one round to whole units.
pub fn round_points(points: &mut [Point2], decimals: u32) {
    let pow = if decimals >= 1 {
        10_f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX))
    } else {
        1.0
    };
    for point in points {
        point.x = (point.x * pow).round() / pow;
        point.y = (point.y * pow).round() / pow;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn unit_square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        let area = signed_area_2d(&unit_square());
        assert!((area - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = unit_square();
        pts.reverse();
        let area = signed_area_2d(&pts);
        assert!((area + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!((signed_area_2d(&[Point2::new(0.0, 0.0)])).abs() < TOLERANCE);
        assert!((signed_area_2d(&[])).abs() < TOLERANCE);
    }

    #[test]
    fn polyline_length_is_open() {
        assert!((polyline_length(&unit_square()) - 3.0).abs() < TOLERANCE);
        assert!(polyline_length(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn recurring_point_removed() {
        let mut pts = unit_square();
        pts.push(Point2::new(0.0, 0.0));
        remove_recurring_point(&mut pts);
        assert_eq!(pts.len(), 4);
        remove_recurring_point(&mut pts);
        assert_eq!(pts.len(), 4);
    }

    #[test]
    fn bisect_closed_square() {
        let mut pts = unit_square();
        bisect(&mut pts, true, 0.5);
        assert_eq!(pts.len(), 8);
        for i in 0..pts.len() {
            let d = (pts[(i + 1) % pts.len()] - pts[i]).norm();
            assert!(d <= 0.5 + TOLERANCE);
        }
    }

    #[test]
    fn bisect_open_skips_closing_edge() {
        let mut pts = vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)];
        bisect(&mut pts, false, 0.5);
        assert_eq!(pts.len(), 5);
        assert!((pts[1].x - 0.5).abs() < TOLERANCE);
        assert!((pts[4].x - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn rounding() {
        let mut pts = vec![Point2::new(1.234_56, -0.000_04)];
        round_points(&mut pts, 4);
        assert!((pts[0].x - 1.2346).abs() < TOLERANCE);
        assert!(pts[0].y.abs() < TOLERANCE);
    }
}
