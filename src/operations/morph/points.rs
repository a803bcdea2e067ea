use tracing::debug;

use crate::geometry::CurveProfile;
use crate::math::polygon_2d::polyline_length;
use crate::math::{lerp_point, Point2};
use crate::operations::profile::PolylineProfile;

/// Sum of squared distances between `reference` and `points` read from
/// `offset` onward, wrapping around.
#[must_use]
pub fn lerp_distance(points: &[Point2], reference: &[Point2], offset: usize) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let len = points.len();
    reference
        .iter()
        .enumerate()
        .map(|(i, b)| (points[(offset + i) % len] - b).norm_squared())
        .sum()
}

/// Cyclic offset of `points` that travels the least toward `reference`.
///
/// Ties keep the smallest offset.
#[must_use]
pub fn best_rotation(points: &[Point2], reference: &[Point2]) -> usize {
    let mut best = 0;
    let mut min_distance = f64::INFINITY;
    for offset in 0..points.len() {
        let distance = lerp_distance(points, reference, offset);
        if distance < min_distance {
            min_distance = distance;
            best = offset;
        }
    }
    best
}

/// Reorders `points` so that tweening them to `reference` moves them as
/// little as possible.
///
/// Closed shapes try every cyclic rotation. Open shapes only choose between
/// the given order and its reverse.
#[must_use]
pub fn rotate_points(points: &[Point2], reference: &[Point2], closed: bool) -> Vec<Point2> {
    let mut rotated = points.to_vec();
    if closed {
        let offset = best_rotation(points, reference);
        rotated.rotate_left(offset);
    } else {
        let mut reversed = points.to_vec();
        reversed.reverse();
        if lerp_distance(&reversed, reference, 0) < lerp_distance(points, reference, 0) {
            rotated = reversed;
        }
    }
    rotated
}

/// Adds `count` points along the polyline, spread in proportion to the
/// length of each edge.
///
/// An empty list grows with origins and a single point is repeated. When a
/// pass over the edges adds nothing, the first longest edge is split so
/// that the distribution always terminates.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn distribute_points(points: &[Point2], count: usize) -> Vec<Point2> {
    let mut result = points.to_vec();
    match points {
        [] => {
            result.resize(count, Point2::origin());
            return result;
        }
        [single] => {
            result.resize(count + 1, *single);
            return result;
        }
        _ => {}
    }

    let desired = points.len() + count;
    let arc_length = polyline_length(points);
    let density_for = |left: usize| {
        if arc_length > 0.0 {
            left as f64 / arc_length
        } else {
            0.0
        }
    };

    let mut density = density_for(count);
    let mut inserted = false;
    let mut i = 0;
    while result.len() < desired {
        let left = desired - result.len();

        if i + 1 >= result.len() {
            if !inserted {
                split_longest_edge(&mut result);
            }
            density = density_for(desired - result.len());
            inserted = false;
            i = 0;
            continue;
        }

        let a = result[i];
        let b = result[i + 1];
        let point_count = if arc_length > 0.0 {
            (((b - a).norm() * density).round() as usize).min(left) + 1
        } else {
            2
        };

        for j in 1..point_count {
            i += 1;
            result.insert(i, lerp_point(&a, &b, j as f64 / point_count as f64));
            inserted = true;
        }
        i += 1;
    }

    result
}

fn split_longest_edge(points: &mut Vec<Point2>) {
    let mut longest = 0;
    let mut longest_length = -1.0;
    for (i, pair) in points.windows(2).enumerate() {
        let length = (pair[1] - pair[0]).norm();
        if length > longest_length {
            longest_length = length;
            longest = i;
        }
    }
    let middle = lerp_point(&points[longest], &points[longest + 1], 0.5);
    points.insert(longest + 1, middle);
}

/// Point-wise interpolation. Progress `0` and `1` return the inputs
/// unchanged.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn lerp_points(from: &[Point2], to: &[Point2], progress: f64) -> Vec<Point2> {
    if progress == 0.0 {
        return from.to_vec();
    }
    if progress == 1.0 {
        return to.to_vec();
    }
    from.iter()
        .zip(to)
        .map(|(a, b)| lerp_point(a, b, progress))
        .collect()
}

/// Prepares a tween between two point lists.
///
/// The shorter list gains points until both have the same length, then the
/// target is reordered to minimise travel.
#[derive(Debug)]
pub struct PointsMorph {
    from: Vec<Point2>,
    to: Vec<Point2>,
    closed: bool,
}

impl PointsMorph {
    /// Creates a new point morph operation.
    #[must_use]
    pub fn new(from: Vec<Point2>, to: Vec<Point2>, closed: bool) -> Self {
        Self { from, to, closed }
    }

    /// Executes the operation.
    #[must_use]
    pub fn execute(&self) -> PointsLerp {
        let (from, to) = match self.from.len().cmp(&self.to.len()) {
            std::cmp::Ordering::Less => (
                distribute_points(&self.from, self.to.len() - self.from.len()),
                self.to.clone(),
            ),
            std::cmp::Ordering::Greater => (
                self.from.clone(),
                distribute_points(&self.to, self.from.len() - self.to.len()),
            ),
            std::cmp::Ordering::Equal => (self.from.clone(), self.to.clone()),
        };
        let to = rotate_points(&to, &from, self.closed);
        debug!(
            from = self.from.len(),
            to = self.to.len(),
            points = from.len(),
            closed = self.closed,
            "prepared point morph"
        );

        PointsLerp {
            from,
            to,
            closed: self.closed,
        }
    }
}

/// A prepared point tween: two lists of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsLerp {
    from: Vec<Point2>,
    to: Vec<Point2>,
    closed: bool,
}

impl PointsLerp {
    /// Returns the start points.
    #[must_use]
    pub fn from(&self) -> &[Point2] {
        &self.from
    }

    /// Returns the target points, reordered for least travel.
    #[must_use]
    pub fn to(&self) -> &[Point2] {
        &self.to
    }

    /// Points at `progress` in `[0, 1]`.
    #[must_use]
    pub fn at(&self, progress: f64) -> Vec<Point2> {
        lerp_points(&self.from, &self.to, progress)
    }

    /// Profile of the polyline at `progress`, with corners rounded by
    /// `radius`.
    #[must_use]
    pub fn profile_at(&self, progress: f64, radius: f64) -> CurveProfile {
        PolylineProfile::new(self.at(progress), radius, self.closed).execute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::TAU;

    fn assert_points_near(actual: &[Point2], expected: &[Point2]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(a.x, e.x, epsilon = 1e-9);
            assert_abs_diff_eq!(a.y, e.y, epsilon = 1e-9);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn polygon(sides: usize, radius: f64) -> Vec<Point2> {
        (0..sides)
            .map(|i| {
                let angle = TAU * i as f64 / sides as f64;
                Point2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect()
    }

    #[test]
    fn distribute_along_single_edge() {
        let points = [Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)];
        let result = distribute_points(&points, 3);
        let xs: Vec<f64> = result.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn distribute_proportionally() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(30.0, 0.0),
            Point2::new(40.0, 0.0),
        ];
        let result = distribute_points(&points, 4);
        let xs: Vec<f64> = result.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 7.5, 15.0, 22.5, 30.0, 35.0, 40.0]);
    }

    #[test]
    fn distribute_terminates_on_short_edges() {
        let points: Vec<Point2> = (0..=10)
            .map(|i| Point2::new(f64::from(i) * 10.0, 0.0))
            .collect();
        let result = distribute_points(&points, 1);
        assert_eq!(result.len(), 12);
        assert_abs_diff_eq!(result[1].x, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn distribute_degenerate_lists() {
        assert_eq!(distribute_points(&[], 2), vec![Point2::origin(); 2]);
        let single = Point2::new(3.0, 4.0);
        assert_eq!(distribute_points(&[single], 2), vec![single; 3]);

        let same = [single, single];
        let result = distribute_points(&same, 3);
        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|p| *p == single));
    }

    #[test]
    fn rotation_minimises_travel() {
        let from = polygon(6, 10.0);
        for k in 1..6 {
            let mut to = from.clone();
            to.rotate_left(k);
            let unrotated = lerp_distance(&to, &from, 0);
            let lerp = PointsMorph::new(from.clone(), to, true).execute();
            let travel = lerp_distance(lerp.to(), lerp.from(), 0);
            assert!(travel <= unrotated);
            assert_abs_diff_eq!(travel, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn open_lists_may_reverse() {
        let from = vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)];
        let to = vec![Point2::new(10.0, 1.0), Point2::new(0.0, 1.0)];
        let rotated = rotate_points(&to, &from, false);
        assert_eq!(rotated, vec![Point2::new(0.0, 1.0), Point2::new(10.0, 1.0)]);
        let kept = rotate_points(&from, &from, false);
        assert_eq!(kept, from);
    }

    #[test]
    fn morph_endpoints() {
        let from = polygon(4, 10.0);
        let to = polygon(7, 20.0);
        let lerp = PointsMorph::new(from.clone(), to.clone(), true).execute();
        assert_eq!(lerp.from().len(), 7);
        assert_eq!(lerp.to().len(), 7);

        // Start: the original corners plus inserted edge points.
        let start = lerp.at(0.0);
        assert_points_near(&start, lerp.from());
        for corner in &from {
            assert!(start.contains(corner));
        }
        // End: a cyclic rotation of the target.
        let end = lerp.at(1.0);
        for point in &to {
            assert!(end.contains(point));
        }

        let middle = lerp.at(0.5);
        assert_eq!(middle.len(), 7);
    }

    #[test]
    fn open_morph_profile() {
        let from = vec![Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)];
        let to = vec![
            Point2::new(0.0, 50.0),
            Point2::new(50.0, 100.0),
            Point2::new(100.0, 50.0),
        ];
        let lerp = PointsMorph::new(from, to, false).execute();
        let start = lerp.profile_at(0.0, 0.0);
        assert_abs_diff_eq!(start.arc_length, 100.0, epsilon = 1e-9);
        let end = lerp.profile_at(1.0, 0.0);
        assert_abs_diff_eq!(end.arc_length, 100.0 * 2f64.sqrt(), epsilon = 1e-9);
    }
}
