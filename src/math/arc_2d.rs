//! 2D elliptical arc math utilities.
//!
//! Arcs are given in SVG endpoint form: two endpoints, the ellipse radii, the
//! x-axis rotation and the `large_arc`/`sweep` flags. Drawing and sampling work
//! on the center form computed by [`endpoint_to_center`].

use std::f64::consts::TAU;

use super::{Point2, Rotation2, Vector2, TOLERANCE};

/// Center parameterization of an elliptical arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    /// Ellipse center.
    pub center: Point2,
    /// Radii after out-of-range correction.
    pub radii: Vector2,
    /// Rotation of the ellipse x axis, in radians.
    pub x_axis_rotation: f64,
    /// Parametric start angle, in radians.
    pub start_angle: f64,
    /// Signed parametric sweep, in radians. Positive sweeps run toward +y.
    pub delta_angle: f64,
}

impl CenterArc {
    /// Point on the ellipse at parametric angle `angle`.
    #[must_use]
    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        let local = Vector2::new(self.radii.x * angle.cos(), self.radii.y * angle.sin());
        self.center + Rotation2::new(self.x_axis_rotation) * local
    }

    /// Derivative of the ellipse position with respect to the angle.
    #[must_use]
    pub fn derivative_at_angle(&self, angle: f64) -> Vector2 {
        let local = Vector2::new(-self.radii.x * angle.sin(), self.radii.y * angle.cos());
        Rotation2::new(self.x_axis_rotation) * local
    }

    /// Angle reached after travelling `fraction` of the sweep.
    #[must_use]
    pub fn angle_at(&self, fraction: f64) -> f64 {
        self.start_angle + fraction * self.delta_angle
    }

    /// Returns whether the ellipse is a circle.
    #[must_use]
    pub fn is_circular(&self) -> bool {
        (self.radii.x - self.radii.y).abs() <= TOLERANCE * self.radii.x.max(1.0)
    }
}

/// Converts an SVG endpoint arc into center form.
///
/// Radii are made positive and scaled up uniformly when they are too small to
/// span the endpoints. Coincident endpoints produce a zero sweep.
#[must_use]
pub fn endpoint_to_center(
    start: &Point2,
    end: &Point2,
    radii: &Vector2,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> CenterArc {
    let mut rx = radii.x.abs().max(TOLERANCE);
    let mut ry = radii.y.abs().max(TOLERANCE);

    let rotation = Rotation2::new(x_axis_rotation);
    let half_chord = (start - end) * 0.5;
    let p = rotation.inverse() * half_chord;

    if p.norm_squared() <= TOLERANCE * TOLERANCE {
        return CenterArc {
            center: *start,
            radii: Vector2::new(rx, ry),
            x_axis_rotation,
            start_angle: 0.0,
            delta_angle: 0.0,
        };
    }

    let lambda = (p.x * p.x) / (rx * rx) + (p.y * p.y) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let numerator = rx * rx * ry * ry - rx * rx * p.y * p.y - ry * ry * p.x * p.x;
    let denominator = rx * rx * p.y * p.y + ry * ry * p.x * p.x;
    let mut factor = (numerator / denominator).max(0.0).sqrt();
    if large_arc == sweep {
        factor = -factor;
    }
    let center_prime = Vector2::new(factor * rx * p.y / ry, -factor * ry * p.x / rx);

    let midpoint = Point2::from((start.coords + end.coords) * 0.5);
    let center = midpoint + rotation * center_prime;

    let q = Vector2::new((p.x - center_prime.x) / rx, (p.y - center_prime.y) / ry);
    let s = Vector2::new((-p.x - center_prime.x) / rx, (-p.y - center_prime.y) / ry);

    let start_angle = q.y.atan2(q.x);
    let mut delta_angle = signed_angle(&q, &s);
    if !sweep && delta_angle > 0.0 {
        delta_angle -= TAU;
    } else if sweep && delta_angle < 0.0 {
        delta_angle += TAU;
    }

    CenterArc {
        center,
        radii: Vector2::new(rx, ry),
        x_axis_rotation,
        start_angle,
        delta_angle,
    }
}

/// Signed angle from `a` to `b` in `(-π, π]`.
#[must_use]
pub fn signed_angle(a: &Vector2, b: &Vector2) -> f64 {
    let cross = a.x * b.y - a.y * b.x;
    cross.atan2(a.dot(b))
}
