use std::f64::consts::TAU;

use crate::math::{lerp_point, Point2, Rotation2, Vector2};

/// Drawing target every segment writes into.
///
/// Angles follow canvas conventions: `counterclockwise` selects decreasing
/// angles in a y-down frame.
pub trait PathSink {
    fn move_to(&mut self, point: Point2);

    fn line_to(&mut self, point: Point2);

    fn quadratic_curve_to(&mut self, control: Point2, point: Point2);

    fn bezier_curve_to(&mut self, control1: Point2, control2: Point2, point: Point2);

    /// Adds an elliptical arc, connecting it to the current point with a line.
    fn ellipse(&mut self, arc: EllipseArc);

    fn close_path(&mut self);
}

/// Arguments of a [`PathSink::ellipse`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseArc {
    pub center: Point2,
    pub radii: Vector2,
    pub rotation: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub counterclockwise: bool,
}

impl EllipseArc {
    /// The swept angle the way a canvas resolves it, signed by direction.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        let raw = self.end_angle - self.start_angle;
        if self.counterclockwise {
            if -raw >= TAU {
                -TAU
            } else {
                -(-raw).rem_euclid(TAU)
            }
        } else if raw >= TAU {
            TAU
        } else {
            raw.rem_euclid(TAU)
        }
    }

    /// Point at parametric angle `angle`.
    #[must_use]
    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        let local = Vector2::new(self.radii.x * angle.cos(), self.radii.y * angle.sin());
        self.center + Rotation2::new(self.rotation) * local
    }
}

/// A recorded path operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOp {
    MoveTo(Point2),
    LineTo(Point2),
    QuadraticCurveTo(Point2, Point2),
    BezierCurveTo(Point2, Point2, Point2),
    Ellipse(EllipseArc),
    ClosePath,
}

/// A [`PathSink`] that stores every call it receives.
#[derive(Debug, Clone, Default)]
pub struct PathRecorder {
    ops: Vec<PathOp>,
}

impl PathRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded operations.
    #[must_use]
    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    /// Consumes the recorder, returning its operations.
    #[must_use]
    pub fn into_ops(self) -> Vec<PathOp> {
        self.ops
    }

    /// Number of subpaths started with a move.
    #[must_use]
    pub fn subpath_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PathOp::MoveTo(_)))
            .count()
    }

    /// Flattens the recording into points, evaluating every curve at
    /// `steps` evenly spaced parameters.
    ///
    /// Subpath breaks are not marked; each move simply contributes its point.
    #[must_use]
    pub fn flatten(&self, steps: usize) -> Vec<Point2> {
        let steps = steps.max(1);
        let mut points: Vec<Point2> = Vec::new();
        let mut subpath_start: Option<Point2> = None;

        for op in &self.ops {
            let current = points.last().copied();
            match *op {
                PathOp::MoveTo(p) => {
                    points.push(p);
                    subpath_start = Some(p);
                }
                PathOp::LineTo(p) => points.push(p),
                PathOp::QuadraticCurveTo(c, p) => {
                    let p0 = current.unwrap_or(c);
                    for i in 1..=steps {
                        let t = step_fraction(i, steps);
                        let a = lerp_point(&p0, &c, t);
                        let b = lerp_point(&c, &p, t);
                        points.push(lerp_point(&a, &b, t));
                    }
                }
                PathOp::BezierCurveTo(c1, c2, p) => {
                    let p0 = current.unwrap_or(c1);
                    for i in 1..=steps {
                        let t = step_fraction(i, steps);
                        let a = lerp_point(&p0, &c1, t);
                        let b = lerp_point(&c1, &c2, t);
                        let c = lerp_point(&c2, &p, t);
                        let d = lerp_point(&a, &b, t);
                        let e = lerp_point(&b, &c, t);
                        points.push(lerp_point(&d, &e, t));
                    }
                }
                PathOp::Ellipse(arc) => {
                    let sweep = arc.sweep();
                    points.push(arc.point_at_angle(arc.start_angle));
                    for i in 1..=steps {
                        let t = step_fraction(i, steps);
                        points.push(arc.point_at_angle(arc.start_angle + sweep * t));
                    }
                }
                PathOp::ClosePath => {
                    if let Some(p) = subpath_start {
                        points.push(p);
                    }
                }
            }
        }

        points
    }
}

#[allow(clippy::cast_precision_loss)]
fn step_fraction(i: usize, steps: usize) -> f64 {
    i as f64 / steps as f64
}

impl PathSink for PathRecorder {
    fn move_to(&mut self, point: Point2) {
        self.ops.push(PathOp::MoveTo(point));
    }

    fn line_to(&mut self, point: Point2) {
        self.ops.push(PathOp::LineTo(point));
    }

    fn quadratic_curve_to(&mut self, control: Point2, point: Point2) {
        self.ops.push(PathOp::QuadraticCurveTo(control, point));
    }

    fn bezier_curve_to(&mut self, control1: Point2, control2: Point2, point: Point2) {
        self.ops
            .push(PathOp::BezierCurveTo(control1, control2, point));
    }

    fn ellipse(&mut self, arc: EllipseArc) {
        self.ops.push(PathOp::Ellipse(arc));
    }

    fn close_path(&mut self) {
        self.ops.push(PathOp::ClosePath);
    }
}
