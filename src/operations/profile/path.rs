use tracing::warn;

use crate::geometry::{
    ArcSegment, CubicBezierSegment, CurveProfile, LineSegment, QuadBezierSegment, Segment,
};
use crate::math::{points_equal, Point2, Vector2};
use crate::path_data::{parse_path_data, CommandKind, PathCommand};

use super::joint_min_sin;

/// Builds the profile described by SVG path data.
///
/// Reading stops at the first malformed fragment with a warning; the
/// commands before it are still interpreted. `min_sin` covers every join,
/// including the one from the last segment back to the first.
#[derive(Debug, Clone)]
pub struct PathProfile {
    commands: Vec<PathCommand>,
}

impl PathProfile {
    /// Creates a new path profile operation from a `d` attribute.
    #[must_use]
    pub fn new(data: &str) -> Self {
        let parsed = parse_path_data(data);
        for diagnostic in &parsed.diagnostics {
            warn!(%diagnostic, "ignoring malformed path data");
        }
        Self::from_commands(parsed.commands)
    }

    /// Creates a new path profile operation from already parsed commands.
    #[must_use]
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Returns the parsed commands.
    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Executes the operation.
    #[must_use]
    #[allow(clippy::float_cmp, clippy::too_many_lines)]
    pub fn execute(&self) -> CurveProfile {
        let mut profile = CurveProfile::new();
        let mut current = Point2::origin();
        let mut first: Option<Point2> = None;

        for command in &self.commands {
            let point = move |index: usize| resolve(command, index, current);
            match command.kind {
                CommandKind::MoveTo => {
                    current = point(0);
                    first = Some(current);
                }
                CommandKind::LineTo => {
                    let next = point(0);
                    profile.push(LineSegment::new(current, next));
                    current = next;
                }
                CommandKind::HorizontalTo => {
                    let x = command.arg(0);
                    let next = if command.relative {
                        Point2::new(current.x + x, current.y)
                    } else {
                        Point2::new(x, current.y)
                    };
                    profile.push(LineSegment::new(current, next));
                    current = next;
                }
                CommandKind::VerticalTo => {
                    let y = command.arg(0);
                    let next = if command.relative {
                        Point2::new(current.x, current.y + y)
                    } else {
                        Point2::new(current.x, y)
                    };
                    profile.push(LineSegment::new(current, next));
                    current = next;
                }
                CommandKind::QuadraticTo => {
                    let control = point(0);
                    let next = point(2);
                    profile.push(QuadBezierSegment::new(current, control, next));
                    current = next;
                }
                CommandKind::SmoothQuadraticTo => {
                    let control = match profile.segments.last() {
                        Some(Segment::QuadBezier(previous)) => reflect(previous.p1(), &current),
                        _ => current,
                    };
                    let next = point(0);
                    profile.push(QuadBezierSegment::new(current, control, next));
                    current = next;
                }
                CommandKind::CubicTo => {
                    let start_control = point(0);
                    let end_control = point(2);
                    let next = point(4);
                    profile.push(CubicBezierSegment::new(
                        current,
                        start_control,
                        end_control,
                        next,
                    ));
                    current = next;
                }
                CommandKind::SmoothCubicTo => {
                    let start_control = match profile.segments.last() {
                        Some(Segment::CubicBezier(previous)) => reflect(previous.p2(), &current),
                        _ => current,
                    };
                    let end_control = point(0);
                    let next = point(2);
                    profile.push(CubicBezierSegment::new(
                        current,
                        start_control,
                        end_control,
                        next,
                    ));
                    current = next;
                }
                CommandKind::ArcTo => {
                    let radius = Vector2::new(command.arg(0), command.arg(1));
                    let next = point(5);
                    if radius.x == 0.0 || radius.y == 0.0 {
                        profile.push(LineSegment::new(current, next));
                    } else {
                        profile.push(ArcSegment::new(
                            current,
                            radius,
                            command.arg(2),
                            command.arg(3) != 0.0,
                            command.arg(4) != 0.0,
                            next,
                        ));
                    }
                    current = next;
                }
                CommandKind::Close => {
                    let Some(start) = first else {
                        continue;
                    };
                    if points_equal(&current, &start) {
                        continue;
                    }
                    profile.push(LineSegment::new(current, start));
                    current = start;
                }
            }
        }

        profile.min_sin = joint_min_sin(&profile.segments);
        profile
    }
}

/// Point argument pair starting at `index`, resolved against `current` for
/// relative commands.
fn resolve(command: &PathCommand, index: usize, current: Point2) -> Point2 {
    let point = Point2::new(command.arg(index), command.arg(index + 1));
    if command.relative {
        current + point.coords
    } else {
        point
    }
}

/// Mirrors `control` through `current`.
fn reflect(control: &Point2, current: &Point2) -> Point2 {
    current + (current - control)
}
