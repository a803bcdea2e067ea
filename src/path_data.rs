//! SVG path-data reading on top of `svgtypes`.
//!
//! Commands keep their relative/absolute form; resolving them against the
//! current point is left to the profile builder. The reader is lenient: the
//! first syntax error is kept as a diagnostic and every command read before
//! it is returned, so a bad tail never discards the whole path.

use std::fmt;

use svgtypes::{PathParser, PathSegment};

use crate::error::{PathDataError, Result};

/// Command family, independent of relative/absolute case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HorizontalTo,
    VerticalTo,
    QuadraticTo,
    SmoothQuadraticTo,
    CubicTo,
    SmoothCubicTo,
    ArcTo,
    Close,
}

impl CommandKind {
    /// Maps a command letter to its kind and whether it is relative.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<(Self, bool)> {
        let kind = match letter.to_ascii_lowercase() {
            'm' => Self::MoveTo,
            'l' => Self::LineTo,
            'h' => Self::HorizontalTo,
            'v' => Self::VerticalTo,
            'q' => Self::QuadraticTo,
            't' => Self::SmoothQuadraticTo,
            'c' => Self::CubicTo,
            's' => Self::SmoothCubicTo,
            'a' => Self::ArcTo,
            'z' => Self::Close,
            _ => return None,
        };
        Some((kind, letter.is_ascii_lowercase()))
    }

    /// The command letter in the requested case.
    #[must_use]
    pub fn letter(self, relative: bool) -> char {
        let letter = match self {
            Self::MoveTo => 'M',
            Self::LineTo => 'L',
            Self::HorizontalTo => 'H',
            Self::VerticalTo => 'V',
            Self::QuadraticTo => 'Q',
            Self::SmoothQuadraticTo => 'T',
            Self::CubicTo => 'C',
            Self::SmoothCubicTo => 'S',
            Self::ArcTo => 'A',
            Self::Close => 'Z',
        };
        if relative {
            letter.to_ascii_lowercase()
        } else {
            letter
        }
    }
}

/// One command with its arguments in SVG order.
///
/// Arc flags are stored as `0.0` or `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub kind: CommandKind,
    pub relative: bool,
    pub args: Vec<f64>,
}

impl PathCommand {
    /// Creates a new command.
    #[must_use]
    pub fn new(kind: CommandKind, relative: bool, args: Vec<f64>) -> Self {
        Self {
            kind,
            relative,
            args,
        }
    }

    /// Argument `index`, or zero when missing.
    #[must_use]
    pub fn arg(&self, index: usize) -> f64 {
        self.args.get(index).copied().unwrap_or(0.0)
    }
}

impl From<PathSegment> for PathCommand {
    fn from(segment: PathSegment) -> Self {
        let flag = |set: bool| if set { 1.0 } else { 0.0 };
        let (kind, abs, args) = match segment {
            PathSegment::MoveTo { abs, x, y } => (CommandKind::MoveTo, abs, vec![x, y]),
            PathSegment::LineTo { abs, x, y } => (CommandKind::LineTo, abs, vec![x, y]),
            PathSegment::HorizontalLineTo { abs, x } => (CommandKind::HorizontalTo, abs, vec![x]),
            PathSegment::VerticalLineTo { abs, y } => (CommandKind::VerticalTo, abs, vec![y]),
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => (CommandKind::CubicTo, abs, vec![x1, y1, x2, y2, x, y]),
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                (CommandKind::SmoothCubicTo, abs, vec![x2, y2, x, y])
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                (CommandKind::QuadraticTo, abs, vec![x1, y1, x, y])
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                (CommandKind::SmoothQuadraticTo, abs, vec![x, y])
            }
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => (
                CommandKind::ArcTo,
                abs,
                vec![rx, ry, x_axis_rotation, flag(large_arc), flag(sweep), x, y],
            ),
            PathSegment::ClosePath { abs } => (CommandKind::Close, abs, Vec::new()),
        };
        Self::new(kind, !abs, args)
    }
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.letter(self.relative))?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Result of a lenient parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPath {
    pub commands: Vec<PathCommand>,
    pub diagnostics: Vec<PathDataError>,
}

impl ParsedPath {
    /// Returns `true` if the data was read without any diagnostic.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the commands if no diagnostic was raised.
    ///
    /// # Errors
    ///
    /// Returns the first diagnostic as a [`PathDataError`].
    pub fn into_result(self) -> Result<Vec<PathCommand>> {
        match self.diagnostics.into_iter().next() {
            Some(diagnostic) => Err(diagnostic.into()),
            None => Ok(self.commands),
        }
    }
}

/// Parses SVG path data, collecting problems instead of failing.
#[must_use]
pub fn parse_path_data(data: &str) -> ParsedPath {
    let mut parsed = ParsedPath::default();
    for segment in PathParser::from(data) {
        match segment {
            Ok(segment) => parsed.commands.push(PathCommand::from(segment)),
            Err(error) => {
                let diagnostic = diagnose(data, parsed.commands.is_empty(), &error);
                parsed.diagnostics.push(diagnostic);
                break;
            }
        }
    }
    parsed
}

fn diagnose(data: &str, at_start: bool, error: &svgtypes::Error) -> PathDataError {
    let first = data.trim_start().chars().next();
    match first.and_then(|letter| CommandKind::from_letter(letter).map(|kind| (letter, kind))) {
        Some((command, (kind, _))) if at_start && kind != CommandKind::MoveTo => {
            PathDataError::MissingInitialMoveTo { command }
        }
        _ => PathDataError::Syntax {
            message: error.to_string(),
        },
    }
}
