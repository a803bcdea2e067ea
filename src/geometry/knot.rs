use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2};

/// Blend weights between declared handles (`0`) and smooth auto handles (`1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnotAuto {
    start: f64,
    end: f64,
}

impl KnotAuto {
    /// Fully automatic handles.
    pub const AUTO: Self = Self {
        start: 1.0,
        end: 1.0,
    };

    /// Fully manual handles.
    pub const MANUAL: Self = Self {
        start: 0.0,
        end: 0.0,
    };

    /// Creates blend weights for the start and end handles.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if either weight lies
    /// outside `[0, 1]`.
    pub fn new(start: f64, end: f64) -> Result<Self> {
        check_weight("auto.start", start)?;
        check_weight("auto.end", end)?;
        Ok(Self { start, end })
    }

    /// Returns the automatic weight of the start handle.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the automatic weight of the end handle.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns whether both handles are computed automatically.
    #[must_use]
    pub fn is_fully_auto(&self) -> bool {
        self.start >= 1.0 && self.end >= 1.0
    }

    /// Returns whether neither handle is computed automatically.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.start <= 0.0 && self.end <= 0.0
    }
}

impl Default for KnotAuto {
    fn default() -> Self {
        Self::MANUAL
    }
}

fn check_weight(parameter: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter,
            value,
            min: 0.0,
            max: 1.0,
        }
        .into())
    }
}

/// A spline knot with absolute handle positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnotInfo {
    pub position: Point2,
    pub start_handle: Point2,
    pub end_handle: Point2,
    pub auto: KnotAuto,
}

impl KnotInfo {
    /// Creates a knot with explicit handles and weights.
    #[must_use]
    pub fn new(position: Point2, start_handle: Point2, end_handle: Point2, auto: KnotAuto) -> Self {
        Self {
            position,
            start_handle,
            end_handle,
            auto,
        }
    }

    /// A knot whose handles are computed from its neighbours.
    #[must_use]
    pub fn auto(position: Point2) -> Self {
        Self::new(position, position, position, KnotAuto::AUTO)
    }

    /// A knot with explicit handles.
    #[must_use]
    pub fn with_handles(position: Point2, start_handle: Point2, end_handle: Point2) -> Self {
        Self::new(position, start_handle, end_handle, KnotAuto::MANUAL)
    }

    /// A knot whose start handle mirrors `end_offset` through the position.
    #[must_use]
    pub fn mirrored(position: Point2, end_offset: Vector2) -> Self {
        Self::with_handles(position, position - end_offset, position + end_offset)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn auto_weights_validated() {
        assert!(KnotAuto::new(0.5, 1.0).is_ok());
        assert!(KnotAuto::new(-0.1, 1.0).is_err());
        assert!(KnotAuto::new(0.0, 1.5).is_err());
        assert!(KnotAuto::new(1.0, 1.0).unwrap().is_fully_auto());
    }

    #[test]
    fn mirrored_handles() {
        let knot = KnotInfo::mirrored(Point2::new(10.0, 10.0), Vector2::new(5.0, 0.0));
        assert_eq!(knot.start_handle, Point2::new(5.0, 10.0));
        assert_eq!(knot.end_handle, Point2::new(15.0, 10.0));
        assert!(knot.auto.is_manual());
    }
}
