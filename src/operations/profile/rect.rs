use crate::geometry::{BBox, CircleSegment, CubicBezierSegment, CurveProfile, LineSegment};
use crate::math::{Point2, Vector2};

/// Corner radii of a rectangle, clockwise from the top left.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    /// Creates per-corner radii in clockwise order from the top left.
    #[must_use]
    pub fn new(top_left: f64, top_right: f64, bottom_right: f64, bottom_left: f64) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// The same radius on every corner.
    #[must_use]
    pub fn uniform(radius: f64) -> Self {
        Self::new(radius, radius, radius, radius)
    }
}

/// Shrinks `radius` so that it fits next to the `horizontal` and `vertical`
/// neighbouring radii within `rect`.
///
/// When two radii on one side add up to more than the side, both are scaled
/// down proportionally.
#[must_use]
pub fn adjust_rect_radius(radius: f64, horizontal: f64, vertical: f64, rect: &BBox) -> f64 {
    let width = if radius + horizontal > rect.width() {
        rect.width() * (radius / (radius + horizontal))
    } else {
        radius
    };
    let height = if radius + vertical > rect.height() {
        rect.height() * (radius / (radius + vertical))
    } else {
        radius
    };
    width.min(height)
}

/// Builds the profile of a rectangle with rounded corners.
///
/// The outline starts at the top edge and runs clockwise on screen, with +y
/// pointing down. Corners are circular unless smooth corners are requested,
/// in which case each corner is a cubic whose handles reach `sharpness`
/// times the radius along the edges.
#[derive(Debug)]
pub struct RectProfile {
    rect: BBox,
    radii: CornerRadii,
    smooth_corners: bool,
    corner_sharpness: f64,
}

impl RectProfile {
    /// Handle length of smooth corners relative to the radius.
    pub const DEFAULT_CORNER_SHARPNESS: f64 = 0.6;

    /// Creates a new rect profile operation with circular corners.
    #[must_use]
    pub fn new(rect: BBox, radii: CornerRadii) -> Self {
        Self {
            rect,
            radii,
            smooth_corners: false,
            corner_sharpness: Self::DEFAULT_CORNER_SHARPNESS,
        }
    }

    /// Draws the corners as cubic curves with the given sharpness instead.
    #[must_use]
    pub fn with_smooth_corners(mut self, sharpness: f64) -> Self {
        self.smooth_corners = true;
        self.corner_sharpness = sharpness;
        self
    }

    /// Radii after [`adjust_rect_radius`] has been applied to each corner.
    #[must_use]
    pub fn adjusted_radii(&self) -> CornerRadii {
        let CornerRadii {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        } = self.radii;
        let rect = &self.rect;
        CornerRadii {
            top_left: adjust_rect_radius(top_left, top_right, bottom_left, rect),
            top_right: adjust_rect_radius(top_right, top_left, bottom_right, rect),
            bottom_right: adjust_rect_radius(bottom_right, bottom_left, top_right, rect),
            bottom_left: adjust_rect_radius(bottom_left, bottom_right, top_left, rect),
        }
    }

    /// Executes the operation.
    #[must_use]
    pub fn execute(&self) -> CurveProfile {
        let mut profile = CurveProfile::new();
        let radii = self.adjusted_radii();
        let (left, top) = (self.rect.min.x, self.rect.min.y);
        let (right, bottom) = (self.rect.max.x, self.rect.max.y);

        let up = Vector2::new(0.0, -1.0);
        let down = Vector2::new(0.0, 1.0);
        let leftward = Vector2::new(-1.0, 0.0);
        let rightward = Vector2::new(1.0, 0.0);

        profile.push(LineSegment::new(
            Point2::new(left + radii.top_left, top),
            Point2::new(right - radii.top_right, top),
        ));

        let r = radii.top_right;
        self.push_corner(&mut profile, Point2::new(right - r, top + r), r, up, rightward);
        profile.push(LineSegment::new(
            Point2::new(right, top + r),
            Point2::new(right, bottom - radii.bottom_right),
        ));

        let r = radii.bottom_right;
        self.push_corner(&mut profile, Point2::new(right - r, bottom - r), r, rightward, down);
        profile.push(LineSegment::new(
            Point2::new(right - r, bottom),
            Point2::new(left + radii.bottom_left, bottom),
        ));

        let r = radii.bottom_left;
        self.push_corner(&mut profile, Point2::new(left + r, bottom - r), r, down, leftward);
        profile.push(LineSegment::new(
            Point2::new(left, bottom - r),
            Point2::new(left, top + radii.top_left),
        ));

        let r = radii.top_left;
        self.push_corner(&mut profile, Point2::new(left + r, top + r), r, leftward, up);

        profile
    }

    /// Adds the corner turning from the `from` side to the `to` side around
    /// `center`. Corners without a radius are skipped.
    fn push_corner(
        &self,
        profile: &mut CurveProfile,
        center: Point2,
        radius: f64,
        from_normal: Vector2,
        to_normal: Vector2,
    ) {
        if radius <= 0.0 {
            return;
        }

        let from = center + from_normal * radius;
        let to = center + to_normal * radius;
        if self.smooth_corners {
            let reach = self.corner_sharpness * radius;
            profile.push(CubicBezierSegment::new(
                from,
                from + to_normal * reach,
                to + from_normal * reach,
                to,
            ));
        } else {
            profile.push(CircleSegment::new(center, radius, from_normal, to_normal, false));
        }
    }
}
