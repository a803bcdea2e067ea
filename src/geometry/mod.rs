pub mod bbox;
pub mod curve;
pub mod curve_point;
pub mod knot;
pub mod profile;
pub mod segment;

pub use bbox::BBox;
pub use curve::{
    ArcSegment, CircleSegment, CubicBezierSegment, Curve, LineSegment, PolynomialSegment,
    QuadBezierSegment, UniformPolynomialCurveSampler,
};
pub use curve_point::CurvePoint;
pub use knot::{KnotAuto, KnotInfo};
pub use profile::CurveProfile;
pub use segment::Segment;
