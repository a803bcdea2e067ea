//! Tweening between shapes with different point counts and topology.

mod points;
mod profile;

pub use points::{
    best_rotation, distribute_points, lerp_distance, lerp_points, rotate_points, PointsLerp,
    PointsMorph,
};
pub use profile::{MorphParams, ProfileLerp, ProfileMorph};
