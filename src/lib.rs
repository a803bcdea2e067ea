pub mod cache;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod path_data;
pub mod sink;

pub use error::{ProfilisError, Result};
