pub mod morph;
pub mod profile;
