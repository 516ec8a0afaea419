pub mod courses;
pub mod sessions;
pub mod status;
