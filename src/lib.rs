pub mod cloud_cover;
pub mod logger;
