pub mod constants;
pub mod misc;
