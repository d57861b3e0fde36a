pub mod animation;
pub mod audio;
pub mod latest;
