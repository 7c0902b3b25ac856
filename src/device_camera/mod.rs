pub mod impl_directory;
pub mod impl_fake;
#[cfg(feature = "webcam")]
pub mod impl_v4l;
pub mod interface;
