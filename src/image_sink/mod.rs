pub mod impl_fake;
pub mod impl_filesystem;
pub mod interface;
