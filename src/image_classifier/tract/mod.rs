pub mod image;
pub mod yolo;
