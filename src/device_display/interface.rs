use crate::image_classifier::interface::BoundingBox;
use image::DynamicImage;
use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayColor {
    Green,
    Red,
    White,
    Blue,
}

impl OverlayColor {
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            OverlayColor::Green => [0, 255, 0],
            OverlayColor::Red => [255, 0, 0],
            OverlayColor::White => [255, 255, 255],
            OverlayColor::Blue => [0, 0, 255],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    pub text: String,
    pub color: OverlayColor,
}

impl OverlayLine {
    pub fn new(text: impl Into<String>, color: OverlayColor) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    pub bounding_box: BoundingBox,
    pub label: String,
    pub color: OverlayColor,
}

/// Everything drawn on top of a frame: text lines stacked from the top-left,
/// labeled boxes, and an optional banner in the middle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub lines: Vec<OverlayLine>,
    pub boxes: Vec<OverlayBox>,
    pub banner: Option<String>,
}

pub trait DeviceDisplay {
    /// Show `frame` with `overlay` in the window called `window`.
    fn show(
        &mut self,
        window: &str,
        frame: &DynamicImage,
        overlay: &Overlay,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Show a static reference image for a detected class.
    fn show_reference(
        &mut self,
        class_name: &str,
        image: &DynamicImage,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}
