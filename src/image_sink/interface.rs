use crate::gesture_capture::session::GestureLabel;
use image::DynamicImage;
use std::path::PathBuf;

/// A frame the capture session decided to keep.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub gesture: GestureLabel,
    pub frame: DynamicImage,
    /// Position of this image in the current gesture's run, starting at 1.
    pub sequence: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("no free file name left for {0}")]
    NameExhausted(String),
    #[error("{0}")]
    Rejected(String),
}

pub trait ImageSink {
    /// Persists the frame and returns where it landed.
    fn save(&mut self, request: &SaveRequest) -> Result<PathBuf, SinkError>;

    /// Directory that holds the images of `gesture`.
    fn gesture_dir(&self, gesture: &GestureLabel) -> PathBuf;
}
