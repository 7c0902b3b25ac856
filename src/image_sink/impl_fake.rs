use crate::gesture_capture::session::GestureLabel;
use crate::image_sink::interface::{ImageSink, SaveRequest, SinkError};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Remembers what it was asked to save instead of touching the disk.
#[derive(Clone, Default)]
pub struct ImageSinkFake {
    saved: Arc<Mutex<Vec<SaveRequest>>>,
    fail: bool,
}

impl ImageSinkFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<SaveRequest> {
        self.saved
            .lock()
            .map(|saved| saved.clone())
            .unwrap_or_default()
    }
}

impl ImageSink for ImageSinkFake {
    fn save(&mut self, request: &SaveRequest) -> Result<PathBuf, SinkError> {
        if self.fail {
            return Err(SinkError::Rejected("disk full".to_string()));
        }
        let path = self
            .gesture_dir(&request.gesture)
            .join(format!("{}_{:06}.jpg", request.gesture, request.sequence));
        if let Ok(mut saved) = self.saved.lock() {
            saved.push(request.clone());
        }
        Ok(path)
    }

    fn gesture_dir(&self, gesture: &GestureLabel) -> PathBuf {
        PathBuf::from("fake").join(gesture.as_str())
    }
}
