use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;

const FRAME_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "JPG"];

/// Replays the images of a directory in file-name order, looping forever.
pub struct DeviceCameraDirectory {
    dir: PathBuf,
    frames: Vec<PathBuf>,
    next: usize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraDirectory {
    pub fn new(dir: PathBuf, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            dir,
            frames: Vec::new(),
            next: 0,
            logger: logger.with_namespace("camera").with_namespace("directory"),
        }
    }
}

impl DeviceCamera for DeviceCameraDirectory {
    fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut frames = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_frame = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| FRAME_EXTENSIONS.contains(&ext));
            if is_frame {
                frames.push(path);
            }
        }
        if frames.is_empty() {
            return Err(format!("no images found in {}", self.dir.display()).into());
        }
        frames.sort();

        self.logger.info(&format!(
            "Replaying {} frames from {}",
            frames.len(),
            self.dir.display()
        ));
        self.frames = frames;
        self.next = 0;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.frames.clear();
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        if self.frames.is_empty() {
            return Err("camera not started".into());
        }
        let path = &self.frames[self.next % self.frames.len()];
        self.next = (self.next + 1) % self.frames.len();
        Ok(image::open(path)?)
    }
}
