use crate::gesture_capture::session::GestureLabel;
use crate::image_sink::interface::{ImageSink, SaveRequest, SinkError};
use crate::library::logger::interface::Logger;
use chrono::{DateTime, Local};
use image::codecs::jpeg::JpegEncoder;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Writes `{base_dir}/{gesture}/{gesture}_{YYYYMMDD_HHMMSS_ffffff}.jpg`.
pub struct ImageSinkFilesystem {
    base_dir: PathBuf,
    jpeg_quality: u8,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageSinkFilesystem {
    pub fn new(base_dir: PathBuf, jpeg_quality: u8, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            base_dir,
            jpeg_quality,
            logger: logger.with_namespace("image_sink"),
        }
    }

    pub fn save_at(
        &self,
        request: &SaveRequest,
        captured_at: DateTime<Local>,
    ) -> Result<PathBuf, SinkError> {
        let dir = self.gesture_dir(&request.gesture);
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|source| SinkError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            self.logger
                .info(&format!("Created folder {}", dir.display()));
        }

        let stem = format!(
            "{}_{}",
            request.gesture,
            captured_at.format("%Y%m%d_%H%M%S_%6f")
        );
        let (path, file) = create_unique(&dir, &stem)?;

        if let Err(source) = self.encode(file, request) {
            // Do not leave a truncated JPEG behind.
            let _ = std::fs::remove_file(&path);
            return Err(SinkError::Encode { path, source });
        }
        Ok(path)
    }

    fn encode(&self, file: File, request: &SaveRequest) -> Result<(), image::ImageError> {
        let mut writer = BufWriter::new(file);
        JpegEncoder::new_with_quality(&mut writer, self.jpeg_quality)
            .encode_image(&request.frame.to_rgb8())?;
        writer.flush()?;
        Ok(())
    }
}

impl ImageSink for ImageSinkFilesystem {
    fn save(&mut self, request: &SaveRequest) -> Result<PathBuf, SinkError> {
        self.save_at(request, Local::now())
    }

    fn gesture_dir(&self, gesture: &GestureLabel) -> PathBuf {
        self.base_dir.join(gesture.as_str())
    }
}

fn create_unique(dir: &Path, stem: &str) -> Result<(PathBuf, File), SinkError> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let name = match attempt {
            0 => format!("{}.jpg", stem),
            n => format!("{}_{}.jpg", stem, n),
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(SinkError::Write { path, source }),
        }
    }
    Err(SinkError::NameExhausted(stem.to_string()))
}
