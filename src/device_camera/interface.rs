use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

pub trait DeviceCamera {
    fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn capture_frame(&mut self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>>;
}

/// Which backend to read frames from, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraSource {
    Fake,
    Directory(PathBuf),
    V4l(usize),
}

impl FromStr for CameraSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "fake" {
            return Ok(CameraSource::Fake);
        }
        if let Some(path) = value.strip_prefix("dir:") {
            if path.is_empty() {
                return Err("dir: needs a path, e.g. dir:./frames".to_string());
            }
            return Ok(CameraSource::Directory(PathBuf::from(path)));
        }
        let index = value.strip_prefix("v4l:").unwrap_or(value);
        index
            .parse::<usize>()
            .map(CameraSource::V4l)
            .map_err(|_| format!("unknown camera '{}', use fake, dir:<path> or v4l:<index>", value))
    }
}

pub fn open_camera(
    source: &CameraSource,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Box<dyn DeviceCamera>, Box<dyn std::error::Error + Send + Sync>> {
    match source {
        CameraSource::Fake => Ok(Box::new(
            crate::device_camera::impl_fake::DeviceCameraFake::new(logger),
        )),
        CameraSource::Directory(path) => Ok(Box::new(
            crate::device_camera::impl_directory::DeviceCameraDirectory::new(path.clone(), logger),
        )),
        #[cfg(feature = "webcam")]
        CameraSource::V4l(index) => Ok(Box::new(
            crate::device_camera::impl_v4l::DeviceCameraV4l::new(*index, logger),
        )),
        #[cfg(not(feature = "webcam"))]
        CameraSource::V4l(index) => Err(format!(
            "camera v4l:{} needs a build with the `webcam` feature",
            index
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camera_source() {
        assert_eq!("fake".parse(), Ok(CameraSource::Fake));
        assert_eq!("0".parse(), Ok(CameraSource::V4l(0)));
        assert_eq!("v4l:2".parse(), Ok(CameraSource::V4l(2)));
        assert_eq!(
            "dir:./frames".parse(),
            Ok(CameraSource::Directory(PathBuf::from("./frames")))
        );
        assert!("dir:".parse::<CameraSource>().is_err());
        assert!("webcam".parse::<CameraSource>().is_err());
    }
}
