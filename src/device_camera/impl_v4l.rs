use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use image::{DynamicImage, Rgb, RgbImage};
use std::sync::Arc;
use std::time::Duration;
use v4l::buffer::Type;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;
use v4l::video::Capture;
use v4l::FourCC;

pub struct V4lCameraConfig {
    pub resolution_width: u32,
    pub resolution_height: u32,
    pub buffer_count: u32,
    pub warmup_delay: Duration,
}

impl Default for V4lCameraConfig {
    fn default() -> Self {
        Self {
            resolution_width: 640,
            resolution_height: 480,
            buffer_count: 4,
            warmup_delay: Duration::from_millis(500),
        }
    }
}

enum PixelFormat {
    Mjpeg,
    Yuyv,
}

pub struct DeviceCameraV4l {
    index: usize,
    config: V4lCameraConfig,
    stream: Option<MmapStream<'static>>,
    format: (u32, u32, PixelFormat),
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceCameraV4l {
    pub fn new(index: usize, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_config(index, V4lCameraConfig::default(), logger)
    }

    pub fn with_config(
        index: usize,
        config: V4lCameraConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            index,
            config,
            stream: None,
            format: (0, 0, PixelFormat::Mjpeg),
            logger: logger.with_namespace("camera").with_namespace("v4l"),
        }
    }
}

impl DeviceCamera for DeviceCameraV4l {
    fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger
            .info(&format!("Opening /dev/video{}", self.index));
        let device = Device::new(self.index)
            .map_err(|e| format!("Cannot open camera (index {}): {}", self.index, e))?;

        let mut format = device.format()?;
        format.width = self.config.resolution_width;
        format.height = self.config.resolution_height;
        format.fourcc = FourCC::new(b"MJPG");
        let format = device.set_format(&format)?;

        let pixel_format = if format.fourcc == FourCC::new(b"MJPG") {
            PixelFormat::Mjpeg
        } else if format.fourcc == FourCC::new(b"YUYV") {
            PixelFormat::Yuyv
        } else {
            return Err(format!("unsupported pixel format {}", format.fourcc).into());
        };

        let stream =
            MmapStream::with_buffers(&device, Type::VideoCapture, self.config.buffer_count)?;
        std::thread::sleep(self.config.warmup_delay);

        self.logger.info(&format!(
            "Camera streaming {}x{} {}",
            format.width, format.height, format.fourcc
        ));
        self.format = (format.width, format.height, pixel_format);
        self.stream = Some(stream);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.stream.take().is_some() {
            self.logger.info("Camera stopped");
        }
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        let stream = self.stream.as_mut().ok_or("camera not started")?;
        let (buffer, meta) = stream.next()?;
        let data = &buffer[..(meta.bytesused as usize).min(buffer.len())];

        match self.format {
            (_, _, PixelFormat::Mjpeg) => Ok(image::load_from_memory(data)?),
            (width, height, PixelFormat::Yuyv) => Ok(DynamicImage::ImageRgb8(yuyv_to_rgb(
                data, width, height,
            )?)),
        }
    }
}

impl Drop for DeviceCameraV4l {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            self.logger
                .error(&format!("Failed to stop camera during shutdown: {}", e));
        }
    }
}

fn yuyv_to_rgb(
    data: &[u8],
    width: u32,
    height: u32,
) -> Result<RgbImage, Box<dyn std::error::Error + Send + Sync>> {
    let expected = (width * height * 2) as usize;
    if data.len() < expected {
        return Err(format!("short YUYV frame: {} of {} bytes", data.len(), expected).into());
    }

    let mut image = RgbImage::new(width, height);
    for (i, chunk) in data[..expected].chunks_exact(4).enumerate() {
        let [y0, u, y1, v] = [chunk[0], chunk[1], chunk[2], chunk[3]];
        let x = (i as u32 * 2) % width;
        let y = (i as u32 * 2) / width;
        image.put_pixel(x, y, yuv_to_rgb(y0, u, v));
        image.put_pixel(x + 1, y, yuv_to_rgb(y1, u, v));
    }
    Ok(image)
}

fn yuv_to_rgb(y: u8, u: u8, v: u8) -> Rgb<u8> {
    let c = y as f32 - 16.0;
    let d = u as f32 - 128.0;
    let e = v as f32 - 128.0;
    let clamp = |value: f32| value.round().clamp(0.0, 255.0) as u8;
    Rgb([
        clamp(1.164 * c + 1.596 * e),
        clamp(1.164 * c - 0.392 * d - 0.813 * e),
        clamp(1.164 * c + 2.017 * d),
    ])
}
