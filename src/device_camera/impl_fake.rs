use crate::device_camera::interface::DeviceCamera;
use crate::library::logger::interface::Logger;
use image::{DynamicImage, Rgb, RgbImage};
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

/// Synthetic camera: a gradient with a sweeping bar and a bit of noise, so
/// consecutive frames differ.
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    width: u32,
    height: u32,
    frame_index: u32,
    started: bool,
    available: bool,
    failing_reads: u32,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            width: 320,
            height: 240,
            frame_index: 0,
            started: false,
            available: true,
            failing_reads: 0,
        }
    }

    /// A camera whose `start` fails, as if the device could not be opened.
    pub fn unavailable(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            available: false,
            ..Self::new(logger)
        }
    }

    /// The next `count` reads fail before frames flow again.
    pub fn fail_next_reads(&mut self, count: u32) {
        self.failing_reads = count;
    }

    fn render_frame(&self) -> Result<RgbImage, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();
        let noise = Uniform::new_inclusive(0u8, 24)?;
        let bar_x = (self.frame_index * 4) % self.width;

        let mut image = RgbImage::new(self.width, self.height);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let base_r = (x * 255 / self.width) as u8;
            let base_g = (y * 255 / self.height) as u8;
            let base_b = if x.abs_diff(bar_x) < 6 { 255 } else { 96 };
            *pixel = Rgb([
                base_r.saturating_add(noise.sample(&mut rng)),
                base_g.saturating_add(noise.sample(&mut rng)),
                base_b,
            ]);
        }
        Ok(image)
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.available {
            return Err("Cannot open camera".into());
        }
        self.logger.info("Camera started");
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info("Camera stopped");
        self.started = false;
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
        if !self.started {
            return Err("camera not started".into());
        }
        if self.failing_reads > 0 {
            self.failing_reads -= 1;
            return Err("Failed to read frame".into());
        }
        let image = self.render_frame()?;
        self.frame_index = self.frame_index.wrapping_add(1);
        Ok(DynamicImage::ImageRgb8(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;

    #[test]
    fn test_capture_requires_start() {
        let mut camera = DeviceCameraFake::new(Arc::new(LoggerFake::new()));

        assert!(camera.capture_frame().is_err());
        camera.start().unwrap();

        let frame = camera.capture_frame().unwrap();
        assert_eq!((frame.width(), frame.height()), (320, 240));
    }

    #[test]
    fn test_unavailable_camera_fails_to_start() {
        let mut camera = DeviceCameraFake::unavailable(Arc::new(LoggerFake::new()));

        assert!(camera.start().is_err());
    }

    #[test]
    fn test_failed_reads_recover() {
        let mut camera = DeviceCameraFake::new(Arc::new(LoggerFake::new()));
        camera.start().unwrap();
        camera.fail_next_reads(2);

        assert!(camera.capture_frame().is_err());
        assert!(camera.capture_frame().is_err());
        assert!(camera.capture_frame().is_ok());
    }
}
