use crate::config::CaptureConfig;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::gesture_capture::main::GestureCapture;
use crate::image_sink::interface::ImageSink;
use crate::library::logger::impl_fake::LoggerFake;
use std::sync::Arc;

pub struct Fixture {
    pub logger: LoggerFake,
    pub display: DeviceDisplayFake,
    pub capture: GestureCapture,
}

impl Fixture {
    pub fn new(sink: Box<dyn ImageSink>) -> Self {
        let logger = LoggerFake::new();
        let camera = DeviceCameraFake::new(Arc::new(logger.clone()));
        Self::with_camera(camera, sink, logger)
    }

    pub fn with_camera(camera: DeviceCameraFake, sink: Box<dyn ImageSink>, logger: LoggerFake) -> Self {
        let display = DeviceDisplayFake::new();
        let mut capture = GestureCapture::new(
            &CaptureConfig::default(),
            Arc::new(logger.clone()),
            Box::new(camera),
            sink,
            Box::new(display.clone()),
        );
        capture.start().unwrap();

        Self {
            logger,
            display,
            capture,
        }
    }
}
