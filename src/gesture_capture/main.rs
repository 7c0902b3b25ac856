use crate::config::CaptureConfig;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::device_keyboard::interface::KeyInput;
use crate::gesture_capture::command::{controls_help, Command, GESTURE_PROMPT};
use crate::gesture_capture::render::{render, WINDOW};
use crate::gesture_capture::session::Session;
use crate::image_sink::interface::{ImageSink, SaveRequest};
use crate::library::frame_loop::{FrameLoop, LoopControl};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;
use std::time::Instant;

/// The training-data capture tool: one frame per step, saved when the
/// session says so, always displayed with the session state on top.
pub struct GestureCapture {
    session: Session,
    logger: Arc<dyn Logger + Send + Sync>,
    camera: Box<dyn DeviceCamera>,
    sink: Box<dyn ImageSink>,
    display: Box<dyn DeviceDisplay>,
}

impl GestureCapture {
    pub fn new(
        config: &CaptureConfig,
        logger: Arc<dyn Logger + Send + Sync>,
        camera: Box<dyn DeviceCamera>,
        sink: Box<dyn ImageSink>,
        display: Box<dyn DeviceDisplay>,
    ) -> Self {
        Self {
            session: Session::new(config),
            logger: logger.with_namespace("capture"),
            camera,
            sink,
            display,
        }
    }

    /// Opens the camera. Failing here is fatal for the tool.
    pub fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.camera.start()?;
        self.logger.info("GESTURE TRAINING DATA CAPTURE TOOL");
        for line in controls_help() {
            self.logger.info(line);
        }
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn save(&mut self, request: &SaveRequest) -> bool {
        match self.sink.save(request) {
            Ok(path) => {
                self.logger.info(&format!("Captured: {}", path.display()));
                true
            }
            Err(e) => {
                self.logger.error(&format!("Failed to save image: {}", e));
                false
            }
        }
    }

    fn report_speed(&self) {
        self.logger
            .info(&format!("Capture speed: {:.1} fps", self.session.fps()));
    }

    fn handle(&mut self, command: Command, frame: Option<&DynamicImage>, now: Instant) -> LoopControl {
        match command {
            Command::Quit => LoopControl::Quit,
            Command::EnterGesture => {
                self.session.pause();
                LoopControl::PromptText(GESTURE_PROMPT.to_string())
            }
            Command::ResetGesture => {
                self.session.reset();
                LoopControl::PromptText(GESTURE_PROMPT.to_string())
            }
            Command::SetGesture(name) => match self.session.set_gesture(&name) {
                Ok(gesture) => {
                    self.logger.info(&format!("Gesture set to: {}", gesture));
                    self.logger.info(&format!(
                        "Images will be saved to: {}",
                        self.sink.gesture_dir(&gesture).display()
                    ));
                    LoopControl::Continue
                }
                Err(e) => {
                    self.logger
                        .warn(&format!("No gesture name entered ({}). Please try again.", e));
                    LoopControl::PromptText(GESTURE_PROMPT.to_string())
                }
            },
            Command::ToggleCapture => {
                match self.session.toggle_capture(now) {
                    Ok(true) => self.logger.info("Continuous capture STARTED"),
                    Ok(false) => self.logger.info("Continuous capture STOPPED"),
                    Err(e) => self.logger.warn(&e.to_string()),
                }
                LoopControl::Continue
            }
            Command::CaptureOnce => {
                let Some(frame) = frame else {
                    self.logger.warn("No frame available, nothing captured");
                    return LoopControl::Continue;
                };
                match self.session.capture_once(frame) {
                    Ok(request) => {
                        self.save(&request);
                    }
                    Err(e) => self.logger.warn(&e.to_string()),
                }
                LoopControl::Continue
            }
            Command::Faster => {
                self.session.faster();
                self.report_speed();
                LoopControl::Continue
            }
            Command::Slower => {
                self.session.slower();
                self.report_speed();
                LoopControl::Continue
            }
        }
    }
}

impl FrameLoop for GestureCapture {
    fn step(&mut self, inputs: Vec<KeyInput>, now: Instant) -> LoopControl {
        // Keys still work while the camera is failing, only capturing needs a frame.
        let frame = match self.camera.capture_frame() {
            Ok(frame) => Some(frame),
            Err(e) => {
                self.logger.warn(&format!("Failed to read frame: {}", e));
                None
            }
        };

        if let Some(frame) = &frame {
            let captured = match self.session.maybe_capture(now, frame) {
                Some(request) => self.save(&request),
                None => false,
            };

            let overlay = render(&self.session, captured);
            if let Err(e) = self.display.show(WINDOW, frame, &overlay) {
                self.logger.error(&format!("Failed to display frame: {}", e));
            }
        }

        let mut control = LoopControl::Continue;
        for input in inputs {
            let Some(command) = Command::from_input(input) else {
                continue;
            };
            match self.handle(command, frame.as_ref(), now) {
                LoopControl::Quit => return LoopControl::Quit,
                LoopControl::PromptText(prompt) => control = LoopControl::PromptText(prompt),
                LoopControl::Continue => {}
            }
        }
        control
    }

    fn finish(&mut self) {
        if let Err(e) = self.camera.stop() {
            self.logger.error(&format!("Failed to stop camera: {}", e));
        }
        self.logger.info("Capture session completed!");
        self.logger.info(&format!(
            "Total images captured: {}",
            self.session.images_captured()
        ));
        if let Some(gesture) = self.session.active_gesture() {
            self.logger.info(&format!(
                "Saved to: {}",
                self.sink.gesture_dir(gesture).display()
            ));
        }
    }
}
