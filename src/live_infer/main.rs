use crate::config::InferConfig;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::device_keyboard::interface::KeyInput;
use crate::image_classifier::interface::{InferencePipeline, Prediction};
use crate::library::frame_loop::{FrameLoop, LoopControl};
use crate::library::logger::interface::Logger;
use crate::live_infer::reference_panel::ReferencePanel;
use crate::live_infer::render::{render, WINDOW};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Live webcam feed through a hosted workflow, with the reference image of
/// the first detected class shown next to it.
pub struct LiveInfer {
    logger: Arc<dyn Logger + Send + Sync>,
    camera: Box<dyn DeviceCamera>,
    pipeline: Box<dyn InferencePipeline>,
    display: Box<dyn DeviceDisplay>,
    panel: ReferencePanel,
    frame_skip: u64,
    min_frame_interval: Duration,
    last_frame_at: Option<Instant>,
    frames_read: u64,
    inferences: u64,
    predictions: Vec<Prediction>,
}

impl LiveInfer {
    pub fn new(
        config: &InferConfig,
        logger: Arc<dyn Logger + Send + Sync>,
        camera: Box<dyn DeviceCamera>,
        pipeline: Box<dyn InferencePipeline>,
        display: Box<dyn DeviceDisplay>,
        panel: ReferencePanel,
    ) -> Self {
        let min_frame_interval = match config.max_fps {
            0 => Duration::ZERO,
            fps => Duration::from_secs(1) / fps,
        };

        Self {
            logger: logger.with_namespace("infer"),
            camera,
            pipeline,
            display,
            panel,
            frame_skip: u64::from(config.frame_skip.max(1)),
            min_frame_interval,
            last_frame_at: None,
            frames_read: 0,
            inferences: 0,
            predictions: vec![],
        }
    }

    pub fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.camera.start()?;
        self.logger.info("Workflow inference started. Press 'q' to quit.");
        Ok(())
    }

    pub fn inferences(&self) -> u64 {
        self.inferences
    }

    pub fn panel(&self) -> &ReferencePanel {
        &self.panel
    }

    fn throttled(&self, now: Instant) -> bool {
        self.last_frame_at
            .is_some_and(|last| now.saturating_duration_since(last) < self.min_frame_interval)
    }

    fn process(&mut self, now: Instant) {
        let frame = match self.camera.capture_frame() {
            Ok(frame) => frame,
            Err(e) => {
                self.logger.warn(&format!("Failed to read frame: {}", e));
                return;
            }
        };
        self.last_frame_at = Some(now);
        self.frames_read += 1;

        // Skipped frames keep the boxes from the last processed one.
        if (self.frames_read - 1) % self.frame_skip == 0 {
            self.inferences += 1;
            match self.pipeline.infer(&frame) {
                Ok(predictions) => self.predictions = predictions,
                Err(e) => {
                    self.logger.warn(&format!("Inference failed: {}", e));
                    self.predictions.clear();
                }
            }
            // Unlabeled detections have no reference to show.
            if let Some(first) = self.predictions.first().filter(|p| !p.class_name.is_empty()) {
                let class_name = first.class_name.clone();
                self.panel.update(&class_name, self.display.as_mut());
            }
        }

        let overlay = render(&self.predictions);
        if let Err(e) = self.display.show(WINDOW, &frame, &overlay) {
            self.logger.error(&format!("Failed to display frame: {}", e));
        }
    }
}

impl FrameLoop for LiveInfer {
    fn step(&mut self, inputs: Vec<KeyInput>, now: Instant) -> LoopControl {
        if !self.throttled(now) {
            self.process(now);
        }

        if inputs.contains(&KeyInput::Key('q')) {
            LoopControl::Quit
        } else {
            LoopControl::Continue
        }
    }

    fn finish(&mut self) {
        if let Err(e) = self.camera.stop() {
            self.logger.error(&format!("Failed to stop camera: {}", e));
        }
        self.logger.info(&format!(
            "Workflow inference stopped: {} frames read, {} sent for inference",
            self.frames_read, self.inferences
        ));
    }
}
