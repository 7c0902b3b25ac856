use crate::config::DetectConfig;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::device_keyboard::interface::KeyInput;
use crate::image_classifier::interface::{
    BoundingBox, EmotionClassifier, EmotionScores, ObjectDetector, Prediction,
};
use crate::library::frame_loop::{FrameLoop, LoopControl};
use crate::library::logger::interface::Logger;
use crate::live_detect::render::{render, WINDOW};
use image::DynamicImage;
use std::sync::Arc;
use std::time::Instant;

const PERSON: &str = "person";

/// Live webcam feed through an object detector and an emotion classifier.
pub struct LiveDetect {
    logger: Arc<dyn Logger + Send + Sync>,
    camera: Box<dyn DeviceCamera>,
    detector: Box<dyn ObjectDetector>,
    emotion: Box<dyn EmotionClassifier>,
    display: Box<dyn DeviceDisplay>,
    box_min_confidence: f32,
    frames_processed: u64,
}

impl LiveDetect {
    pub fn new(
        config: &DetectConfig,
        logger: Arc<dyn Logger + Send + Sync>,
        camera: Box<dyn DeviceCamera>,
        detector: Box<dyn ObjectDetector>,
        emotion: Box<dyn EmotionClassifier>,
        display: Box<dyn DeviceDisplay>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("detect"),
            camera,
            detector,
            emotion,
            display,
            box_min_confidence: config.box_min_confidence,
            frames_processed: 0,
        }
    }

    pub fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.camera.start()?;
        self.logger.info("Live detection started. Press 'q' to quit.");
        Ok(())
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    fn detect(&self, frame: &DynamicImage) -> Vec<Prediction> {
        self.detector.detect(frame).unwrap_or_else(|e| {
            self.logger.warn(&format!("Detection failed: {}", e));
            vec![]
        })
    }

    fn classify(&self, frame: &DynamicImage, predictions: &[Prediction]) -> EmotionScores {
        let face = most_confident_person(predictions, self.box_min_confidence)
            .and_then(|person| crop(frame, &person.bounding_box));
        let target = face.as_ref().unwrap_or(frame);

        self.emotion.classify(target).unwrap_or_else(|e| {
            self.logger.warn(&format!("Emotion classification failed: {}", e));
            EmotionScores::default()
        })
    }
}

fn most_confident_person(predictions: &[Prediction], min_confidence: f32) -> Option<&Prediction> {
    predictions
        .iter()
        .filter(|p| p.class_name == PERSON && p.confidence >= min_confidence)
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
}

/// `None` when the box falls outside the frame or is degenerate.
fn crop(frame: &DynamicImage, bounding_box: &BoundingBox) -> Option<DynamicImage> {
    let x = bounding_box.x_min.max(0.0) as u32;
    let y = bounding_box.y_min.max(0.0) as u32;
    let x_max = (bounding_box.x_max.max(0.0) as u32).min(frame.width());
    let y_max = (bounding_box.y_max.max(0.0) as u32).min(frame.height());
    if x_max <= x || y_max <= y {
        return None;
    }
    Some(frame.crop_imm(x, y, x_max - x, y_max - y))
}

impl FrameLoop for LiveDetect {
    fn step(&mut self, inputs: Vec<KeyInput>, _now: Instant) -> LoopControl {
        let quit = inputs.contains(&KeyInput::Key('q'));

        match self.camera.capture_frame() {
            Ok(frame) => {
                let predictions = self.detect(&frame);
                let scores = self.classify(&frame, &predictions);
                self.frames_processed += 1;

                let overlay = render(&scores, &predictions, self.box_min_confidence);
                if let Err(e) = self.display.show(WINDOW, &frame, &overlay) {
                    self.logger.error(&format!("Failed to display frame: {}", e));
                }
            }
            Err(e) => self.logger.warn(&format!("Failed to read frame: {}", e)),
        }

        if quit {
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
            "Live detection stopped after {} frames",
            self.frames_processed
        ));
    }
}
