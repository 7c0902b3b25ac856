use crate::device_display::interface::{Overlay, OverlayBox, OverlayColor, OverlayLine};
use crate::image_classifier::interface::{EmotionScores, Prediction};

pub const WINDOW: &str = "Emotion Percentages";

pub fn render(scores: &EmotionScores, predictions: &[Prediction], box_min_confidence: f32) -> Overlay {
    let dominant = scores.dominant().map(|(label, _)| label.as_str());

    let lines = scores
        .scores
        .iter()
        .map(|(label, percent)| {
            let color = if Some(label.as_str()) == dominant {
                OverlayColor::Green
            } else {
                OverlayColor::White
            };
            OverlayLine::new(format!("{}: {:.2}%", label, percent), color)
        })
        .collect();

    let boxes = predictions
        .iter()
        .filter(|prediction| prediction.confidence >= box_min_confidence)
        .map(|prediction| OverlayBox {
            bounding_box: prediction.bounding_box,
            label: format!("{} {:.2}", prediction.class_name, prediction.confidence),
            color: OverlayColor::Blue,
        })
        .collect();

    Overlay {
        lines,
        boxes,
        banner: None,
    }
}
