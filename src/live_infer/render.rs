use crate::device_display::interface::{Overlay, OverlayBox, OverlayColor, OverlayLine};
use crate::image_classifier::interface::Prediction;

pub const WINDOW: &str = "Workflow Image";

pub fn render(predictions: &[Prediction]) -> Overlay {
    let summary = match predictions.first() {
        Some(first) => OverlayLine::new(
            format!("Detected: {} ({:.0}%)", first.class_name, first.confidence * 100.0),
            OverlayColor::Green,
        ),
        None => OverlayLine::new("Detected: nothing", OverlayColor::White),
    };

    Overlay {
        lines: vec![summary],
        boxes: predictions
            .iter()
            .map(|prediction| OverlayBox {
                bounding_box: prediction.bounding_box,
                label: format!("{} {:.2}", prediction.class_name, prediction.confidence),
                color: OverlayColor::Green,
            })
            .collect(),
        banner: None,
    }
}
