use crate::device_display::interface::{Overlay, OverlayColor, OverlayLine};
use crate::gesture_capture::session::Session;

pub const WINDOW: &str = "Gesture Capture";

pub fn render(session: &Session, captured: bool) -> Overlay {
    let gesture_line = match session.active_gesture() {
        Some(gesture) => OverlayLine::new(format!("Gesture: {}", gesture), OverlayColor::Green),
        None => OverlayLine::new("Gesture: NOT SET", OverlayColor::Red),
    };

    let mode_line = if session.capture_enabled() {
        OverlayLine::new("Mode: CAPTURING", OverlayColor::Green)
    } else {
        OverlayLine::new("Mode: PAUSED", OverlayColor::White)
    };

    Overlay {
        lines: vec![
            gesture_line,
            mode_line,
            OverlayLine::new(
                format!("Images: {}", session.images_captured()),
                OverlayColor::White,
            ),
            OverlayLine::new(format!("Speed: {:.1} fps", session.fps()), OverlayColor::White),
        ],
        boxes: vec![],
        banner: captured.then(|| "CAPTURED!".to_string()),
    }
}
