#[cfg(test)]
mod main_test {
    use crate::device_camera::impl_fake::DeviceCameraFake;
    use crate::device_display::interface::OverlayColor;
    use crate::device_keyboard::interface::KeyInput;
    use crate::image_classifier::interface::BoundingBox;
    use crate::library::frame_loop::{FrameLoop, LoopControl};
    use crate::library::logger::impl_fake::LoggerFake;
    use crate::live_detect::tests::fixture::{prediction, Fixture};
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn test_overlay_lists_emotions_and_confident_boxes() {
        let mut f = Fixture::new(Ok(vec![
            prediction("cup", 0.9, BoundingBox::from_center(20.0, 20.0, 10.0, 10.0)),
            prediction("chair", 0.3, BoundingBox::from_center(50.0, 50.0, 10.0, 10.0)),
        ]));

        assert_eq!(f.detect.step(vec![], Instant::now()), LoopControl::Continue);

        let shown = f.display.shown();
        assert_eq!(shown[0].window, "Emotion Percentages");
        let overlay = &shown[0].overlay;
        let texts: Vec<_> = overlay.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["neutral: 12.50%", "happy: 80.25%", "sad: 7.25%"]);
        assert_eq!(overlay.lines[1].color, OverlayColor::Green);
        assert_eq!(overlay.lines[0].color, OverlayColor::White);
        assert_eq!(overlay.boxes.len(), 1);
        assert_eq!(overlay.boxes[0].label, "cup 0.90");
    }

    #[test]
    fn test_emotion_runs_on_the_person_crop() {
        let mut f = Fixture::new(Ok(vec![
            prediction("person", 0.6, BoundingBox::from_center(100.0, 100.0, 40.0, 60.0)),
            prediction("person", 0.8, BoundingBox::from_center(160.0, 120.0, 80.0, 100.0)),
        ]));

        f.detect.step(vec![], Instant::now());

        assert_eq!(*f.emotion.seen.lock().unwrap(), vec![(80, 100)]);
    }

    #[test]
    fn test_emotion_runs_on_whole_frame_without_person() {
        let mut f = Fixture::new(Ok(vec![]));

        f.detect.step(vec![], Instant::now());

        assert_eq!(*f.emotion.seen.lock().unwrap(), vec![(320, 240)]);
    }

    #[test]
    fn test_detection_failure_still_shows_frame() {
        let mut f = Fixture::new(Err("model exploded".to_string()));

        f.detect.step(vec![], Instant::now());

        assert_eq!(f.logger.count_containing("Detection failed"), 1);
        assert_eq!(f.display.shown().len(), 1);
        assert!(f.display.last_overlay().unwrap().boxes.is_empty());
    }

    #[test]
    fn test_frame_read_failure_is_transient() {
        let logger = LoggerFake::new();
        let mut camera = DeviceCameraFake::new(Arc::new(logger.clone()));
        camera.fail_next_reads(1);
        let mut f = Fixture::with_camera(camera, Ok(vec![]), logger);

        assert_eq!(f.detect.step(vec![], Instant::now()), LoopControl::Continue);
        assert_eq!(f.detect.step(vec![], Instant::now()), LoopControl::Continue);

        assert_eq!(f.logger.count_containing("Failed to read frame"), 1);
        assert_eq!(f.detect.frames_processed(), 1);
    }

    #[test]
    fn test_q_quits_and_finish_stops_camera() {
        let mut f = Fixture::new(Ok(vec![]));

        assert_eq!(
            f.detect.step(vec![KeyInput::Key('q')], Instant::now()),
            LoopControl::Quit
        );
        f.detect.finish();

        assert_eq!(f.logger.count_containing("stopped after 1 frames"), 1);
    }
}
