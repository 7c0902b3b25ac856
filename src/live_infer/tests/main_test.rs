#[cfg(test)]
mod main_test {
    use crate::config::InferConfig;
    use crate::device_keyboard::interface::KeyInput;
    use crate::library::frame_loop::{FrameLoop, LoopControl};
    use crate::live_infer::tests::fixture::{detections, Fixture};
    use std::time::{Duration, Instant};

    #[test]
    fn test_first_detection_drives_reference_panel() {
        let mut f = Fixture::unthrottled(vec![Ok(detections(&["sneaker", "boot"]))]);

        f.infer.step(vec![], Instant::now());

        assert_eq!(f.display.references(), vec![("sneaker".to_string(), (40, 30))]);
        assert_eq!(f.infer.panel().last_displayed(), Some("sneaker"));
        let shown = f.display.shown();
        assert_eq!(shown[0].window, "Workflow Image");
        assert_eq!(shown[0].overlay.boxes.len(), 2);
        assert_eq!(shown[0].overlay.lines[0].text, "Detected: sneaker (75%)");
    }

    #[test]
    fn test_reference_redrawn_only_on_class_change() {
        let mut f = Fixture::unthrottled(vec![
            Ok(detections(&["sneaker"])),
            Ok(detections(&["sneaker"])),
            Ok(detections(&["boot"])),
            Ok(detections(&["boot"])),
        ]);
        let now = Instant::now();

        for _ in 0..4 {
            f.infer.step(vec![], now);
        }

        let classes: Vec<_> = f
            .display
            .references()
            .into_iter()
            .map(|(class_name, _)| class_name)
            .collect();
        assert_eq!(classes, vec!["sneaker", "boot"]);
        assert_eq!(f.logger.count_containing("Displaying reference for: boot"), 1);
    }

    #[test]
    fn test_unlabeled_detection_skips_reference_panel() {
        let mut f = Fixture::unthrottled(vec![Ok(detections(&["", "boot"]))]);

        f.infer.step(vec![], Instant::now());

        assert!(f.display.references().is_empty());
        assert_eq!(f.logger.count_containing("No reference image"), 0);
        assert_eq!(f.infer.panel().last_displayed(), None);
        assert_eq!(f.display.shown()[0].overlay.boxes.len(), 2);
    }

    #[test]
    fn test_inference_failure_still_shows_frame() {
        let mut f = Fixture::unthrottled(vec![Ok(detections(&["sneaker"])), Err("timeout".to_string())]);
        let now = Instant::now();

        f.infer.step(vec![], now);
        f.infer.step(vec![], now);

        assert_eq!(f.logger.count_containing("Inference failed: timeout"), 1);
        let shown = f.display.shown();
        assert_eq!(shown.len(), 2);
        assert!(shown[1].overlay.boxes.is_empty());
        assert_eq!(shown[1].overlay.lines[0].text, "Detected: nothing");
    }

    #[test]
    fn test_frame_skip_reuses_last_predictions() {
        let config = InferConfig {
            max_fps: 0,
            frame_skip: 3,
            ..InferConfig::default()
        };
        let mut f = Fixture::new(config, vec![Ok(detections(&["boot"]))]);
        let now = Instant::now();

        for _ in 0..7 {
            f.infer.step(vec![], now);
        }

        assert_eq!(f.infer.inferences(), 3);
        assert!(f.display.shown().iter().all(|s| s.overlay.boxes.len() == 1));
    }

    #[test]
    fn test_max_fps_throttles_frame_reads() {
        let config = InferConfig {
            max_fps: 10,
            ..InferConfig::default()
        };
        let mut f = Fixture::new(config, vec![Ok(vec![])]);
        let start = Instant::now();

        f.infer.step(vec![], start);
        f.infer.step(vec![], start + Duration::from_millis(50));
        f.infer.step(vec![], start + Duration::from_millis(100));

        assert_eq!(f.display.shown().len(), 2);
    }

    #[test]
    fn test_q_quits_even_when_throttled() {
        let mut f = Fixture::new(InferConfig::default(), vec![Ok(vec![])]);
        let now = Instant::now();

        f.infer.step(vec![], now);
        assert_eq!(f.infer.step(vec![KeyInput::Key('q')], now), LoopControl::Quit);
        f.infer.finish();

        assert_eq!(f.logger.count_containing("1 frames read, 1 sent for inference"), 1);
    }
}
