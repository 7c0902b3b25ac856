#[cfg(test)]
mod session_test {
    use crate::config::CaptureConfig;
    use crate::gesture_capture::session::{Session, SessionError, SessionState};
    use image::{DynamicImage, RgbImage};
    use std::time::{Duration, Instant};

    fn frame() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(8, 8))
    }

    #[test]
    fn test_new_session_is_unset() {
        let session = Session::new(&CaptureConfig::default());

        assert_eq!(session.state(), SessionState::Unset);
        assert!(session.active_gesture().is_none());
        assert!(!session.capture_enabled());
        assert_eq!(session.images_captured(), 0);
        assert_eq!(session.interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_set_gesture_trims_and_resets_count() {
        let mut session = Session::new(&CaptureConfig::default());
        session.set_gesture("fist").unwrap();
        session.capture_once(&frame()).unwrap();
        assert_eq!(session.images_captured(), 1);

        let gesture = session.set_gesture("  thumbs_up \n").unwrap();

        assert_eq!(gesture.as_str(), "thumbs_up");
        assert_eq!(session.images_captured(), 0);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_rejected_names_leave_session_untouched() {
        let mut session = Session::new(&CaptureConfig::default());
        session.set_gesture("peace").unwrap();
        session.capture_once(&frame()).unwrap();

        assert_eq!(session.set_gesture("   "), Err(SessionError::EmptyName));
        assert!(matches!(
            session.set_gesture("../escape"),
            Err(SessionError::InvalidName(_))
        ));
        assert!(matches!(
            session.set_gesture(".."),
            Err(SessionError::InvalidName(_))
        ));

        assert_eq!(session.active_gesture().unwrap().as_str(), "peace");
        assert_eq!(session.images_captured(), 1);
    }

    #[test]
    fn test_toggle_without_gesture_is_a_precondition_failure() {
        let mut session = Session::new(&CaptureConfig::default());

        assert_eq!(
            session.toggle_capture(Instant::now()),
            Err(SessionError::GestureNotSet)
        );
        assert!(!session.capture_enabled());
        assert_eq!(session.state(), SessionState::Unset);
    }

    #[test]
    fn test_state_transitions() {
        let mut session = Session::new(&CaptureConfig::default());
        let now = Instant::now();

        session.set_gesture("peace").unwrap();
        assert_eq!(session.state(), SessionState::Idle);

        assert_eq!(session.toggle_capture(now), Ok(true));
        assert_eq!(session.state(), SessionState::Capturing);

        assert_eq!(session.toggle_capture(now), Ok(false));
        assert_eq!(session.state(), SessionState::Idle);

        session.toggle_capture(now).unwrap();
        session.pause();
        assert_eq!(session.state(), SessionState::Idle);

        session.toggle_capture(now).unwrap();
        session.reset();
        assert_eq!(session.state(), SessionState::Unset);
        assert_eq!(session.images_captured(), 0);
    }

    #[test]
    fn test_never_captures_without_gesture() {
        let mut session = Session::new(&CaptureConfig::default());
        let start = Instant::now();

        for tick in 0..50u64 {
            let now = start + Duration::from_millis(100 * tick);
            let _ = session.toggle_capture(now);
            assert!(session.maybe_capture(now, &frame()).is_none());
            session.faster();
        }
        assert!(session.capture_once(&frame()).is_err());

        session.set_gesture("fist").unwrap();
        session.toggle_capture(start).unwrap();
        session.reset();
        let later = start + Duration::from_secs(60);
        assert!(session.maybe_capture(later, &frame()).is_none());
        assert_eq!(session.images_captured(), 0);
    }

    #[test]
    fn test_enabling_waits_one_full_interval() {
        let mut session = Session::new(&CaptureConfig::default());
        let start = Instant::now();
        session.set_gesture("peace").unwrap();
        session.toggle_capture(start).unwrap();

        assert!(session.maybe_capture(start, &frame()).is_none());
        assert!(session
            .maybe_capture(start + Duration::from_millis(99), &frame())
            .is_none());
        assert!(session
            .maybe_capture(start + Duration::from_millis(100), &frame())
            .is_some());
    }

    #[test]
    fn test_one_capture_per_tick_at_matching_interval() {
        let mut session = Session::new(&CaptureConfig::default());
        assert_eq!(session.interval(), Duration::from_millis(100));
        let start = Instant::now();
        session.set_gesture("thumbs_up").unwrap();
        session.toggle_capture(start).unwrap();

        for tick in 1..=20u32 {
            let now = start + Duration::from_millis(100) * tick;
            let request = session.maybe_capture(now, &frame());
            assert!(request.is_some(), "tick {} did not capture", tick);
            assert_eq!(request.unwrap().sequence, tick);
        }
        assert_eq!(session.images_captured(), 20);
    }

    #[test]
    fn test_paused_session_does_not_capture() {
        let mut session = Session::new(&CaptureConfig::default());
        let start = Instant::now();
        session.set_gesture("peace").unwrap();

        assert!(session
            .maybe_capture(start + Duration::from_secs(5), &frame())
            .is_none());

        session.toggle_capture(start).unwrap();
        session.pause();
        assert!(session
            .maybe_capture(start + Duration::from_secs(5), &frame())
            .is_none());
    }

    #[test]
    fn test_capture_once_does_not_reset_timer() {
        let mut session = Session::new(&CaptureConfig::default());
        let start = Instant::now();
        session.set_gesture("peace").unwrap();
        session.toggle_capture(start).unwrap();

        let single = session.capture_once(&frame()).unwrap();
        assert_eq!(single.sequence, 1);

        let automatic = session
            .maybe_capture(start + Duration::from_millis(100), &frame())
            .unwrap();
        assert_eq!(automatic.sequence, 2);
        assert_eq!(automatic.gesture.as_str(), "peace");
    }

    #[test]
    fn test_interval_stays_within_bounds() {
        let config = CaptureConfig::default();
        let mut session = Session::new(&config);

        for _ in 0..100 {
            session.faster();
            assert!(session.interval() >= config.min_interval);
        }
        assert_eq!(session.interval(), Duration::from_millis(50));

        for _ in 0..100 {
            session.slower();
            assert!(session.interval() <= config.max_interval);
        }
        assert_eq!(session.interval(), Duration::from_secs(2));

        session.adjust_speed(-1000.0);
        assert_eq!(session.interval(), config.min_interval);
        session.adjust_speed(f64::MAX);
        assert_eq!(session.interval(), config.max_interval);
    }

    #[test]
    fn test_speed_steps_do_not_drift() {
        let mut session = Session::new(&CaptureConfig::default());

        session.slower();
        session.slower();
        session.faster();

        assert_eq!(session.interval(), Duration::from_millis(150));
        assert!((session.fps() - 6.666).abs() < 0.01);
    }

    #[test]
    fn test_bounds_come_from_config() {
        let config = CaptureConfig {
            initial_interval: Duration::from_secs(10),
            min_interval: Duration::from_millis(200),
            max_interval: Duration::from_millis(400),
            ..CaptureConfig::default()
        };
        let mut session = Session::new(&config);

        assert_eq!(session.interval(), Duration::from_millis(400));
        for _ in 0..10 {
            session.faster();
        }
        assert_eq!(session.interval(), Duration::from_millis(200));
    }
}
