#[cfg(test)]
mod reference_panel_test {
    use crate::device_display::impl_fake::DeviceDisplayFake;
    use crate::library::logger::impl_fake::LoggerFake;
    use crate::live_infer::reference_panel::ReferencePanel;
    use crate::live_infer::tests::fixture::write_reference;
    use crate::reference_images::cache::ReferenceImages;
    use std::sync::Arc;

    #[test]
    fn test_missing_reference_logged_once_per_class() {
        let dir = tempfile::tempdir().unwrap();
        let logger = LoggerFake::new();
        let mut display = DeviceDisplayFake::new();
        let mut panel = ReferencePanel::new(
            ReferenceImages::new(dir.path(), (320, 240)),
            Arc::new(logger.clone()),
        );

        panel.update("scarf", &mut display);
        panel.update("scarf", &mut display);
        panel.update("glove", &mut display);

        assert_eq!(logger.count_containing("No reference image for 'scarf'"), 1);
        assert_eq!(logger.count_containing("No reference image for 'glove'"), 1);
        assert!(display.references().is_empty());
        assert_eq!(panel.last_displayed(), None);
    }

    #[test]
    fn test_returning_to_a_class_redraws_it() {
        let dir = tempfile::tempdir().unwrap();
        write_reference(dir.path(), "hat");
        write_reference(dir.path(), "coat");
        let mut display = DeviceDisplayFake::new();
        let mut panel = ReferencePanel::new(
            ReferenceImages::new(dir.path(), (320, 240)),
            Arc::new(LoggerFake::new()),
        );

        for class_name in ["hat", "hat", "coat", "hat"] {
            panel.update(class_name, &mut display);
        }

        let classes: Vec<_> = display
            .references()
            .into_iter()
            .map(|(class_name, _)| class_name)
            .collect();
        assert_eq!(classes, vec!["hat", "coat", "hat"]);
    }
}
