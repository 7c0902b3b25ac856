use crate::device_display::interface::DeviceDisplay;
use crate::library::logger::interface::Logger;
use crate::reference_images::cache::ReferenceImages;
use std::collections::HashSet;
use std::sync::Arc;

/// The reference window: shows the example image for the most recently
/// detected class and only redraws when that class changes.
pub struct ReferencePanel {
    references: ReferenceImages,
    last_displayed: Option<String>,
    reported_missing: HashSet<String>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ReferencePanel {
    pub fn new(references: ReferenceImages, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            references,
            last_displayed: None,
            reported_missing: HashSet::new(),
            logger: logger.with_namespace("reference"),
        }
    }

    pub fn last_displayed(&self) -> Option<&str> {
        self.last_displayed.as_deref()
    }

    pub fn update(&mut self, class_name: &str, display: &mut dyn DeviceDisplay) {
        if self.last_displayed.as_deref() == Some(class_name) {
            return;
        }

        let Some(image) = self.references.lookup(class_name) else {
            if self.reported_missing.insert(class_name.to_string()) {
                self.logger.warn(&format!(
                    "No reference image for '{}' in {}",
                    class_name,
                    self.references.dir().display()
                ));
            }
            return;
        };

        if let Err(e) = display.show_reference(class_name, &image) {
            self.logger
                .error(&format!("Failed to display reference image: {}", e));
            return;
        }
        self.logger
            .info(&format!("Displaying reference for: {}", class_name));
        self.last_displayed = Some(class_name.to_string());
    }
}
