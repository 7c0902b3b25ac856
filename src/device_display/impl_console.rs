use crate::device_display::interface::{DeviceDisplay, Overlay};
use image::DynamicImage;
use std::collections::HashMap;
use std::error::Error;

/// Prints the overlay text whenever it changes. Frames themselves are not
/// drawn, only their size.
pub struct DeviceDisplayConsole {
    last_rendered: HashMap<String, String>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self {
            last_rendered: HashMap::new(),
        }
    }

    fn render_text(frame: &DynamicImage, overlay: &Overlay) -> String {
        let mut parts: Vec<String> = overlay.lines.iter().map(|l| l.text.clone()).collect();
        for overlay_box in &overlay.boxes {
            parts.push(format!(
                "[{} @ {:.0},{:.0} {:.0}x{:.0}]",
                overlay_box.label,
                overlay_box.bounding_box.x_min,
                overlay_box.bounding_box.y_min,
                overlay_box.bounding_box.width(),
                overlay_box.bounding_box.height()
            ));
        }
        if let Some(banner) = &overlay.banner {
            parts.push(banner.clone());
        }
        format!("{}x{} | {}", frame.width(), frame.height(), parts.join(" | "))
    }
}

impl Default for DeviceDisplayConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn show(
        &mut self,
        window: &str,
        frame: &DynamicImage,
        overlay: &Overlay,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let text = Self::render_text(frame, overlay);
        if self.last_rendered.get(window) != Some(&text) {
            println!("[{}] {}", window, text);
            self.last_rendered.insert(window.to_string(), text);
        }
        Ok(())
    }

    fn show_reference(
        &mut self,
        class_name: &str,
        image: &DynamicImage,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!(
            "[Reference Image] {} ({}x{})",
            class_name,
            image.width(),
            image.height()
        );
        Ok(())
    }
}
