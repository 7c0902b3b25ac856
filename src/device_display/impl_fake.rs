use crate::device_display::interface::{DeviceDisplay, Overlay};
use image::DynamicImage;
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct Shown {
    pub window: String,
    pub size: (u32, u32),
    pub overlay: Overlay,
}

#[derive(Debug, Default)]
struct Recorded {
    shown: Vec<Shown>,
    references: Vec<(String, (u32, u32))>,
}

/// Records what would have been drawn. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct DeviceDisplayFake {
    recorded: Arc<Mutex<Recorded>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Shown> {
        self.recorded
            .lock()
            .map(|r| r.shown.clone())
            .unwrap_or_default()
    }

    pub fn last_overlay(&self) -> Option<Overlay> {
        self.shown().last().map(|shown| shown.overlay.clone())
    }

    pub fn references(&self) -> Vec<(String, (u32, u32))> {
        self.recorded
            .lock()
            .map(|r| r.references.clone())
            .unwrap_or_default()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn show(
        &mut self,
        window: &str,
        frame: &DynamicImage,
        overlay: &Overlay,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut recorded = self.recorded.lock().map_err(|e| e.to_string())?;
        recorded.shown.push(Shown {
            window: window.to_string(),
            size: (frame.width(), frame.height()),
            overlay: overlay.clone(),
        });
        Ok(())
    }

    fn show_reference(
        &mut self,
        class_name: &str,
        image: &DynamicImage,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut recorded = self.recorded.lock().map_err(|e| e.to_string())?;
        recorded
            .references
            .push((class_name.to_string(), (image.width(), image.height())));
        Ok(())
    }
}
