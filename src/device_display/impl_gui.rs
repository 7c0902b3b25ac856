use crate::device_display::interface::{DeviceDisplay, Overlay, OverlayColor, OverlayLine};
use crate::device_keyboard::interface::KeyInput;
use crate::library::frame_loop::{FrameLoop, LoopControl};
use eframe::egui;
use image::DynamicImage;
use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

const REFERENCE_WINDOW: &str = "Reference Image";

struct WindowContent {
    image: egui::ColorImage,
    overlay: Overlay,
}

struct TextEntry {
    prompt: String,
    buffer: String,
}

/// What the display writes and the window paints, shared between the two.
#[derive(Default)]
pub struct GuiSurface {
    windows: BTreeMap<String, WindowContent>,
    dirty: Vec<String>,
}

#[derive(Clone, Default)]
pub struct DeviceDisplayGui {
    surface: Arc<Mutex<GuiSurface>>,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self::default()
    }

    fn surface(&self) -> MutexGuard<'_, GuiSurface> {
        self.surface.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn put(&self, window: &str, image: &DynamicImage, overlay: Overlay) {
        let rgba = image.to_rgba8();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [rgba.width() as usize, rgba.height() as usize],
            rgba.as_raw(),
        );
        let mut surface = self.surface();
        surface.windows.insert(
            window.to_string(),
            WindowContent {
                image: color_image,
                overlay,
            },
        );
        surface.dirty.push(window.to_string());
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn show(
        &mut self,
        window: &str,
        frame: &DynamicImage,
        overlay: &Overlay,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.put(window, frame, overlay.clone());
        Ok(())
    }

    fn show_reference(
        &mut self,
        class_name: &str,
        image: &DynamicImage,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let overlay = Overlay {
            lines: vec![OverlayLine::new(class_name, OverlayColor::Green)],
            ..Overlay::default()
        };
        self.put(REFERENCE_WINDOW, image, overlay);
        Ok(())
    }
}

/// Hands the main thread to eframe and steps `frame_loop` once per repaint.
pub fn run_gui(
    title: &str,
    frame_loop: Box<dyn FrameLoop>,
    display: &DeviceDisplayGui,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 720.0]),
        ..Default::default()
    };

    let driver = GuiDriver {
        frame_loop,
        surface: display.surface.clone(),
        textures: HashMap::new(),
        text_entry: None,
        finished: false,
    };

    eframe::run_native(title, options, Box::new(move |_cc| Box::new(driver)))
        .map_err(|e| format!("window failed: {}", e))?;
    Ok(())
}

struct GuiDriver {
    frame_loop: Box<dyn FrameLoop>,
    surface: Arc<Mutex<GuiSurface>>,
    textures: HashMap<String, egui::TextureHandle>,
    text_entry: Option<TextEntry>,
    finished: bool,
}

impl GuiDriver {
    fn collect_inputs(&mut self, ctx: &egui::Context) -> Vec<KeyInput> {
        let mut inputs = Vec::new();

        if let Some(entry) = &mut self.text_entry {
            let mut submitted = false;
            egui::Window::new("Input")
                .collapsible(false)
                .show(ctx, |ui| {
                    ui.label(&entry.prompt);
                    let response = ui.text_edit_singleline(&mut entry.buffer);
                    response.request_focus();
                    submitted = ui.input(|i| i.key_pressed(egui::Key::Enter));
                });
            if submitted {
                inputs.push(KeyInput::Line(entry.buffer.clone()));
                self.text_entry = None;
            }
            return inputs;
        }

        ctx.input(|i| {
            for event in &i.events {
                if let egui::Event::Text(text) = event {
                    inputs.extend(text.chars().map(KeyInput::Key));
                }
            }
        });
        inputs
    }

    fn paint(&mut self, ctx: &egui::Context) {
        let mut surface = self.surface.lock().unwrap_or_else(PoisonError::into_inner);
        for name in surface.dirty.drain(..).collect::<Vec<_>>() {
            if let Some(content) = surface.windows.get(&name) {
                match self.textures.get_mut(&name) {
                    Some(texture) => texture.set(content.image.clone(), Default::default()),
                    None => {
                        let texture =
                            ctx.load_texture(&name, content.image.clone(), Default::default());
                        self.textures.insert(name.clone(), texture);
                    }
                }
            }
        }

        for (name, content) in surface.windows.iter() {
            let Some(texture) = self.textures.get(name) else {
                continue;
            };
            egui::Window::new(name.as_str()).show(ctx, |ui| {
                let size = texture.size_vec2();
                let response = ui.image((texture.id(), size));
                paint_overlay(ui.painter(), response.rect, &content.overlay);
            });
        }
    }
}

impl eframe::App for GuiDriver {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.finished {
            let inputs = self.collect_inputs(ctx);
            match self.frame_loop.step(inputs, Instant::now()) {
                LoopControl::Continue => {}
                LoopControl::PromptText(prompt) => {
                    self.text_entry = Some(TextEntry {
                        prompt,
                        buffer: String::new(),
                    });
                }
                LoopControl::Quit => {
                    self.frame_loop.finish();
                    self.finished = true;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }

        self.paint(ctx);
        ctx.request_repaint();
    }
}

impl Drop for GuiDriver {
    fn drop(&mut self) {
        // Closing the window skips the quit key.
        if !self.finished {
            self.frame_loop.finish();
        }
    }
}

fn to_color32(color: OverlayColor) -> egui::Color32 {
    let [r, g, b] = color.rgb();
    egui::Color32::from_rgb(r, g, b)
}

fn paint_overlay(painter: &egui::Painter, rect: egui::Rect, overlay: &Overlay) {
    let font = egui::FontId::proportional(18.0);

    for (i, line) in overlay.lines.iter().enumerate() {
        let pos = rect.min + egui::vec2(10.0, 10.0 + 26.0 * i as f32);
        painter.text(
            pos,
            egui::Align2::LEFT_TOP,
            &line.text,
            font.clone(),
            to_color32(line.color),
        );
    }

    for overlay_box in &overlay.boxes {
        let b = &overlay_box.bounding_box;
        let box_rect = egui::Rect::from_min_max(
            rect.min + egui::vec2(b.x_min, b.y_min),
            rect.min + egui::vec2(b.x_max, b.y_max),
        );
        let color = to_color32(overlay_box.color);
        painter.rect_stroke(box_rect, 0.0, egui::Stroke::new(2.0, color));
        painter.text(
            box_rect.left_top() - egui::vec2(0.0, 4.0),
            egui::Align2::LEFT_BOTTOM,
            &overlay_box.label,
            egui::FontId::proportional(14.0),
            color,
        );
    }

    if let Some(banner) = &overlay.banner {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            banner,
            egui::FontId::proportional(40.0),
            to_color32(OverlayColor::Green),
        );
    }
}
