use crate::config::CaptureConfig;
use crate::image_sink::interface::SaveRequest;
use image::DynamicImage;
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("gesture name not set: name is empty")]
    EmptyName,
    #[error("gesture name not set: '{0}' cannot be used as a folder name")]
    InvalidName(String),
    #[error("Please set a gesture name first (press 'g')")]
    GestureNotSet,
}

/// A trimmed, non-empty gesture name that is safe to use as a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GestureLabel(String);

impl GestureLabel {
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(SessionError::InvalidName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unset,
    Idle,
    Capturing,
}

#[derive(Debug, Clone)]
enum Mode {
    Unset,
    Idle {
        gesture: GestureLabel,
    },
    Capturing {
        gesture: GestureLabel,
        last_capture: Instant,
    },
}

#[derive(Debug, Clone)]
pub struct Session {
    mode: Mode,
    interval: Duration,
    min_interval: Duration,
    max_interval: Duration,
    interval_step: Duration,
    images_captured: u32,
}

impl Session {
    pub fn new(config: &CaptureConfig) -> Self {
        let min_interval = config.min_interval.min(config.max_interval);
        let max_interval = config.max_interval.max(config.min_interval);
        Self {
            mode: Mode::Unset,
            interval: config.initial_interval.clamp(min_interval, max_interval),
            min_interval,
            max_interval,
            interval_step: config.interval_step,
            images_captured: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.mode {
            Mode::Unset => SessionState::Unset,
            Mode::Idle { .. } => SessionState::Idle,
            Mode::Capturing { .. } => SessionState::Capturing,
        }
    }

    pub fn active_gesture(&self) -> Option<&GestureLabel> {
        match &self.mode {
            Mode::Unset => None,
            Mode::Idle { gesture } | Mode::Capturing { gesture, .. } => Some(gesture),
        }
    }

    pub fn capture_enabled(&self) -> bool {
        matches!(self.mode, Mode::Capturing { .. })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn fps(&self) -> f64 {
        1.0 / self.interval.as_secs_f64()
    }

    pub fn images_captured(&self) -> u32 {
        self.images_captured
    }

    /// Switches to `name` and starts counting from zero. Capture stays off
    /// until toggled again. A rejected name leaves the session untouched.
    pub fn set_gesture(&mut self, name: &str) -> Result<GestureLabel, SessionError> {
        let gesture = GestureLabel::parse(name)?;
        self.images_captured = 0;
        self.mode = Mode::Idle {
            gesture: gesture.clone(),
        };
        Ok(gesture)
    }

    /// Returns whether capture is on after the toggle.
    pub fn toggle_capture(&mut self, now: Instant) -> Result<bool, SessionError> {
        let mode = std::mem::replace(&mut self.mode, Mode::Unset);
        let (mode, result) = match mode {
            Mode::Unset => (Mode::Unset, Err(SessionError::GestureNotSet)),
            Mode::Idle { gesture } => (
                Mode::Capturing {
                    gesture,
                    last_capture: now,
                },
                Ok(true),
            ),
            Mode::Capturing { gesture, .. } => (Mode::Idle { gesture }, Ok(false)),
        };
        self.mode = mode;
        result
    }

    pub fn pause(&mut self) {
        if let Mode::Capturing { gesture, .. } = &self.mode {
            self.mode = Mode::Idle {
                gesture: gesture.clone(),
            };
        }
    }

    pub fn reset(&mut self) {
        self.mode = Mode::Unset;
        self.images_captured = 0;
    }

    pub fn maybe_capture(&mut self, now: Instant, frame: &DynamicImage) -> Option<SaveRequest> {
        let Mode::Capturing {
            gesture,
            last_capture,
        } = &mut self.mode
        else {
            return None;
        };
        if now.saturating_duration_since(*last_capture) < self.interval {
            return None;
        }

        *last_capture = now;
        self.images_captured += 1;
        Some(SaveRequest {
            gesture: gesture.clone(),
            frame: frame.clone(),
            sequence: self.images_captured,
        })
    }

    /// Single-shot capture; leaves the automatic capture timer alone.
    pub fn capture_once(&mut self, frame: &DynamicImage) -> Result<SaveRequest, SessionError> {
        let gesture = self
            .active_gesture()
            .cloned()
            .ok_or(SessionError::GestureNotSet)?;
        self.images_captured += 1;
        Ok(SaveRequest {
            gesture,
            frame: frame.clone(),
            sequence: self.images_captured,
        })
    }

    /// Positive `delta_secs` slows capture down, negative speeds it up.
    pub fn adjust_speed(&mut self, delta_secs: f64) {
        let seconds = (self.interval.as_secs_f64() + delta_secs).clamp(
            self.min_interval.as_secs_f64(),
            self.max_interval.as_secs_f64(),
        );
        // Round to whole microseconds so repeated steps do not drift.
        let micros = (seconds * 1_000_000.0).round() as u64;
        self.interval = Duration::from_micros(micros).clamp(self.min_interval, self.max_interval);
    }

    pub fn faster(&mut self) {
        self.adjust_speed(-self.interval_step.as_secs_f64());
    }

    pub fn slower(&mut self) {
        self.adjust_speed(self.interval_step.as_secs_f64());
    }
}
