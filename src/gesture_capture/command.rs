use crate::device_keyboard::interface::KeyInput;

pub const GESTURE_PROMPT: &str = "Enter gesture name (e.g., 'thumbs_up', 'peace', 'fist'): ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pause and ask for a (new) gesture name.
    EnterGesture,
    /// Forget the gesture, then ask for a new one.
    ResetGesture,
    SetGesture(String),
    ToggleCapture,
    CaptureOnce,
    Faster,
    Slower,
    Quit,
}

impl Command {
    pub fn from_input(input: KeyInput) -> Option<Command> {
        match input {
            KeyInput::Line(name) => Some(Command::SetGesture(name)),
            KeyInput::Key(key) => match key {
                'q' => Some(Command::Quit),
                'g' => Some(Command::EnterGesture),
                'r' => Some(Command::ResetGesture),
                'c' => Some(Command::ToggleCapture),
                ' ' => Some(Command::CaptureOnce),
                '+' | '=' => Some(Command::Faster),
                '-' | '_' => Some(Command::Slower),
                _ => None,
            },
        }
    }
}

pub fn controls_help() -> Vec<&'static str> {
    vec![
        "Controls:",
        "  'g' - Enter gesture name (required before capturing)",
        "  'c' - Start/Stop continuous capture mode",
        "  SPACE - Capture single image",
        "  'r' - Reset and enter new gesture name",
        "  '+' - Increase capture speed",
        "  '-' - Decrease capture speed",
        "  'q' - Quit",
    ]
}
