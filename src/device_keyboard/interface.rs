#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// A single key press.
    Key(char),
    /// A line typed while a text prompt was open.
    Line(String),
}

pub trait DeviceKeyboard {
    /// Input gathered since the last poll. Never blocks.
    fn poll(&mut self) -> Vec<KeyInput>;

    /// The next line the user types is delivered as `KeyInput::Line`.
    fn begin_text_entry(&mut self, prompt: &str);
}
