use crate::device_keyboard::interface::{DeviceKeyboard, KeyInput};
use std::collections::VecDeque;

/// Plays back a script, one batch of input per poll.
#[derive(Debug, Default)]
pub struct DeviceKeyboardFake {
    script: VecDeque<Vec<KeyInput>>,
    pub prompts: Vec<String>,
}

impl DeviceKeyboardFake {
    pub fn new(script: Vec<Vec<KeyInput>>) -> Self {
        Self {
            script: script.into(),
            prompts: Vec::new(),
        }
    }
}

impl DeviceKeyboard for DeviceKeyboardFake {
    fn poll(&mut self) -> Vec<KeyInput> {
        // An exhausted script quits so loops under test always end.
        self.script
            .pop_front()
            .unwrap_or_else(|| vec![KeyInput::Key('q')])
    }

    fn begin_text_entry(&mut self, prompt: &str) {
        self.prompts.push(prompt.to_string());
    }
}
