use crate::device_keyboard::interface::{DeviceKeyboard, KeyInput};
use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Line-buffered terminal input. Each typed line is split into key presses,
/// unless a prompt is open, in which case the whole line is the answer.
pub struct DeviceKeyboardStdin {
    lines: Receiver<String>,
    awaiting_text: bool,
    closed: bool,
}

impl DeviceKeyboardStdin {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if sender.send(line).is_err() {
                    break;
                }
            }
        });
        Self {
            lines: receiver,
            awaiting_text: false,
            closed: false,
        }
    }

    fn interpret(&mut self, line: String) -> Vec<KeyInput> {
        if self.awaiting_text {
            self.awaiting_text = false;
            return vec![KeyInput::Line(line)];
        }
        line.chars().map(KeyInput::Key).collect()
    }
}

impl Default for DeviceKeyboardStdin {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceKeyboard for DeviceKeyboardStdin {
    fn poll(&mut self) -> Vec<KeyInput> {
        if self.closed {
            return vec![];
        }
        // One line per poll so a prompt opened by this line's keys sees the next one.
        match self.lines.try_recv() {
            Ok(line) => self.interpret(line),
            Err(TryRecvError::Empty) => vec![],
            Err(TryRecvError::Disconnected) => {
                self.closed = true;
                vec![KeyInput::Key('q')]
            }
        }
    }

    fn begin_text_entry(&mut self, prompt: &str) {
        self.awaiting_text = true;
        print!("{}", prompt);
        let _ = std::io::stdout().flush();
    }
}
