use crate::device_keyboard::interface::{DeviceKeyboard, KeyInput};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    /// Keep going, and collect a line of text with this prompt.
    PromptText(String),
    Quit,
}

/// One tool's per-frame work: read a frame, decide, display, react to keys.
pub trait FrameLoop {
    fn step(&mut self, inputs: Vec<KeyInput>, now: Instant) -> LoopControl;

    /// Called once after the loop ends, whatever ended it.
    fn finish(&mut self) {}
}

/// Drives `frame_loop` from the terminal until it asks to quit.
pub fn run_console(
    frame_loop: &mut dyn FrameLoop,
    keyboard: &mut dyn DeviceKeyboard,
    frame_delay: Duration,
) {
    loop {
        let inputs = keyboard.poll();
        match frame_loop.step(inputs, Instant::now()) {
            LoopControl::Continue => {}
            LoopControl::PromptText(prompt) => keyboard.begin_text_entry(&prompt),
            LoopControl::Quit => break,
        }
        std::thread::sleep(frame_delay);
    }
    frame_loop.finish();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_keyboard::impl_fake::DeviceKeyboardFake;

    #[derive(Default)]
    struct Counting {
        steps: u32,
        finished: bool,
    }

    impl FrameLoop for Counting {
        fn step(&mut self, inputs: Vec<KeyInput>, _now: Instant) -> LoopControl {
            self.steps += 1;
            match inputs.first() {
                Some(KeyInput::Key('q')) => LoopControl::Quit,
                Some(KeyInput::Key('g')) => LoopControl::PromptText("name? ".to_string()),
                _ => LoopControl::Continue,
            }
        }

        fn finish(&mut self) {
            self.finished = true;
        }
    }

    #[test]
    fn test_runs_until_quit_and_forwards_prompts() {
        let mut frame_loop = Counting::default();
        let mut keyboard = DeviceKeyboardFake::new(vec![
            vec![],
            vec![KeyInput::Key('g')],
            vec![KeyInput::Line("peace".to_string())],
            vec![KeyInput::Key('q')],
        ]);

        run_console(&mut frame_loop, &mut keyboard, Duration::ZERO);

        assert_eq!(frame_loop.steps, 4);
        assert!(frame_loop.finished);
        assert_eq!(keyboard.prompts, vec!["name? ".to_string()]);
    }
}
