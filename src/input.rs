//! Input events
//!
//! Backend-neutral input the core reacts to. The platform layer translates raw
//! window events into [`InputEvent`]s; rounds and menus only ever see these.
//!
//! # Architecture
//!
//! 1. Each frame the loop calls [`InputSource::poll`] exactly once
//! 2. Every returned event is handled, in arrival order
//! 3. Nothing is carried over to the next frame by the core

use std::collections::VecDeque;

/// Keys the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character, as typed (case preserved)
    Char(char),
    Backspace,
    /// Enter/Return: confirms menus, clears the typed buffer in word mode
    Enter,
    Escape,
    Up,
    Down,
    /// Anything else (function keys, modifiers, ...)
    Other,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other,
}

/// One discrete input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed / OS quit request
    Quit,
    KeyPress(Key),
    PointerPress { button: PointerButton, x: f32, y: f32 },
}

impl InputEvent {
    /// True for events that end the whole session (window close or Escape)
    pub fn is_quit(&self) -> bool {
        matches!(self, InputEvent::Quit | InputEvent::KeyPress(Key::Escape))
    }

    /// The printable character carried by a key press, if any
    pub fn char(&self) -> Option<char> {
        match self {
            InputEvent::KeyPress(Key::Char(c)) => Some(*c),
            _ => None,
        }
    }
}

/// Something that yields the input events that arrived since the last poll.
pub trait InputSource {
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Pre-recorded input: each poll returns the next batch, then nothing.
///
/// Used to drive rounds and menus without a window.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: Vec<Vec<InputEvent>>) -> Self {
        ScriptedInput {
            frames: frames.into(),
        }
    }

    /// Queues one more batch after the existing ones
    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }

    /// Queues `count` polls that return nothing
    pub fn push_idle(&mut self, count: usize) {
        for _ in 0..count {
            self.frames.push_back(Vec::new());
        }
    }

    /// Batches not yet polled
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_events() {
        assert!(InputEvent::Quit.is_quit());
        assert!(InputEvent::KeyPress(Key::Escape).is_quit());
        assert!(!InputEvent::KeyPress(Key::Char('q')).is_quit());
        assert!(
            !InputEvent::PointerPress {
                button: PointerButton::Left,
                x: 0.0,
                y: 0.0
            }
            .is_quit()
        );
    }

    #[test]
    fn test_scripted_input_plays_back_in_order() {
        let mut input = ScriptedInput::new(vec![
            vec![InputEvent::KeyPress(Key::Char('a'))],
            vec![],
        ]);
        input.push_frame(vec![InputEvent::Quit]);
        assert_eq!(input.remaining(), 3);

        assert_eq!(input.poll()[0].char(), Some('a'));
        assert!(input.poll().is_empty());
        assert_eq!(input.poll(), vec![InputEvent::Quit]);
        // Exhausted scripts keep returning nothing
        assert!(input.poll().is_empty());
    }
}
