//! Keyboard Input Module
//!
//! Generic key codes and a pressed-key tracker, decoupled from any windowing
//! system. The tracker keeps the previous frame's keys so edges can be derived.

use std::collections::HashSet;

/// Generic key codes, independent of the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ShiftRight,
    C,

    // Mode / build keys
    Q,
    G,
    E,
    X,
    Digit1,
    F1,
    F2,
    F3,

    Escape,
    MouseLeft,
}

/// Pressed keys for the current and previous frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    current: HashSet<KeyCode>,
    previous: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event for the current frame.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.current.insert(key);
        } else {
            self.current.remove(&key);
        }
    }

    /// Start a new frame: the current keys become the previous ones.
    pub fn end_frame(&mut self) {
        self.previous = self.current.clone();
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.current.contains(&key)
    }

    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.current.contains(&key) && !self.previous.contains(&key)
    }

    pub fn just_released(&self, key: KeyCode) -> bool {
        !self.current.contains(&key) && self.previous.contains(&key)
    }

    /// Digital axis from a negative/positive key pair.
    pub fn axis(&self, negative: KeyCode, positive: KeyCode) -> f32 {
        let mut value = 0.0;
        if self.is_down(positive) {
            value += 1.0;
        }
        if self.is_down(negative) {
            value -= 1.0;
        }
        value
    }
}
