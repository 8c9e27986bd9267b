//! Input Bindings Module
//!
//! Maps physical keys to logical actions and turns keyboard frames into
//! [`InputSnapshot`]s for the simulation.

use std::collections::HashMap;

use super::keyboard::{KeyCode, KeyboardState};
use super::{InputAction, InputSnapshot};

/// Two-way key <-> action table. One key per action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    key_to_action: HashMap<KeyCode, InputAction>,
    action_to_key: HashMap<InputAction, KeyCode>,
    /// Movement axis keys: (back, forward, left, right)
    axis_keys: (KeyCode, KeyCode, KeyCode, KeyCode),
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Default bindings:
    /// - Space = Jump, Shift (Left) = Run, C = Crouch
    /// - Q = Build, G = Edit, 1 = Weapon
    /// - F1/F2/F3 = wall/stairs/floor
    /// - E = Place, X = Demolish
    /// - Left mouse = PrimaryClick, Escape = Escape
    pub fn new() -> Self {
        let mut bindings = Self {
            key_to_action: HashMap::new(),
            action_to_key: HashMap::new(),
            axis_keys: (KeyCode::S, KeyCode::W, KeyCode::A, KeyCode::D),
        };

        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::ShiftLeft, InputAction::Run);
        bindings.bind(KeyCode::C, InputAction::Crouch);
        bindings.bind(KeyCode::Q, InputAction::Build);
        bindings.bind(KeyCode::G, InputAction::Edit);
        bindings.bind(KeyCode::Digit1, InputAction::Weapon);
        bindings.bind(KeyCode::F1, InputAction::BuildKey1);
        bindings.bind(KeyCode::F2, InputAction::BuildKey2);
        bindings.bind(KeyCode::F3, InputAction::BuildKey3);
        bindings.bind(KeyCode::E, InputAction::Place);
        bindings.bind(KeyCode::X, InputAction::Demolish);
        bindings.bind(KeyCode::MouseLeft, InputAction::PrimaryClick);
        bindings.bind(KeyCode::Escape, InputAction::Escape);

        bindings
    }

    /// Bind a key to an action, dropping any previous binding of either.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        if let Some(old_action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&old_action);
        }
        if let Some(old_key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&old_key);
        }
        self.key_to_action.insert(key, action);
        self.action_to_key.insert(action, key);
    }

    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    pub fn get_key(&self, action: InputAction) -> Option<KeyCode> {
        self.action_to_key.get(&action).copied()
    }

    /// Build this tick's snapshot from keyboard state and the mouse delta.
    pub fn snapshot(&self, keyboard: &KeyboardState, mouse_delta: (f32, f32)) -> InputSnapshot {
        let (back, forward, left, right) = self.axis_keys;
        let mut input = InputSnapshot::new()
            .with_axes(keyboard.axis(back, forward), keyboard.axis(left, right))
            .with_mouse(mouse_delta.0, mouse_delta.1);

        for (&key, &action) in &self.key_to_action {
            if keyboard.just_pressed(key) {
                input = input.with_pressed(action);
            } else if keyboard.just_released(key) {
                input = input.with_released(action);
            } else if keyboard.is_down(key) {
                input = input.with_held(action);
            }
        }
        input
    }
}
