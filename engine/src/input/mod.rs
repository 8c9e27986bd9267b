//! Input Module
//!
//! Platform-agnostic input state. The core polls one [`InputSnapshot`] per tick:
//! four axes plus held / pressed / released sets of logical [`InputAction`]s.
//! Hosts either fill snapshots directly or let [`KeyBindings`] derive them from
//! physical key state.
//!
//! # Example
//!
//! ```rust,ignore
//! use build_royale_engine::input::{InputAction, InputSnapshot};
//!
//! let input = InputSnapshot::new()
//!     .with_axes(1.0, 0.0)
//!     .with_held(InputAction::Run)
//!     .with_pressed(InputAction::Jump);
//! assert!(input.was_pressed(InputAction::Jump));
//! ```

pub mod bindings;
pub mod cursor_manager;
pub mod keyboard;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use bindings::KeyBindings;
pub use cursor_manager::{CursorAction, CursorManager};
pub use keyboard::{KeyCode, KeyboardState};

/// Logical input actions, independent of their physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Jump (default: Space)
    Jump,
    /// Run modifier (default: Shift)
    Run,
    /// Crouch toggle (default: C)
    Crouch,
    /// Switch to Build mode (default: Q)
    Build,
    /// Switch to Edit mode (default: G)
    Edit,
    /// Switch to Weapon mode (default: 1)
    Weapon,
    /// Select wall (default: F1)
    BuildKey1,
    /// Select stairs (default: F2)
    BuildKey2,
    /// Select floor (default: F3)
    BuildKey3,
    /// Commit the build preview (default: E)
    Place,
    /// Demolish the edit target (default: X)
    Demolish,
    /// Primary mouse button
    PrimaryClick,
    /// Release cursor (default: Escape)
    Escape,
}

/// One tick of polled input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Forward/back axis in [-1, 1]
    pub vertical: f32,
    /// Strafe axis in [-1, 1]
    pub horizontal: f32,
    /// Mouse delta this tick (device units)
    pub mouse_x: f32,
    pub mouse_y: f32,
    held: HashSet<InputAction>,
    pressed: HashSet<InputAction>,
    released: HashSet<InputAction>,
}

impl InputSnapshot {
    /// Empty snapshot: no axes, nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axes(mut self, vertical: f32, horizontal: f32) -> Self {
        self.vertical = vertical.clamp(-1.0, 1.0);
        self.horizontal = horizontal.clamp(-1.0, 1.0);
        self
    }

    pub fn with_mouse(mut self, dx: f32, dy: f32) -> Self {
        self.mouse_x = dx;
        self.mouse_y = dy;
        self
    }

    pub fn with_held(mut self, action: InputAction) -> Self {
        self.held.insert(action);
        self
    }

    /// Press edge. The action also counts as held for this tick.
    pub fn with_pressed(mut self, action: InputAction) -> Self {
        self.pressed.insert(action);
        self.held.insert(action);
        self
    }

    pub fn with_released(mut self, action: InputAction) -> Self {
        self.released.insert(action);
        self.held.remove(&action);
        self
    }

    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Went down this tick.
    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.pressed.contains(&action)
    }

    /// Went up this tick.
    pub fn was_released(&self, action: InputAction) -> bool {
        self.released.contains(&action)
    }

    /// Drop edges and mouse deltas, keep held state and axes.
    pub fn carry_over(&self) -> Self {
        Self {
            vertical: self.vertical,
            horizontal: self.horizontal,
            mouse_x: 0.0,
            mouse_y: 0.0,
            held: self.held.clone(),
            pressed: HashSet::new(),
            released: HashSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_default() {
        let input = InputSnapshot::new();
        assert_eq!(input.vertical, 0.0);
        assert!(!input.is_held(InputAction::Run));
        assert!(!input.was_pressed(InputAction::Jump));
    }

    #[test]
    fn test_pressed_implies_held() {
        let input = InputSnapshot::new().with_pressed(InputAction::Build);
        assert!(input.was_pressed(InputAction::Build));
        assert!(input.is_held(InputAction::Build));
    }

    #[test]
    fn test_axes_are_clamped() {
        let input = InputSnapshot::new().with_axes(3.0, -2.0);
        assert_eq!(input.vertical, 1.0);
        assert_eq!(input.horizontal, -1.0);
    }

    #[test]
    fn test_carry_over_drops_edges() {
        let input = InputSnapshot::new()
            .with_axes(1.0, 0.0)
            .with_mouse(4.0, 2.0)
            .with_pressed(InputAction::Run);
        let next = input.carry_over();
        assert!(next.is_held(InputAction::Run));
        assert!(!next.was_pressed(InputAction::Run));
        assert_eq!(next.mouse_x, 0.0);
        assert_eq!(next.vertical, 1.0);
    }
}
