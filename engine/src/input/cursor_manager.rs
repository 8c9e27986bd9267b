//! Cursor Manager Module
//!
//! Tracks pointer capture for mouse-look. Pure UI state: Escape releases the
//! cursor, a primary click re-captures it. Both react on button release.
//!
//! ```rust,ignore
//! let mut cursor = CursorManager::new(true);
//! if cursor.update(&input) == CursorAction::ApplyState {
//!     window.set_cursor_grab(cursor.is_locked());
//! }
//! ```

use super::{InputAction, InputSnapshot};

/// Actions the host should take after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAction {
    /// No action needed
    None,
    /// Lock state changed, apply it to the window
    ApplyState,
}

#[derive(Debug, Clone)]
pub struct CursorManager {
    /// Whether this manager drives the cursor at all
    enabled: bool,
    locked: bool,
    state_dirty: bool,
}

impl Default for CursorManager {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CursorManager {
    /// Starts locked, with the initial state pending for the window.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            locked: enabled,
            state_dirty: enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        if self.locked != locked {
            self.locked = locked;
            self.state_dirty = true;
        }
    }

    /// Apply this tick's release edges. A pending state is reported once.
    pub fn update(&mut self, input: &InputSnapshot) -> CursorAction {
        if !self.enabled {
            return CursorAction::None;
        }
        if input.was_released(InputAction::Escape) {
            self.set_locked(false);
        } else if input.was_released(InputAction::PrimaryClick) {
            self.set_locked(true);
        }
        if std::mem::take(&mut self.state_dirty) {
            CursorAction::ApplyState
        } else {
            CursorAction::None
        }
    }
}
