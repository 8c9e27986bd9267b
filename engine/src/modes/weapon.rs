//! Weapon mode
//!
//! Firing is handled elsewhere; this mode only watches for switches.

use super::{ModeContext, ModeKind};
use crate::input::InputAction;

#[derive(Debug, Clone, Default)]
pub struct WeaponMode;

impl WeaponMode {
    pub fn new() -> Self {
        Self
    }

    pub fn enter(&mut self) {
        log::info!("[Weapon Mode] Entering");
    }

    pub fn exit(&mut self) {
        log::info!("[Weapon Mode] Exiting");
    }

    pub fn update(&mut self, ctx: &ModeContext<'_>) -> ModeKind {
        if ctx.input.was_pressed(InputAction::Build) {
            return ModeKind::Build;
        }
        if ctx.input.was_pressed(InputAction::Edit) {
            return ModeKind::Edit;
        }
        ModeKind::Weapon
    }
}
