//! Edit mode
//!
//! Targets the construction under the cursor sensor and exposes its anchor
//! for the edit affordance. Demolish removes the target.

use glam::Vec3;

use super::{ModeContext, ModeKind};
use crate::building::{Construction, ConstructionId};
use crate::input::InputAction;

/// Construction currently under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditTarget {
    pub construction: Construction,
    pub anchor: Vec3,
}

#[derive(Debug, Clone, Default)]
pub struct EditMode {
    target: Option<EditTarget>,
    last_demolished: Option<ConstructionId>,
}

impl EditMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<&EditTarget> {
        self.target.as_ref()
    }

    pub fn anchor(&self) -> Option<Vec3> {
        self.target.map(|t| t.anchor)
    }

    pub fn last_demolished(&self) -> Option<ConstructionId> {
        self.last_demolished
    }

    pub fn enter(&mut self) {
        log::info!("[Edit Mode] Entering");
    }

    pub fn exit(&mut self) {
        self.target = None;
        log::info!("[Edit Mode] Exiting");
    }

    pub fn update(&mut self, ctx: &ModeContext<'_>) -> ModeKind {
        if ctx.input.was_pressed(InputAction::Build) {
            return ModeKind::Build;
        }
        if ctx.input.was_pressed(InputAction::Weapon) {
            return ModeKind::Weapon;
        }

        self.target = ctx
            .sensor
            .construction()
            .and_then(|id| ctx.registry.find_with_anchor(id))
            .map(|(construction, anchor)| EditTarget { construction, anchor });

        if ctx.input.was_pressed(InputAction::Demolish) {
            if let Some(target) = self.target.take() {
                let id = target.construction.id;
                let removed = ctx.registry.remove(id);
                log::info!("[Edit Mode] Demolished {} ({} removed)", id, removed);
                self.last_demolished = Some(id);
            }
        }

        ModeKind::Edit
    }
}
