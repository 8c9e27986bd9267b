//! Build mode
//!
//! Shows a non-colliding preview of the selected piece on the lattice in front
//! of the character and commits it to the registry on the Place edge.
//!
//! # Placement
//!
//! The probe point is the character position raised by half the controller
//! height. The camera pitch picks how far ahead the piece lands:
//!
//! | pitch (deg)   | bucket | floor push | stairs push | wall push |
//! |---------------|--------|------------|-------------|-----------|
//! | (60, 91)      | 0      | 0          | 0           | 0         |
//! | (-91, 0)      | 2      | 1 cell     | 2 cells     | 1 cell    |
//! | otherwise     | 1      | 1 cell     | 1 cell      | 0         |
//!
//! Floors use the bottom face (8), stairs the cell center (14), walls the face
//! matching the snapped yaw.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::{ModeContext, ModeKind};
use crate::building::{ConstructionId, ConstructionKind, ConstructionTemplate};
use crate::input::InputAction;
use crate::player::flat_forward;
use crate::world::{GridAddress, GridSpace};

/// Parent name of spawned previews and constructions.
pub const ENVIRONMENT_ANCHOR: &str = "environment";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Kind selected when build mode is first entered
    pub initial_kind: ConstructionKind,
    pub preview_material: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            initial_kind: ConstructionKind::Wall,
            preview_material: String::from("to_be_built"),
        }
    }
}

/// How far ahead to place, from the camera pitch (degrees, positive down).
pub fn pitch_bucket(pitch_degrees: f32) -> u8 {
    if pitch_degrees > 60.0 && pitch_degrees < 91.0 {
        0
    } else if pitch_degrees < 0.0 && pitch_degrees > -91.0 {
        2
    } else {
        1
    }
}

/// Yaw of a facing rotation in degrees, positive toward +X.
pub fn facing_yaw_degrees(facing: Quat) -> f32 {
    let forward = flat_forward(facing);
    forward.x.atan2(forward.z).to_degrees()
}

/// Round to the nearest multiple of 90 degrees, in [0, 360).
pub fn snap_yaw(yaw_degrees: f32) -> f32 {
    ((yaw_degrees / 90.0).round() * 90.0).rem_euclid(360.0)
}

/// Cell face a wall occupies for a snapped yaw.
pub fn wall_address_for_yaw(snapped_yaw: f32) -> GridAddress {
    match snapped_yaw as i32 {
        0 => GridAddress::POS_Z_FACE,
        90 => GridAddress::POS_X_FACE,
        180 => GridAddress::NEG_Z_FACE,
        270 => GridAddress::NEG_X_FACE,
        _ => GridAddress::POS_Z_FACE,
    }
}

/// Where a piece of `kind` would go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub yaw_degrees: f32,
    pub address: GridAddress,
}

/// Grid placement for `kind` given the character pose and camera pitch.
pub fn compute_placement(
    kind: ConstructionKind,
    grid: &GridSpace,
    character_position: Vec3,
    controller_height: f32,
    facing: Quat,
    camera_pitch: f32,
) -> Placement {
    let bucket = pitch_bucket(camera_pitch);
    let step = flat_forward(facing) * grid.cell_size().x;
    let probe = character_position + Vec3::Y * (controller_height * 0.5);
    let yaw = snap_yaw(facing_yaw_degrees(facing));

    let (probe, yaw_degrees, address) = match kind {
        ConstructionKind::Floor => {
            let probe = if bucket > 0 { probe + step } else { probe };
            (probe, 0.0, GridAddress::BOTTOM_FACE)
        }
        ConstructionKind::Stairs => (probe + step * f32::from(bucket), yaw, GridAddress::CENTER),
        ConstructionKind::Wall => {
            let probe = if bucket > 1 { probe + step } else { probe };
            (probe, yaw, wall_address_for_yaw(yaw))
        }
    };

    Placement {
        position: grid.align(probe, address),
        yaw_degrees,
        address,
    }
}

/// The build preview. Never registered and never collides.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostConstruction {
    pub kind: ConstructionKind,
    pub template: ConstructionTemplate,
    pub material: String,
    pub position: Vec3,
    pub yaw_degrees: f32,
    pub address: GridAddress,
    pub parent: &'static str,
}

impl GhostConstruction {
    pub fn collides(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
pub struct BuildMode {
    config: BuildConfig,
    selected: ConstructionKind,
    previous: Option<ConstructionKind>,
    ghost: Option<GhostConstruction>,
    last_placed: Option<ConstructionId>,
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::new(BuildConfig::default())
    }
}

impl BuildMode {
    pub fn new(config: BuildConfig) -> Self {
        let selected = config.initial_kind;
        Self {
            config,
            selected,
            previous: None,
            ghost: None,
            last_placed: None,
        }
    }

    pub fn selected(&self) -> ConstructionKind {
        self.selected
    }

    pub fn preview(&self) -> Option<&GhostConstruction> {
        self.ghost.as_ref()
    }

    /// Id of the most recent successful commit.
    pub fn last_placed(&self) -> Option<ConstructionId> {
        self.last_placed
    }

    pub fn enter(&mut self, ctx: &ModeContext<'_>) {
        log::info!("[Build Mode] Entering");
        self.spawn_preview(ctx);
        self.previous = Some(self.selected);
    }

    pub fn exit(&mut self) {
        self.ghost = None;
        log::info!("[Build Mode] Exiting");
    }

    pub fn update(&mut self, ctx: &ModeContext<'_>) -> ModeKind {
        let input = ctx.input;
        if input.was_pressed(InputAction::Edit) {
            return ModeKind::Edit;
        }
        if input.was_pressed(InputAction::Weapon) {
            return ModeKind::Weapon;
        }

        if input.was_pressed(InputAction::BuildKey1) {
            self.selected = ConstructionKind::Wall;
        }
        if input.was_pressed(InputAction::BuildKey2) {
            self.selected = ConstructionKind::Stairs;
        }
        if input.was_pressed(InputAction::BuildKey3) {
            self.selected = ConstructionKind::Floor;
        }
        if self.previous != Some(self.selected) || self.ghost.is_none() {
            self.spawn_preview(ctx);
        }

        self.update_preview_pose(ctx);

        if input.was_pressed(InputAction::Place) {
            self.commit(ctx);
        }

        self.previous = Some(self.selected);
        ModeKind::Build
    }

    fn spawn_preview(&mut self, ctx: &ModeContext<'_>) {
        let template = ctx.factory.template(self.selected);
        log::debug!("[Build Mode] Preview -> {}", self.selected.name());
        self.ghost = Some(GhostConstruction {
            kind: self.selected,
            template,
            material: self.config.preview_material.clone(),
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
            address: GridAddress::CENTER,
            parent: ENVIRONMENT_ANCHOR,
        });
        self.update_preview_pose(ctx);
    }

    fn update_preview_pose(&mut self, ctx: &ModeContext<'_>) {
        let Some(ghost) = self.ghost.as_mut() else {
            return;
        };
        let placement = compute_placement(
            ghost.kind,
            ctx.grid,
            ctx.character_position,
            ctx.controller_height,
            ctx.facing,
            ctx.camera_pitch,
        );
        ghost.position = placement.position;
        ghost.yaw_degrees = placement.yaw_degrees;
        ghost.address = placement.address;
    }

    fn commit(&mut self, ctx: &ModeContext<'_>) {
        let Some(ghost) = self.ghost.as_ref() else {
            return;
        };
        match ctx.registry.place_at(ghost.kind, ghost.position, ghost.yaw_degrees) {
            Some(id) => {
                log::info!(
                    "[Build Mode] Placed {} {} at {}",
                    ghost.kind.name(),
                    id,
                    ghost.position
                );
                self.last_placed = Some(id);
            }
            None => {
                log::debug!("[Build Mode] Slot at {} already taken", ghost.position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_buckets() {
        assert_eq!(pitch_bucket(75.0), 0);
        assert_eq!(pitch_bucket(60.0), 1);
        assert_eq!(pitch_bucket(91.0), 1);
        assert_eq!(pitch_bucket(0.0), 1);
        assert_eq!(pitch_bucket(-0.5), 2);
        assert_eq!(pitch_bucket(-1.0), 2);
        assert_eq!(pitch_bucket(-30.0), 2);
        assert_eq!(pitch_bucket(-90.0), 2);
        assert_eq!(pitch_bucket(-91.0), 1);
    }

    #[test]
    fn test_snap_yaw() {
        assert_eq!(snap_yaw(10.0), 0.0);
        assert_eq!(snap_yaw(50.0), 90.0);
        assert_eq!(snap_yaw(-90.0), 270.0);
        assert_eq!(snap_yaw(350.0), 0.0);
        assert_eq!(snap_yaw(179.0), 180.0);
    }

    #[test]
    fn test_wall_table() {
        assert_eq!(wall_address_for_yaw(0.0).index(), 11);
        assert_eq!(wall_address_for_yaw(90.0).index(), 10);
        assert_eq!(wall_address_for_yaw(180.0).index(), 9);
        assert_eq!(wall_address_for_yaw(270.0).index(), 12);
        assert_eq!(wall_address_for_yaw(45.0).index(), 11);
    }

    #[test]
    fn test_facing_yaw() {
        let yaw = facing_yaw_degrees(Quat::from_rotation_y(90f32.to_radians()));
        assert!((yaw - 90.0).abs() < 1e-3);
        let yaw = facing_yaw_degrees(Quat::from_rotation_y(-90f32.to_radians()));
        assert!((yaw + 90.0).abs() < 1e-3);
    }

    fn place(kind: ConstructionKind, facing: Quat, pitch: f32) -> Placement {
        let grid = GridSpace::new(Vec3::splat(4.0));
        compute_placement(kind, &grid, Vec3::new(1.0, 0.0, 1.0), 1.8, facing, pitch)
    }

    #[test]
    fn test_floor_placement_pushes_one_cell() {
        let at_feet = place(ConstructionKind::Floor, Quat::IDENTITY, 75.0);
        assert_eq!(at_feet.position, Vec3::new(2.0, 0.0, 2.0));
        assert_eq!(at_feet.address, GridAddress::BOTTOM_FACE);

        let ahead = place(ConstructionKind::Floor, Quat::IDENTITY, 0.0);
        assert_eq!(ahead.position, Vec3::new(2.0, 0.0, 6.0));
    }

    #[test]
    fn test_stairs_push_by_bucket() {
        let up = place(ConstructionKind::Stairs, Quat::IDENTITY, -30.0);
        assert_eq!(up.position, Vec3::new(2.0, 2.0, 10.0));
        assert_eq!(up.yaw_degrees, 0.0);

        // Barely above the horizon already counts as looking up
        let level = place(ConstructionKind::Stairs, Quat::IDENTITY, -0.5);
        assert_eq!(level.position, up.position);
    }

    #[test]
    fn test_wall_pushed_when_looking_up() {
        let level = place(ConstructionKind::Wall, Quat::IDENTITY, 0.0);
        assert_eq!(level.position, Vec3::new(2.0, 2.0, 4.0));
        let up = place(ConstructionKind::Wall, Quat::IDENTITY, -0.5);
        assert_eq!(up.position, Vec3::new(2.0, 2.0, 8.0));
    }
}
