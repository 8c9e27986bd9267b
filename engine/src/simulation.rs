//! Simulation
//!
//! Owns every gameplay component and advances them in a fixed order each tick:
//!
//! 1. Cursor sensor (own fixed interval, uses last tick's camera)
//! 2. Camera mouse look
//! 3. Locomotion
//! 4. Mode machine
//!
//! The host supplies input, the character's reported state and a scene to
//! probe, then applies `move_delta` to its character controller.

use glam::{Quat, Vec3};

use crate::building::{ConstructionFactory, DefaultFactory, SharedRegistry};
use crate::camera::{CameraPose, OrbitCamera};
use crate::config::GameplayConfig;
use crate::error::GameplayError;
use crate::input::{CursorAction, InputSnapshot};
use crate::modes::{GhostConstruction, ModeContext, ModeHandler, ModeKind, ModeMachine, ModeTick};
use crate::physics::SceneQuery;
use crate::player::{LocomotionController, PoseFrame};
use crate::sensor::CursorSensor;
use crate::world::GridSpace;

pub use crate::player::{BodyMarkers, CharacterFrame};

/// Everything one tick produced.
#[derive(Debug)]
pub struct TickOutput {
    /// Displacement for the character controller
    pub move_delta: Vec3,
    pub velocity: Vec3,
    pub facing: Quat,
    pub camera: CameraPose,
    /// Cursor lock change to apply to the window
    pub cursor: CursorAction,
    /// Active mode after this tick
    pub mode: ModeKind,
    pub mode_tick: ModeTick,
    pub pose: PoseFrame,
    /// Build preview, while in build mode
    pub preview: Option<GhostConstruction>,
    /// Edit affordance anchor, while in edit mode with a target
    pub edit_anchor: Option<Vec3>,
    /// Sensor intervals elapsed this tick
    pub sensor_steps: u32,
}

pub struct Simulation {
    config: GameplayConfig,
    grid: GridSpace,
    registry: SharedRegistry,
    factory: Box<dyn ConstructionFactory>,
    locomotion: LocomotionController,
    camera: OrbitCamera,
    modes: ModeMachine,
    sensor: CursorSensor,
}

impl Simulation {
    pub fn new(config: GameplayConfig) -> Result<Self, GameplayError> {
        Self::with_registry(config, SharedRegistry::new())
    }

    /// Build a simulation that places into an existing registry.
    pub fn with_registry(
        config: GameplayConfig,
        registry: SharedRegistry,
    ) -> Result<Self, GameplayError> {
        config.validate()?;
        let grid = GridSpace::from_config(&config.grid)?;
        let factory = DefaultFactory::for_cell(grid.cell_size());
        let locomotion = LocomotionController::new(config.locomotion.clone());
        let camera = OrbitCamera::new(
            config.camera.clone(),
            Quat::IDENTITY,
            locomotion.controller_height(),
        );
        let handlers = config
            .modes
            .iter()
            .map(|kind| ModeHandler::for_kind(*kind, &config.build));
        let modes = ModeMachine::new(config.initial_mode, handlers);
        let sensor = CursorSensor::new(config.sensor.clone());

        log::info!(
            "[Simulation] Created: cell {}, initial mode {:?}, {} modes",
            grid.cell_size(),
            config.initial_mode,
            config.modes.len()
        );

        Ok(Self {
            config,
            grid,
            registry,
            factory: Box::new(factory),
            locomotion,
            camera,
            modes,
            sensor,
        })
    }

    /// Replace the construction template source.
    pub fn set_factory(&mut self, factory: Box<dyn ConstructionFactory>) {
        self.factory = factory;
    }

    pub fn config(&self) -> &GameplayConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridSpace {
        &self.grid
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn modes(&self) -> &ModeMachine {
        &self.modes
    }

    pub fn sensor(&self) -> &CursorSensor {
        &self.sensor
    }

    pub fn active_mode(&self) -> ModeKind {
        self.modes.active()
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        frame: &CharacterFrame,
        scene: &dyn SceneQuery,
    ) -> TickOutput {
        let sensor_steps = self.sensor.step(dt, self.camera.pose(), &self.grid, scene);

        self.camera.set_character_height(self.locomotion.controller_height());
        let camera = self.camera.look(dt, input, frame.position);

        let mut pose = PoseFrame::default();
        let facing = self.camera.character_rotation();
        let movement = self.locomotion.tick(dt, input, frame, facing, scene, &mut pose);
        if movement.facing != facing {
            self.camera.set_character_yaw(movement.facing);
        }

        let ctx = ModeContext {
            input,
            grid: &self.grid,
            registry: &self.registry,
            factory: self.factory.as_ref(),
            character_position: frame.position,
            facing: movement.facing,
            controller_height: self.locomotion.controller_height(),
            camera_pitch: camera.pitch_degrees,
            sensor: self.sensor.reading(),
        };
        let mode_tick = self.modes.tick(&ctx);
        let mode = self.modes.active();

        let preview = match mode {
            ModeKind::Build => self.modes.build_mode().and_then(|m| m.preview().cloned()),
            _ => None,
        };
        let edit_anchor = match mode {
            ModeKind::Edit => self.modes.edit_mode().and_then(|m| m.anchor()),
            _ => None,
        };

        TickOutput {
            move_delta: movement.move_delta,
            velocity: movement.velocity,
            facing: movement.facing,
            camera,
            cursor: self.camera.cursor_action(),
            mode,
            mode_tick,
            pose,
            preview,
            edit_anchor,
            sensor_steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputAction;
    use crate::physics::StaticScene;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_starts_in_configured_mode() {
        let mut sim = Simulation::new(GameplayConfig::default()).expect("valid config");
        let scene = StaticScene::flat(0.0);
        let frame = CharacterFrame::standing_at(Vec3::ZERO, 1.8);
        let out = sim.tick(DT, &InputSnapshot::new(), &frame, &scene);
        assert_eq!(out.mode, ModeKind::Build);
        assert!(out.preview.is_some());
        assert!(out.edit_anchor.is_none());
    }

    #[test]
    fn test_switch_to_weapon_drops_preview() {
        let mut sim = Simulation::new(GameplayConfig::default()).expect("valid config");
        let scene = StaticScene::flat(0.0);
        let frame = CharacterFrame::standing_at(Vec3::ZERO, 1.8);
        sim.tick(DT, &InputSnapshot::new(), &frame, &scene);
        let weapon = InputSnapshot::new().with_pressed(InputAction::Weapon);
        let out = sim.tick(DT, &weapon, &frame, &scene);
        assert_eq!(out.mode, ModeKind::Weapon);
        assert!(out.preview.is_none());
    }

    #[test]
    fn test_cursor_state_reported_once() {
        let mut sim = Simulation::new(GameplayConfig::default()).expect("valid config");
        let scene = StaticScene::flat(0.0);
        let frame = CharacterFrame::standing_at(Vec3::ZERO, 1.8);
        let idle = InputSnapshot::new();

        assert_eq!(sim.tick(DT, &idle, &frame, &scene).cursor, CursorAction::ApplyState);
        assert_eq!(sim.tick(DT, &idle, &frame, &scene).cursor, CursorAction::None);

        let esc = InputSnapshot::new().with_released(InputAction::Escape);
        assert_eq!(sim.tick(DT, &esc, &frame, &scene).cursor, CursorAction::ApplyState);
        assert!(!sim.camera().cursor().is_locked());
        assert_eq!(sim.tick(DT, &idle, &frame, &scene).cursor, CursorAction::None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameplayConfig::default();
        config.sensor.interval = 0.0;
        assert!(Simulation::new(config).is_err());
    }
}
