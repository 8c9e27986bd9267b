//! Locomotion Controller
//!
//! Per-tick character movement for a root-motion animated third-person
//! character. The host's character controller reports whether it is grounded,
//! the animation system reports head/foot markers and the root-motion delta,
//! and the controller answers with a displacement for the next move.
//!
//! # Model
//!
//! - Forward speed eases toward `vertical * (run or walk speed)`
//! - Side speed follows the horizontal axis directly
//! - Moving diagonally biases the facing by `turn_angle_degrees`
//! - Grounded: stick-to-ground velocity, jump launch, collider eases to stance
//! - Airborne: gravity, collider follows the animated markers
//!
//! # Usage
//!
//! ```rust,ignore
//! use build_royale_engine::player::{CharacterFrame, LocomotionController, PoseFrame};
//!
//! let mut locomotion = LocomotionController::default();
//! let mut pose = PoseFrame::default();
//!
//! // Each tick:
//! let out = locomotion.tick(dt, &input, &frame, facing, &scene, &mut pose);
//! character_controller.move_by(out.move_delta);
//! facing = out.facing;
//! ```

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::pose::{PoseParam, PoseSink};
use super::stance::{CROUCH_HEIGHT, ColliderShape, STANDING_HEIGHT, Stance};
use crate::error::GameplayError;
use crate::input::{InputAction, InputSnapshot};
use crate::physics::{GroundContact, SceneQuery};

/// Gravity acceleration along Y in m/s^2
pub const GRAVITY: f32 = -9.81;

/// Horizontal forward direction of a facing rotation.
pub fn flat_forward(rotation: Quat) -> Vec3 {
    let forward = rotation * Vec3::Z;
    Vec3::new(forward.x, 0.0, forward.z).normalize_or(Vec3::Z)
}

/// Horizontal right direction of a facing rotation.
pub fn flat_right(rotation: Quat) -> Vec3 {
    let right = rotation * Vec3::X;
    Vec3::new(right.x, 0.0, right.z).normalize_or(Vec3::X)
}

/// Tuning for [`LocomotionController`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub run_speed: f32,
    pub walk_speed: f32,
    /// Launch velocity in m/s
    pub jump_speed: f32,
    /// Horizontal speed while airborne
    pub in_air_speed: f32,
    pub gravity: f32,
    pub gravity_multiplier: f32,
    pub stick_to_ground_force: f32,
    /// Facing bias applied per tick while moving diagonally
    pub turn_angle_degrees: f32,
    /// Rate for speed and collider easing (per second)
    pub smoothing_rate: f32,
    pub standing: ColliderShape,
    pub crouching: ColliderShape,
    pub radius: f32,
    /// Airborne time after which an unconsumed jump request is dropped
    pub jump_grace_seconds: f32,
    /// Forward speeds below this snap to zero
    pub speed_epsilon: f32,
    /// Wall probe reach as a multiple of `radius`
    pub wall_probe_factor: f32,
    pub ground_probe_distance: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            run_speed: 2.0,
            walk_speed: 1.0,
            jump_speed: 5.0,
            in_air_speed: 1.0,
            gravity: GRAVITY,
            gravity_multiplier: 2.0,
            stick_to_ground_force: 2.0,
            turn_angle_degrees: 15.0,
            smoothing_rate: 5.0,
            standing: ColliderShape::upright(STANDING_HEIGHT),
            crouching: ColliderShape::upright(CROUCH_HEIGHT),
            radius: 0.3,
            jump_grace_seconds: 0.1,
            speed_epsilon: 0.001,
            wall_probe_factor: 1.7,
            ground_probe_distance: 10.0,
        }
    }
}

impl LocomotionConfig {
    pub fn validate(&self) -> Result<(), GameplayError> {
        let positive = [
            ("run_speed", self.run_speed),
            ("walk_speed", self.walk_speed),
            ("smoothing_rate", self.smoothing_rate),
            ("radius", self.radius),
            ("ground_probe_distance", self.ground_probe_distance),
            ("standing.height", self.standing.height),
            ("crouching.height", self.crouching.height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(GameplayError::Config(format!(
                    "locomotion.{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn shape_for(&self, stance: Stance) -> ColliderShape {
        match stance {
            Stance::Standing => self.standing,
            Stance::Crouching => self.crouching,
        }
    }
}

/// World-space animation markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyMarkers {
    pub head: Vec3,
    pub foot: Vec3,
}

/// What the host reports about the character for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterFrame {
    /// Character origin (feet) in world space
    pub position: Vec3,
    pub contact: GroundContact,
    pub markers: BodyMarkers,
    /// Animation root-motion delta for this tick
    pub root_motion: Vec3,
}

impl CharacterFrame {
    /// Grounded character with markers at feet and head height.
    pub fn standing_at(position: Vec3, height: f32) -> Self {
        Self {
            position,
            contact: GroundContact::GROUNDED,
            markers: BodyMarkers {
                head: position + Vec3::Y * height,
                foot: position,
            },
            root_motion: Vec3::ZERO,
        }
    }

    pub fn airborne_at(position: Vec3, height: f32) -> Self {
        Self {
            contact: GroundContact::AIRBORNE,
            ..Self::standing_at(position, height)
        }
    }

    pub fn with_contact(mut self, contact: GroundContact) -> Self {
        self.contact = contact;
        self
    }

    pub fn with_root_motion(mut self, delta: Vec3) -> Self {
        self.root_motion = delta;
        self
    }

    pub fn with_markers(mut self, head: Vec3, foot: Vec3) -> Self {
        self.markers = BodyMarkers { head, foot };
        self
    }
}

/// Mutable locomotion state, updated once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocomotionState {
    pub is_grounded: bool,
    pub was_grounded_last_tick: bool,
    pub is_jumping: bool,
    pub is_crouching: bool,
    /// Jump edge captured, not yet expired
    pub jump_requested: bool,
    pub current_forward_speed: f32,
    pub current_side_speed: f32,
    /// Seconds since leaving the ground
    pub flying_timer: f32,
    pub vertical_velocity: f32,
    pub controller_height: f32,
    pub controller_center_offset: Vec3,
    pub distance_from_ground: f32,
}

impl LocomotionState {
    fn new(shape: ColliderShape) -> Self {
        Self {
            is_grounded: true,
            was_grounded_last_tick: true,
            is_jumping: false,
            is_crouching: false,
            jump_requested: false,
            current_forward_speed: 0.0,
            current_side_speed: 0.0,
            flying_timer: 0.0,
            vertical_velocity: 0.0,
            controller_height: shape.height,
            controller_center_offset: shape.center,
            distance_from_ground: 0.0,
        }
    }

    pub fn collider(&self) -> ColliderShape {
        ColliderShape {
            height: self.controller_height,
            center: self.controller_center_offset,
        }
    }

    fn set_collider(&mut self, shape: ColliderShape) {
        self.controller_height = shape.height;
        self.controller_center_offset = shape.center;
    }
}

/// Result of one locomotion tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionOutput {
    /// Displacement to hand to the character controller
    pub move_delta: Vec3,
    pub velocity: Vec3,
    /// Facing after the diagonal turn bias
    pub facing: Quat,
}

#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: LocomotionConfig,
    state: LocomotionState,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig) -> Self {
        let state = LocomotionState::new(config.standing);
        Self { config, state }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    pub fn stance(&self) -> Stance {
        Stance::from_crouching(self.state.is_crouching)
    }

    pub fn controller_height(&self) -> f32 {
        self.state.controller_height
    }

    /// Advance one tick.
    ///
    /// Non-positive or non-finite `dt` leaves the state untouched and returns
    /// a zero displacement.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        frame: &CharacterFrame,
        facing: Quat,
        scene: &dyn SceneQuery,
        pose: &mut dyn PoseSink,
    ) -> LocomotionOutput {
        if !(dt > 0.0 && dt.is_finite()) {
            return LocomotionOutput {
                move_delta: Vec3::ZERO,
                velocity: Vec3::ZERO,
                facing,
            };
        }

        self.handle_stance_and_jump_edges(input);

        let grounded = frame.contact.grounded;
        self.state.is_grounded = grounded;
        let ease = (dt * self.config.smoothing_rate).min(1.0);

        // Forward / backward
        let blocked = self.wall_ahead(frame.position, facing, scene);
        let vertical = if blocked { input.vertical.min(0.0) } else { input.vertical };
        let speed = if input.is_held(InputAction::Run) {
            self.config.run_speed
        } else {
            self.config.walk_speed
        };
        let target = vertical * speed;
        let forward_speed = self.state.current_forward_speed;
        let mut forward_speed = forward_speed + (target - forward_speed) * ease;
        if forward_speed.abs() < self.config.speed_epsilon {
            forward_speed = 0.0;
        }
        self.state.current_forward_speed = forward_speed;
        self.state.current_side_speed = input.horizontal;

        let facing = self.apply_turn_bias(facing, input.horizontal);

        if grounded {
            self.state.flying_timer = 0.0;
            self.state.vertical_velocity = -self.config.stick_to_ground_force;
            if self.state.jump_requested {
                if !self.state.is_jumping {
                    log::debug!("[Locomotion] Jump launched at {:?}", frame.position);
                }
                self.state.is_jumping = true;
                self.state.vertical_velocity = self.config.jump_speed;
            }
            let target_shape = self.config.shape_for(self.stance());
            let shape = self.state.collider().lerp(target_shape, ease);
            self.state.set_collider(shape);
        } else {
            self.state.flying_timer += dt;
            if self.state.flying_timer >= self.config.jump_grace_seconds {
                self.state.jump_requested = false;
                self.state.is_jumping = true;
            }
            self.state.vertical_velocity +=
                self.config.gravity * self.config.gravity_multiplier * dt;
            let shape = ColliderShape::between_markers(
                frame.markers.head,
                frame.markers.foot,
                frame.position,
                self.config.standing,
            );
            self.state.set_collider(shape);
        }

        if frame.contact.ceiling_contact {
            self.state.vertical_velocity = 0.0;
        }

        if !self.state.was_grounded_last_tick && grounded {
            log::debug!("[Locomotion] Landed");
            self.state.is_jumping = false;
        }

        self.state.distance_from_ground = self.probe_ground_distance(frame, facing, scene);

        let horizontal = if grounded {
            Vec3::new(frame.root_motion.x / dt, 0.0, frame.root_motion.z / dt)
        } else {
            flat_forward(facing) * self.config.in_air_speed * input.vertical
        };
        let velocity = Vec3::new(horizontal.x, self.state.vertical_velocity, horizontal.z);

        self.state.was_grounded_last_tick = grounded;
        self.write_pose(pose);

        LocomotionOutput {
            move_delta: velocity * dt,
            velocity,
            facing,
        }
    }

    fn handle_stance_and_jump_edges(&mut self, input: &InputSnapshot) {
        if input.was_pressed(InputAction::Crouch) {
            self.state.is_crouching = self.stance().toggled() == Stance::Crouching;
            log::debug!("[Locomotion] Stance -> {:?}", self.stance());
        }
        if input.was_pressed(InputAction::Jump) {
            if self.state.is_crouching {
                self.state.is_crouching = false;
                log::debug!("[Locomotion] Jump while crouched, standing up");
            } else {
                self.state.jump_requested = true;
            }
        }
    }

    fn apply_turn_bias(&self, facing: Quat, horizontal: f32) -> Quat {
        let speed = self.state.current_forward_speed;
        let angle = if speed > 0.9 {
            horizontal * self.config.turn_angle_degrees
        } else if speed < -0.5 {
            -horizontal * self.config.turn_angle_degrees
        } else {
            0.0
        };
        if angle == 0.0 {
            return facing;
        }
        (facing * Quat::from_rotation_y(angle.to_radians())).normalize()
    }

    fn probe_origin(&self, position: Vec3) -> Vec3 {
        position + Vec3::Y * (self.state.controller_height * 0.5)
    }

    fn wall_ahead(&self, position: Vec3, facing: Quat, scene: &dyn SceneQuery) -> bool {
        let reach = self.config.radius * self.config.wall_probe_factor;
        scene
            .raycast(self.probe_origin(position), flat_forward(facing), reach)
            .is_some()
    }

    /// Shortest foot-to-ground distance over five downward probes. Reports the
    /// probe distance when nothing is below.
    fn probe_ground_distance(
        &self,
        frame: &CharacterFrame,
        facing: Quat,
        scene: &dyn SceneQuery,
    ) -> f32 {
        let origin = self.probe_origin(frame.position);
        let forward = flat_forward(facing) * self.config.radius;
        let right = flat_right(facing) * self.config.radius;
        let offsets = [Vec3::ZERO, forward, -forward, right, -right];

        offsets
            .iter()
            .filter_map(|offset| {
                scene.raycast(origin + *offset, Vec3::NEG_Y, self.config.ground_probe_distance)
            })
            .map(|hit| frame.markers.foot.y - hit.point.y)
            .reduce(f32::min)
            .unwrap_or(self.config.ground_probe_distance)
    }

    fn write_pose(&self, pose: &mut dyn PoseSink) {
        pose.set_float(PoseParam::ForwardSpeed, self.state.current_forward_speed);
        pose.set_float(PoseParam::SideSpeed, self.state.current_side_speed);
        pose.set_float(PoseParam::DistanceFromGround, self.state.distance_from_ground);
        pose.set_bool(PoseParam::Crouching, self.state.is_crouching);
        pose.set_bool(PoseParam::Jump, self.state.jump_requested);
    }
}
