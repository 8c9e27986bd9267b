//! Third-person orbit camera
//!
//! Mouse X turns the character, mouse Y pitches the view. Two rigs:
//!
//! - **Child**: the camera rides at a fixed offset on the character and pitches
//!   in place. Pitch is clamped on the rotation itself.
//! - **Independent**: the camera sits behind and beside the character and orbits
//!   vertically about the character's right axis through a pivot at half body
//!   height. Looking far up raises the pivot so the view clears the feet.
//!
//! Angles are in degrees at the API. Positive pitch looks down.
//!
//! ```rust,ignore
//! let mut camera = OrbitCamera::new(CameraConfig::default(), Quat::IDENTITY, 1.8);
//! let pose = camera.look(dt, &input, character_position);
//! let aim = pose.forward();
//! ```

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::GameplayError;
use crate::input::{CursorAction, CursorManager, InputSnapshot};
use crate::player::{flat_forward, flat_right};

/// Which rig the camera uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbitMode {
    Child,
    #[default]
    Independent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub mode: OrbitMode,
    /// Horizontal distance behind the character
    pub orbit_radius: f32,
    /// Shift along the character's right axis
    pub lateral_offset: f32,
    pub height: f32,
    /// Orbit angle (degrees, looking up) past which the pivot starts rising
    pub foot_angle: f32,
    pub foot_angle_smoothness: f32,
    /// Camera position relative to the character in the child rig
    pub child_offset: Vec3,
    pub x_sensitivity: f32,
    pub y_sensitivity: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub smooth: bool,
    pub smooth_time: f32,
    pub lock_cursor: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: OrbitMode::Independent,
            orbit_radius: 2.0,
            lateral_offset: 0.2,
            height: 1.6,
            foot_angle: 65.0,
            foot_angle_smoothness: 65.0,
            child_offset: Vec3::new(0.0, 1.6, 0.0),
            x_sensitivity: 2.0,
            y_sensitivity: 2.0,
            pitch_min: -90.0,
            pitch_max: 90.0,
            smooth: false,
            smooth_time: 5.0,
            lock_cursor: true,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), GameplayError> {
        if !(self.pitch_min.is_finite() && self.pitch_max.is_finite())
            || self.pitch_min > self.pitch_max
        {
            return Err(GameplayError::Config(format!(
                "camera pitch range [{}, {}] is invalid",
                self.pitch_min, self.pitch_max
            )));
        }
        if self.pitch_min <= -180.0 || self.pitch_max >= 180.0 {
            return Err(GameplayError::Config(String::from(
                "camera pitch range must stay inside (-180, 180)",
            )));
        }
        if self.foot_angle_smoothness <= 0.0 {
            return Err(GameplayError::Config(String::from(
                "camera.foot_angle_smoothness must be positive",
            )));
        }
        Ok(())
    }
}

/// Clamp the X-axis (pitch) part of a rotation to `[min, max]` degrees.
///
/// The quaternion is scaled to w = 1, its pitch read as `2·atan(x)`, clamped,
/// and written back as `tan(angle / 2)`. Returns the renormalized rotation and
/// the clamped angle.
pub fn clamp_rotation_around_x_axis(q: Quat, min_degrees: f32, max_degrees: f32) -> (Quat, f32) {
    let w = if q.w.abs() < f32::EPSILON {
        f32::EPSILON.copysign(q.w)
    } else {
        q.w
    };
    let (y, z) = (q.y / w, q.z / w);

    let angle = (2.0 * (q.x / w).atan()).to_degrees();
    let angle = angle.clamp(min_degrees, max_degrees);
    let x = (0.5 * angle.to_radians()).tan();

    (Quat::from_xyzw(x, y, z, 1.0).normalize(), angle)
}

/// Output of a camera tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub orientation: Quat,
    /// Current pitch in degrees, positive looking down
    pub pitch_degrees: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            pitch_degrees: 0.0,
        }
    }
}

impl CameraPose {
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }
}

/// Look targets accumulated from mouse input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraLookState {
    pub character_yaw: Quat,
    /// Child rig: local pitch rotation. Independent rig: copy of the yaw.
    pub camera_orientation: Quat,
    pub cumulative_pitch: f32,
}

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    config: CameraConfig,
    target: CameraLookState,
    /// Applied character rotation (trails the target when smoothing)
    character_rotation: Quat,
    camera_rotation: Quat,
    /// Independent rig position before the vertical orbit
    base_position: Option<Vec3>,
    character_height: f32,
    cursor: CursorManager,
    cursor_action: CursorAction,
    pose: CameraPose,
}

impl OrbitCamera {
    pub fn new(config: CameraConfig, character_yaw: Quat, character_height: f32) -> Self {
        let camera_rotation = match config.mode {
            OrbitMode::Child => Quat::IDENTITY,
            OrbitMode::Independent => character_yaw,
        };
        let cursor = CursorManager::new(config.lock_cursor);
        Self {
            config,
            target: CameraLookState {
                character_yaw,
                camera_orientation: camera_rotation,
                cumulative_pitch: 0.0,
            },
            character_rotation: character_yaw,
            camera_rotation,
            base_position: None,
            character_height,
            cursor,
            cursor_action: CursorAction::None,
            pose: CameraPose::default(),
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn look_state(&self) -> &CameraLookState {
        &self.target
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn cursor(&self) -> &CursorManager {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut CursorManager {
        &mut self.cursor
    }

    /// Cursor action raised by the last [`Self::look`].
    pub fn cursor_action(&self) -> CursorAction {
        self.cursor_action
    }

    /// Applied character facing.
    pub fn character_rotation(&self) -> Quat {
        self.character_rotation
    }

    pub fn set_character_height(&mut self, height: f32) {
        self.character_height = height;
    }

    /// Overwrite the character facing, e.g. after locomotion's turn bias.
    pub fn set_character_yaw(&mut self, yaw: Quat) {
        self.target.character_yaw = yaw;
        self.character_rotation = yaw;
        if self.config.mode == OrbitMode::Independent {
            self.target.camera_orientation = yaw;
            self.camera_rotation = yaw;
        }
    }

    /// Pivot of the vertical orbit for a character at `character_position`.
    pub fn orbit_pivot(&self, character_position: Vec3) -> Vec3 {
        let mut pivot = character_position + Vec3::Y * (self.character_height * 0.5);
        let angle = self.target.cumulative_pitch;
        let foot = self.config.foot_angle;
        if angle < -foot {
            pivot.y += (foot + angle).abs() / self.config.foot_angle_smoothness;
        }
        pivot
    }

    /// Apply one tick of mouse look and place the camera.
    pub fn look(&mut self, dt: f32, input: &InputSnapshot, character_position: Vec3) -> CameraPose {
        let yaw_input = input.mouse_x * self.config.x_sensitivity;
        let pitch_input = input.mouse_y * self.config.y_sensitivity;

        self.target.character_yaw =
            (self.target.character_yaw * Quat::from_rotation_y(yaw_input.to_radians())).normalize();

        self.pose = match self.config.mode {
            OrbitMode::Child => self.look_child(dt, pitch_input, character_position),
            OrbitMode::Independent => self.look_independent(dt, pitch_input, character_position),
        };

        self.cursor_action = self.cursor.update(input);
        if self.cursor_action == CursorAction::ApplyState {
            log::debug!("[Camera] Cursor locked: {}", self.cursor.is_locked());
        }

        self.pose
    }

    fn smoothing(&self, dt: f32) -> Option<f32> {
        if self.config.smooth && dt > 0.0 {
            Some((self.config.smooth_time * dt).min(1.0))
        } else {
            None
        }
    }

    fn apply_rotations(&mut self, dt: f32) {
        match self.smoothing(dt) {
            Some(t) => {
                self.character_rotation =
                    self.character_rotation.slerp(self.target.character_yaw, t);
                self.camera_rotation =
                    self.camera_rotation.slerp(self.target.camera_orientation, t);
            }
            None => {
                self.character_rotation = self.target.character_yaw;
                self.camera_rotation = self.target.camera_orientation;
            }
        }
    }

    fn look_child(&mut self, dt: f32, pitch_input: f32, character_position: Vec3) -> CameraPose {
        let pitched =
            self.target.camera_orientation * Quat::from_rotation_x((-pitch_input).to_radians());
        let (clamped, angle) =
            clamp_rotation_around_x_axis(pitched, self.config.pitch_min, self.config.pitch_max);
        self.target.camera_orientation = clamped;
        self.target.cumulative_pitch = angle;

        self.apply_rotations(dt);

        CameraPose {
            position: character_position + self.character_rotation * self.config.child_offset,
            orientation: (self.character_rotation * self.camera_rotation).normalize(),
            pitch_degrees: angle,
        }
    }

    fn look_independent(
        &mut self,
        dt: f32,
        pitch_input: f32,
        character_position: Vec3,
    ) -> CameraPose {
        self.target.camera_orientation = self.target.character_yaw;
        self.apply_rotations(dt);

        let right = flat_right(self.character_rotation);
        let base_target = character_position + right * self.config.lateral_offset
            + Vec3::Y * self.config.height
            - flat_forward(self.character_rotation) * self.config.orbit_radius;
        let base = match (self.smoothing(dt), self.base_position) {
            (Some(t), Some(previous)) => previous.lerp(base_target, t),
            _ => base_target,
        };
        self.base_position = Some(base);

        let angle = (self.target.cumulative_pitch - pitch_input)
            .clamp(self.config.pitch_min, self.config.pitch_max);
        self.target.cumulative_pitch = angle;

        let pivot = self.orbit_pivot(character_position);
        let orbit = Quat::from_axis_angle(right, angle.to_radians());

        CameraPose {
            position: pivot + orbit * (base - pivot),
            orientation: (orbit * self.camera_rotation).normalize(),
            pitch_degrees: angle,
        }
    }
}
