//! Player stance and collider shape
//!
//! The character collider is a capsule described by its height and a local
//! center offset. Grounded, it eases toward the shape of the current stance;
//! airborne, it follows the animated head and foot markers directly.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Standing collider height in meters
pub const STANDING_HEIGHT: f32 = 1.8;

/// Crouching collider height in meters
pub const CROUCH_HEIGHT: f32 = 1.2;

/// Player stance states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

impl Stance {
    pub fn from_crouching(crouching: bool) -> Self {
        if crouching {
            Stance::Crouching
        } else {
            Stance::Standing
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Stance::Standing => Stance::Crouching,
            Stance::Crouching => Stance::Standing,
        }
    }
}

/// Capsule height plus its center relative to the character origin (feet).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderShape {
    pub height: f32,
    pub center: Vec3,
}

impl ColliderShape {
    /// Shape whose center sits at half its height.
    pub fn upright(height: f32) -> Self {
        Self {
            height,
            center: Vec3::new(0.0, height * 0.5, 0.0),
        }
    }

    pub fn lerp(self, target: ColliderShape, t: f32) -> Self {
        Self {
            height: self.height + (target.height - self.height) * t,
            center: self.center.lerp(target.center, t),
        }
    }

    /// Shape spanning the foot marker to the head marker.
    ///
    /// The center's x/z stay at `nominal`; only its height follows the markers.
    pub fn between_markers(head: Vec3, foot: Vec3, origin: Vec3, nominal: ColliderShape) -> Self {
        let height = (head.y - foot.y).max(0.0);
        let mid_y = (head.y + foot.y) * 0.5;
        Self {
            height,
            center: Vec3::new(nominal.center.x, mid_y - origin.y, nominal.center.z),
        }
    }
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::upright(STANDING_HEIGHT)
    }
}
