//! Scene query interface
//!
//! The gameplay core never owns a physics world. Hosts answer ray and sphere
//! probes through [`SceneQuery`] and report the character controller's
//! collision flags as a [`GroundContact`] each tick.

use glam::Vec3;

use crate::building::ConstructionId;

/// Result of a scene probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit position
    pub point: Vec3,
    /// Surface normal at the hit (normalized)
    pub normal: Vec3,
    /// Distance from the probe origin along the probe direction
    pub distance: f32,
    /// Set when the hit belongs to a placed construction
    pub construction: Option<ConstructionId>,
}

impl RayHit {
    pub fn new(point: Vec3, normal: Vec3, distance: f32) -> Self {
        Self {
            point,
            normal,
            distance,
            construction: None,
        }
    }

    pub fn with_construction(mut self, id: ConstructionId) -> Self {
        self.construction = Some(id);
        self
    }

    pub fn is_construction(&self) -> bool {
        self.construction.is_some()
    }
}

/// Synchronous scene probes.
pub trait SceneQuery {
    /// Closest hit along `direction` within `max_distance`.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Swept sphere probe. Defaults to a plain ray along the sphere's center.
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit> {
        let _ = radius;
        self.raycast(origin, direction, max_distance)
    }
}

impl<T: SceneQuery + ?Sized> SceneQuery for &T {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        (**self).raycast(origin, direction, max_distance)
    }

    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit> {
        (**self).sphere_cast(origin, radius, direction, max_distance)
    }
}

/// Collision flags reported by the character controller after its last move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroundContact {
    pub grounded: bool,
    /// Collision flag "above"
    pub ceiling_contact: bool,
}

impl GroundContact {
    pub const GROUNDED: Self = Self {
        grounded: true,
        ceiling_contact: false,
    };

    pub const AIRBORNE: Self = Self {
        grounded: false,
        ceiling_contact: false,
    };

    pub fn with_ceiling(mut self) -> Self {
        self.ceiling_contact = true;
        self
    }
}
