//! Static scene
//!
//! A minimal [`SceneQuery`] implementation: an optional infinite ground plane
//! plus a list of boxes, some of which stand for placed constructions.
//! Used by the harness binary and the tests; brute-force over all boxes.

use glam::Vec3;

use super::collision::Aabb;
use super::query::{RayHit, SceneQuery};
use crate::building::ConstructionId;

/// A box in the static scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBox {
    pub bounds: Aabb,
    pub construction: Option<ConstructionId>,
}

#[derive(Debug, Clone, Default)]
pub struct StaticScene {
    /// Height of an upward-facing ground plane, if any
    ground: Option<f32>,
    boxes: Vec<SceneBox>,
}

impl StaticScene {
    /// Empty scene: every probe misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene with only a ground plane at `height`.
    pub fn flat(height: f32) -> Self {
        Self {
            ground: Some(height),
            boxes: Vec::new(),
        }
    }

    pub fn ground_height(&self) -> Option<f32> {
        self.ground
    }

    pub fn with_box(mut self, min: Vec3, max: Vec3) -> Self {
        self.add_box(Aabb::new(min, max), None);
        self
    }

    pub fn with_construction(mut self, min: Vec3, max: Vec3, id: ConstructionId) -> Self {
        self.add_box(Aabb::new(min, max), Some(id));
        self
    }

    pub fn add_box(&mut self, bounds: Aabb, construction: Option<ConstructionId>) {
        self.boxes.push(SceneBox {
            bounds,
            construction,
        });
    }

    /// Drop every box tagged with `id`. Returns how many were removed.
    pub fn remove_construction(&mut self, id: ConstructionId) -> usize {
        let before = self.boxes.len();
        self.boxes.retain(|b| b.construction != Some(id));
        before - self.boxes.len()
    }

    pub fn boxes(&self) -> &[SceneBox] {
        &self.boxes
    }

    fn ground_hit(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        let height = self.ground?;
        if direction.y >= -1e-6 || origin.y < height {
            return None;
        }
        let t = (origin.y - height) / -direction.y;
        let point = origin + direction * t;
        Some(RayHit::new(Vec3::new(point.x, height, point.z), Vec3::Y, t))
    }
}

impl SceneQuery for StaticScene {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let mut closest = self
            .ground_hit(origin, direction)
            .filter(|hit| hit.distance <= max_distance);

        for scene_box in &self.boxes {
            let Some(t) = scene_box.bounds.ray_distance(origin, direction) else {
                continue;
            };
            if t > max_distance || closest.is_some_and(|c| c.distance <= t) {
                continue;
            }
            let point = origin + direction * t;
            closest = Some(RayHit {
                point,
                normal: scene_box.bounds.surface_normal(point),
                distance: t,
                construction: scene_box.construction,
            });
        }

        closest
    }
}
