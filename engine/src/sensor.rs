//! Cursor Sensor
//!
//! Fixed-interval probe along the camera's view. The ray starts a little in
//! front of the camera so the character itself is never hit. Edit mode reads
//! the hit construction; other consumers read the sensor point, which falls
//! back to the far end of the ray when nothing (or a construction) is hit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::building::ConstructionId;
use crate::camera::CameraPose;
use crate::error::GameplayError;
use crate::physics::{RayHit, SceneQuery};
use crate::world::GridSpace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Seconds between probes
    pub interval: f32,
    /// Ray start offset along the view direction
    pub move_from_origin: f32,
    pub length: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            interval: 0.02,
            move_from_origin: 2.0,
            length: 6.0,
        }
    }
}

impl SensorConfig {
    pub fn validate(&self) -> Result<(), GameplayError> {
        if !(self.interval > 0.0 && self.interval.is_finite()) {
            return Err(GameplayError::Config(format!(
                "sensor.interval must be positive, got {}",
                self.interval
            )));
        }
        if !(self.length > 0.0) {
            return Err(GameplayError::Config(String::from("sensor.length must be positive")));
        }
        Ok(())
    }
}

/// Latest sensor sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorReading {
    pub origin: Vec3,
    pub direction: Vec3,
    pub hit: Option<RayHit>,
    /// Hit point, or the far end of the ray
    pub point: Vec3,
    /// Nearest lattice point to the hit (debug aid)
    pub lattice_point: Vec3,
}

impl SensorReading {
    pub fn construction(&self) -> Option<ConstructionId> {
        self.hit.and_then(|hit| hit.construction)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CursorSensor {
    config: SensorConfig,
    accumulator: f32,
    reading: SensorReading,
}

impl CursorSensor {
    pub fn new(config: SensorConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
            reading: SensorReading::default(),
        }
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn reading(&self) -> &SensorReading {
        &self.reading
    }

    /// Advance the fixed-step clock by `dt`, probing when an interval elapsed.
    ///
    /// Returns how many intervals elapsed. The camera does not move between
    /// them, so one probe covers all of them.
    pub fn step(
        &mut self,
        dt: f32,
        camera: &CameraPose,
        grid: &GridSpace,
        scene: &dyn SceneQuery,
    ) -> u32 {
        if dt > 0.0 && dt.is_finite() {
            self.accumulator += dt;
        }
        let elapsed = (self.accumulator / self.config.interval).floor();
        if elapsed < 1.0 {
            return 0;
        }
        self.accumulator -= elapsed * self.config.interval;
        self.probe(camera, grid, scene);
        elapsed as u32
    }

    /// Probe immediately.
    pub fn probe(
        &mut self,
        camera: &CameraPose,
        grid: &GridSpace,
        scene: &dyn SceneQuery,
    ) -> &SensorReading {
        let direction = camera.forward().normalize_or(Vec3::Z);
        let origin = camera.position + direction * self.config.move_from_origin;
        let far_point = origin + direction * self.config.length;
        let hit = scene.raycast(origin, direction, self.config.length);

        let point = match hit {
            Some(hit) if !hit.is_construction() => hit.point,
            _ => far_point,
        };
        let lattice_point = grid.nearest_lattice_point(hit.map_or(point, |h| h.point));
        log::trace!("[Sensor] point {:?} lattice {:?}", point, lattice_point);

        self.reading = SensorReading {
            origin,
            direction,
            hit,
            point,
            lattice_point,
        };
        &self.reading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::StaticScene;
    use glam::Quat;

    fn camera_looking_down_z() -> CameraPose {
        CameraPose {
            position: Vec3::new(0.0, 1.0, 0.0),
            orientation: Quat::IDENTITY,
            pitch_degrees: 0.0,
        }
    }

    #[test]
    fn test_miss_uses_far_point() {
        let mut sensor = CursorSensor::new(SensorConfig::default());
        let reading =
            *sensor.probe(&camera_looking_down_z(), &GridSpace::default(), &StaticScene::new());
        assert!(reading.hit.is_none());
        assert!(reading.point.abs_diff_eq(Vec3::new(0.0, 1.0, 8.0), 1e-5));
    }

    #[test]
    fn test_plain_hit_uses_hit_point() {
        let scene =
            StaticScene::new().with_box(Vec3::new(-1.0, 0.0, 4.0), Vec3::new(1.0, 2.0, 5.0));
        let mut sensor = CursorSensor::new(SensorConfig::default());
        let reading = *sensor.probe(&camera_looking_down_z(), &GridSpace::default(), &scene);
        assert!(reading.point.abs_diff_eq(Vec3::new(0.0, 1.0, 4.0), 1e-4));
        assert!(reading.construction().is_none());
    }

    #[test]
    fn test_construction_hit_keeps_far_point() {
        let scene = StaticScene::new().with_construction(
            Vec3::new(-1.0, 0.0, 4.0),
            Vec3::new(1.0, 2.0, 5.0),
            ConstructionId(2),
        );
        let mut sensor = CursorSensor::new(SensorConfig::default());
        let reading = *sensor.probe(&camera_looking_down_z(), &GridSpace::default(), &scene);
        assert_eq!(reading.construction(), Some(ConstructionId(2)));
        assert!(reading.point.abs_diff_eq(Vec3::new(0.0, 1.0, 8.0), 1e-5));
    }

    #[test]
    fn test_step_fixed_interval() {
        let mut sensor = CursorSensor::new(SensorConfig::default());
        let grid = GridSpace::default();
        let scene = StaticScene::new();
        let camera = camera_looking_down_z();
        assert_eq!(sensor.step(0.01, &camera, &grid, &scene), 0);
        assert_eq!(sensor.step(0.015, &camera, &grid, &scene), 1);
        assert_eq!(sensor.step(0.05, &camera, &grid, &scene), 2);
    }
}
