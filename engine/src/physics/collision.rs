//! Collision primitives
//!
//! Ray-AABB intersection (slab method) and AABB face normals. These back the
//! [`StaticScene`](super::scene::StaticScene) probes; hosts with their own
//! physics only need the [`SceneQuery`](super::query::SceneQuery) trait.
//!
//! # Example
//!
//! ```ignore
//! use build_royale_engine::physics::collision::ray_aabb_intersect;
//! use glam::Vec3;
//!
//! let origin = Vec3::new(0.0, 0.0, -5.0);
//! if let Some(t) = ray_aabb_intersect(origin, Vec3::Z, Vec3::splat(-1.0), Vec3::ONE) {
//!     let hit_point = origin + Vec3::Z * t;
//! }
//! ```

use glam::Vec3;

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Build from two corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Distance along the ray to this box, see [`ray_aabb_intersect`].
    pub fn ray_distance(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        ray_aabb_intersect(origin, direction, self.min, self.max)
    }

    pub fn surface_normal(&self, point: Vec3) -> Vec3 {
        aabb_surface_normal(point, self.min, self.max)
    }
}

/// Ray-AABB intersection using the slab method.
///
/// Entry and exit times are computed per axis pair of planes; the ray hits
/// when the latest entry precedes the earliest exit and the exit lies ahead.
///
/// # Returns
///
/// * `Some(t)` - distance along `ray_dir` to the nearest intersection (t >= 0).
///   A ray starting inside the box reports its exit distance.
/// * `None` - no intersection, or the box is behind the origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero components get a huge inverse instead of a division by zero
    let inv = |d: f32| if d.abs() > 1e-10 { 1.0 / d } else { f32::MAX * d.signum() };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_enter = t1.min(t2).max_element();
    let t_exit = t1.max(t2).min_element();

    if t_exit >= t_enter && t_exit >= 0.0 {
        if t_enter >= 0.0 {
            Some(t_enter)
        } else {
            Some(t_exit)
        }
    } else {
        None
    }
}

/// Outward normal of the AABB face closest to `point`.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(f32::EPSILON));
    let normalized = (point - center) / half_extents;
    let abs = normalized.abs();

    if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs.y >= abs.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::ONE)
    }

    #[test]
    fn test_ray_hits_from_front() {
        let t = unit_box().ray_distance(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let t = t.expect("ray should hit");
        assert!((t - 4.0).abs() < 0.001, "Expected t=4.0, got t={}", t);
    }

    #[test]
    fn test_ray_misses() {
        assert!(unit_box().ray_distance(Vec3::new(0.0, 5.0, -5.0), Vec3::Z).is_none());
    }

    #[test]
    fn test_ray_starts_inside() {
        let t = unit_box().ray_distance(Vec3::ZERO, Vec3::Z).expect("inside hit");
        assert!((t - 1.0).abs() < 0.001, "Expected t=1.0, got t={}", t);
    }

    #[test]
    fn test_box_behind_origin() {
        assert!(unit_box().ray_distance(Vec3::new(0.0, 0.0, 5.0), Vec3::Z).is_none());
    }

    #[test]
    fn test_axis_parallel_ray() {
        // Pure -Y ray grazing nothing on X/Z
        let t = unit_box().ray_distance(Vec3::new(0.5, 10.0, 0.5), Vec3::NEG_Y);
        assert!((t.expect("downward hit") - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_surface_normals() {
        let b = unit_box();
        assert_eq!(b.surface_normal(Vec3::new(1.0, 0.0, 0.0)), Vec3::X);
        assert_eq!(b.surface_normal(Vec3::new(0.0, -1.0, 0.0)), Vec3::NEG_Y);
        assert_eq!(b.surface_normal(Vec3::new(0.2, 0.1, 1.0)), Vec3::Z);
    }

    #[test]
    fn test_new_orders_corners() {
        let b = Aabb::new(Vec3::ONE, Vec3::splat(-1.0));
        assert_eq!(b.min, Vec3::splat(-1.0));
        assert_eq!(b.max, Vec3::ONE);
        assert_eq!(b.center(), Vec3::ZERO);
    }
}
