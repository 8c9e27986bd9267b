//! Physics module
//!
//! Scene probing for the gameplay core. The core asks questions, it never
//! simulates rigid bodies: a host physics engine (or [`StaticScene`] in
//! tests and the harness) answers through [`SceneQuery`].
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, velocities in m/s, angles in degrees at the API.
//!
//! # Submodules
//!
//! - [`collision`] - Ray-AABB slab test and face normals
//! - [`query`] - `SceneQuery`, `RayHit`, `GroundContact`
//! - [`scene`] - Ground plane plus boxes implementation

pub mod collision;
pub mod query;
pub mod scene;

pub use collision::{Aabb, aabb_surface_normal, ray_aabb_intersect};
pub use query::{GroundContact, RayHit, SceneQuery};
pub use scene::{SceneBox, StaticScene};
