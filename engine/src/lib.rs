//! Build Royale Engine Library
//!
//! Deterministic gameplay core for a third-person build/shoot game: character
//! locomotion, an orbit camera, a Weapon/Build/Edit mode machine and a grid-based
//! construction system. Rendering, animation playback, device polling and physics
//! queries are collaborators behind small traits.
//!
//! # Modules
//!
//! - [`world`] - Grid lattice math (cell snapping, 15-point cell addressing)
//! - [`building`] - Constructions, the placement registry and the template factory
//! - [`player`] - Locomotion controller and animation pose output
//! - [`camera`] - Third-person orbit camera with clamped pitch
//! - [`modes`] - Weapon/Build/Edit mode machine and per-mode logic
//! - [`input`] - Input snapshots, key bindings and cursor lock
//! - [`physics`] - Scene query trait and a static box/plane scene
//! - [`sensor`] - Fixed-interval cursor sensor
//! - [`simulation`] - The owned per-tick simulation loop
//! - [`config`] - Serde-backed tuning for every component
//!
//! # Example
//!
//! ```ignore
//! use build_royale_engine::config::GameplayConfig;
//! use build_royale_engine::simulation::{CharacterFrame, Simulation};
//! use build_royale_engine::input::InputSnapshot;
//! use build_royale_engine::physics::StaticScene;
//!
//! let mut sim = Simulation::new(GameplayConfig::default())?;
//! let scene = StaticScene::flat(0.0);
//! let input = InputSnapshot::new().with_axes(1.0, 0.0);
//! let frame = CharacterFrame::standing_at(glam::Vec3::ZERO, 1.8);
//!
//! let out = sim.tick(1.0 / 60.0, &input, &frame, &scene);
//! host_physics.move_character(out.move_delta);
//! ```

pub mod building;
pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod modes;
pub mod physics;
pub mod player;
pub mod sensor;
pub mod simulation;
pub mod world;

pub use building::{
    Construction, ConstructionId, ConstructionKind, ConstructionRegistry, SharedRegistry,
};
pub use camera::{CameraPose, OrbitCamera};
pub use config::GameplayConfig;
pub use error::GameplayError;
pub use input::{InputAction, InputSnapshot};
pub use modes::{ModeKind, ModeMachine};
pub use player::LocomotionController;
pub use simulation::{CharacterFrame, Simulation, TickOutput};
pub use world::{GridAddress, GridSpace};
