//! Player Module
//!
//! Character locomotion for a root-motion animated third-person character.
//!
//! # Components
//!
//! - [`LocomotionController`] - Grounded/airborne update, speed blending, jump and crouch
//!   - Collider reshaping, five-probe ground distance, wall guard, ceiling contact
//! - [`ColliderShape`] / [`Stance`] - Capsule shape per stance
//! - [`PoseSink`] / [`PoseFrame`] - Animation parameter output

pub mod locomotion;
pub mod pose;
pub mod stance;

pub use locomotion::{
    BodyMarkers, CharacterFrame, GRAVITY, LocomotionConfig, LocomotionController, LocomotionOutput,
    LocomotionState, flat_forward, flat_right,
};
pub use pose::{PoseFrame, PoseParam, PoseSink};
pub use stance::{CROUCH_HEIGHT, ColliderShape, STANDING_HEIGHT, Stance};
