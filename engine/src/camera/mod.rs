//! Camera Module
//!
//! Third-person orbit camera driven by mouse deltas. Window-system agnostic:
//! it only deals with camera state and math, cursor capture is reported as
//! state for the host to apply.

pub mod orbit;

pub use orbit::{
    CameraConfig, CameraLookState, CameraPose, OrbitCamera, OrbitMode, clamp_rotation_around_x_axis,
};
