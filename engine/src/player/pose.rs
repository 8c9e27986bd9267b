//! Animation pose output
//!
//! The locomotion controller drives an animation collaborator through a small
//! named-parameter interface. [`PoseFrame`] records the last values and is what
//! the simulation hands back to hosts.

use serde::{Deserialize, Serialize};

/// Named animation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoseParam {
    ForwardSpeed,
    SideSpeed,
    DistanceFromGround,
    Crouching,
    Jump,
}

impl PoseParam {
    /// Parameter name as exposed to animation graphs.
    pub fn name(&self) -> &'static str {
        match self {
            PoseParam::ForwardSpeed => "forwardSpeed",
            PoseParam::SideSpeed => "sideSpeed",
            PoseParam::DistanceFromGround => "distanceFromGround",
            PoseParam::Crouching => "Crouching",
            PoseParam::Jump => "Jump",
        }
    }
}

/// Receiver of per-tick pose parameters.
pub trait PoseSink {
    fn set_float(&mut self, param: PoseParam, value: f32);
    fn set_bool(&mut self, param: PoseParam, value: bool);
}

/// Recorded pose parameters for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    pub forward_speed: f32,
    pub side_speed: f32,
    pub distance_from_ground: f32,
    pub crouching: bool,
    pub jump: bool,
}

impl PoseSink for PoseFrame {
    fn set_float(&mut self, param: PoseParam, value: f32) {
        match param {
            PoseParam::ForwardSpeed => self.forward_speed = value,
            PoseParam::SideSpeed => self.side_speed = value,
            PoseParam::DistanceFromGround => self.distance_from_ground = value,
            PoseParam::Crouching | PoseParam::Jump => {
                log::warn!("[Pose] {} is a bool parameter, float ignored", param.name());
            }
        }
    }

    fn set_bool(&mut self, param: PoseParam, value: bool) {
        match param {
            PoseParam::Crouching => self.crouching = value,
            PoseParam::Jump => self.jump = value,
            _ => log::warn!("[Pose] {} is a float parameter, bool ignored", param.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_records_values() {
        let mut frame = PoseFrame::default();
        frame.set_float(PoseParam::ForwardSpeed, 1.5);
        frame.set_float(PoseParam::DistanceFromGround, 0.25);
        frame.set_bool(PoseParam::Jump, true);
        assert_eq!(frame.forward_speed, 1.5);
        assert_eq!(frame.distance_from_ground, 0.25);
        assert!(frame.jump);
    }

    #[test]
    fn test_mismatched_kind_is_ignored() {
        let mut frame = PoseFrame::default();
        frame.set_float(PoseParam::Crouching, 1.0);
        frame.set_bool(PoseParam::SideSpeed, true);
        assert_eq!(frame, PoseFrame::default());
    }
}
