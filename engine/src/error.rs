//! Gameplay error taxonomy.
//!
//! Only configuration and programmer errors surface as `Err`. Occupied slots are an
//! expected outcome of aiming a build and most callers use the `bool` form
//! (`ConstructionRegistry::try_place`) instead.

use glam::Vec3;

use crate::modes::ModeKind;

/// Errors produced by the gameplay core.
#[derive(Debug)]
pub enum GameplayError {
    /// Grid address outside 0..=14.
    InvalidAddress(u8),
    /// A construction already occupies this (start, end) span.
    SlotOccupied { start: Vec3, end: Vec3 },
    /// A transition targeted a mode with no registered handler.
    ModeNotRegistered(ModeKind),
    /// Tuning values that cannot be used.
    Config(String),
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON serialization/deserialization error.
    Json(serde_json::Error),
}

impl std::fmt::Display for GameplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameplayError::InvalidAddress(a) => {
                write!(f, "invalid grid address {a} (expected 0..=14)")
            }
            GameplayError::SlotOccupied { start, end } => {
                write!(f, "slot occupied: span {start} -> {end}")
            }
            GameplayError::ModeNotRegistered(kind) => {
                write!(f, "mode {kind:?} is not registered")
            }
            GameplayError::Config(msg) => write!(f, "config error: {msg}"),
            GameplayError::Io(e) => write!(f, "IO error: {e}"),
            GameplayError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for GameplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameplayError::Io(e) => Some(e),
            GameplayError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameplayError {
    fn from(e: std::io::Error) -> Self {
        GameplayError::Io(e)
    }
}

impl From<serde_json::Error> for GameplayError {
    fn from(e: serde_json::Error) -> Self {
        GameplayError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GameplayError::InvalidAddress(15).to_string(),
            "invalid grid address 15 (expected 0..=14)"
        );
        assert_eq!(
            GameplayError::ModeNotRegistered(ModeKind::Edit).to_string(),
            "mode Edit is not registered"
        );
    }

    #[test]
    fn test_json_error_has_source() {
        let err: GameplayError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
