//! Constructions
//!
//! A committed wall, floor or stair piece identified by its span on the lattice.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Kind of construction piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructionKind {
    Wall,
    Floor,
    Stairs,
}

impl ConstructionKind {
    pub const ALL: [ConstructionKind; 3] = [
        ConstructionKind::Wall,
        ConstructionKind::Floor,
        ConstructionKind::Stairs,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConstructionKind::Wall => "Wall",
            ConstructionKind::Floor => "Floor",
            ConstructionKind::Stairs => "Stairs",
        }
    }
}

impl Default for ConstructionKind {
    fn default() -> Self {
        ConstructionKind::Wall
    }
}

/// Opaque identity of a spawned construction, handed out by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConstructionId(pub u64);

impl std::fmt::Display for ConstructionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed construction.
///
/// The (start_point, end_point) pair is the construction's span and is unique
/// across a registry. `yaw_degrees` travels along for spawning and is not part of
/// the span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Construction {
    pub id: ConstructionId,
    pub kind: ConstructionKind,
    pub start_point: Vec3,
    pub end_point: Vec3,
    /// Orientation snapped to a multiple of 90 degrees
    pub yaw_degrees: f32,
}

impl Construction {
    pub fn new(
        id: ConstructionId,
        kind: ConstructionKind,
        start_point: Vec3,
        end_point: Vec3,
    ) -> Self {
        Self {
            id,
            kind,
            start_point,
            end_point,
            yaw_degrees: 0.0,
        }
    }

    /// A construction anchored at a single grid point (start == end).
    pub fn at_point(
        id: ConstructionId,
        kind: ConstructionKind,
        point: Vec3,
        yaw_degrees: f32,
    ) -> Self {
        Self {
            id,
            kind,
            start_point: point,
            end_point: point,
            yaw_degrees,
        }
    }

    /// Exact span equality, no tolerance.
    pub fn same_span(&self, start: Vec3, end: Vec3) -> bool {
        self.start_point == start && self.end_point == end
    }

    pub fn is_degenerate(&self) -> bool {
        self.start_point == self.end_point
    }

    /// Point halfway along the span, where edit affordances are shown.
    ///
    /// Walks half the span length from the start along the normalized direction;
    /// a zero-length span falls back to the start point.
    pub fn anchor(&self) -> Vec3 {
        let delta = self.end_point - self.start_point;
        let direction = delta.normalize_or_zero();
        self.start_point + direction * (delta.length() / 2.0)
    }
}
