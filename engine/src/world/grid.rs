//! Grid Space Module
//!
//! Lattice math for construction placement.
//!
//! Every cell of the lattice is addressed by its minimum corner (the "cell origin")
//! and exposes 15 semantic points:
//!
//! ```text
//!  address  point                  address  point
//!  0        (0,  0,  0 )           8        bottom face  (sx/2, 0,    sz/2)
//!  1        (sx, 0,  0 )           9        -Z face      (sx/2, sy/2, 0   )
//!  2        (sx, 0,  sz)           10       +X face      (sx,   sy/2, sz/2)
//!  3        (0,  0,  sz)           11       +Z face      (sx/2, sy/2, sz  )
//!  4..7     same ring at y = sy    12       -X face      (0,    sy/2, sz/2)
//!                                  13       top face     (sx/2, sy,   sz/2)
//!                                  14       cell center  (sx/2, sy/2, sz/2)
//! ```
//!
//! Build mode picks its anchor points through these addresses, so the table is a
//! contract shared with [`crate::modes::build`].

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::GameplayError;

/// Default cell size of the construction lattice (meters).
pub const DEFAULT_CELL_SIZE: Vec3 = Vec3::new(11.43, 8.91, 11.43);

/// Number of semantic points per cell.
pub const ADDRESS_COUNT: u8 = 15;

static_assertions::const_assert_eq!(ADDRESS_COUNT, 8 + 6 + 1);

/// One of the 15 semantic points of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GridAddress(u8);

impl GridAddress {
    pub const BOTTOM_FACE: GridAddress = GridAddress(8);
    pub const NEG_Z_FACE: GridAddress = GridAddress(9);
    pub const POS_X_FACE: GridAddress = GridAddress(10);
    pub const POS_Z_FACE: GridAddress = GridAddress(11);
    pub const NEG_X_FACE: GridAddress = GridAddress(12);
    pub const TOP_FACE: GridAddress = GridAddress(13);
    pub const CENTER: GridAddress = GridAddress(14);

    /// Validate a raw address. Out-of-range values are rejected, never clamped.
    pub fn new(index: u8) -> Result<Self, GameplayError> {
        if index < ADDRESS_COUNT {
            Ok(Self(index))
        } else {
            Err(GameplayError::InvalidAddress(index))
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn is_vertex(self) -> bool {
        self.0 < 8
    }

    pub fn is_face_center(self) -> bool {
        (8..14).contains(&self.0)
    }

    /// All 15 addresses in index order.
    pub fn all() -> impl Iterator<Item = GridAddress> {
        (0..ADDRESS_COUNT).map(GridAddress)
    }

    /// Position inside the cell in half-cell units, each axis in 0..=2.
    pub fn half_steps(self) -> IVec3 {
        match self.0 {
            0..=7 => {
                let a = self.0;
                let ring = a % 4;
                let x = if ring > 0 && ring < 3 { 2 } else { 0 };
                let y = if a >= 4 { 2 } else { 0 };
                let z = if ring > 1 { 2 } else { 0 };
                IVec3::new(x, y, z)
            }
            8 => IVec3::new(1, 0, 1),
            9 => IVec3::new(1, 1, 0),
            10 => IVec3::new(2, 1, 1),
            11 => IVec3::new(1, 1, 2),
            12 => IVec3::new(0, 1, 1),
            13 => IVec3::new(1, 2, 1),
            _ => IVec3::ONE,
        }
    }

    /// Offset from the cell origin for a given cell size.
    pub fn offset(self, cell: Vec3) -> Vec3 {
        self.half_steps().as_vec3() * (cell * 0.5)
    }
}

impl TryFrom<u8> for GridAddress {
    type Error = GameplayError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        GridAddress::new(value)
    }
}

impl From<GridAddress> for u8 {
    fn from(address: GridAddress) -> Self {
        address.0
    }
}

/// Grid configuration as read from tuning files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Size of one lattice cell (sx, sy, sz)
    pub cell_size: Vec3,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), GameplayError> {
        let c = self.cell_size;
        if !(c.is_finite() && c.min_element() > 0.0) {
            return Err(GameplayError::Config(format!(
                "cell size must be finite and positive, got {c}"
            )));
        }
        Ok(())
    }
}

/// The construction lattice. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpace {
    cell: Vec3,
}

impl Default for GridSpace {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl GridSpace {
    pub fn new(cell: Vec3) -> Self {
        Self { cell }
    }

    pub fn from_config(config: &GridConfig) -> Result<Self, GameplayError> {
        config.validate()?;
        Ok(Self::new(config.cell_size))
    }

    pub fn cell_size(&self) -> Vec3 {
        self.cell
    }

    /// Integer index of the cell containing `position`.
    ///
    /// The division can land one ulp short of an integer for points exactly on
    /// a lattice line, so the index is corrected until
    /// `cell_origin(k) <= position < cell_origin(k + 1)` holds per axis.
    pub fn cell_index(&self, position: Vec3) -> IVec3 {
        let axis = |p: f32, s: f32| -> i32 {
            let mut k = (p / s).floor() as i32;
            if ((k + 1) as f32) * s <= p {
                k += 1;
            } else if (k as f32) * s > p {
                k -= 1;
            }
            k
        };
        IVec3::new(
            axis(position.x, self.cell.x),
            axis(position.y, self.cell.y),
            axis(position.z, self.cell.z),
        )
    }

    /// Minimum corner of the cell with the given index.
    pub fn cell_origin(&self, index: IVec3) -> Vec3 {
        index.as_vec3() * self.cell
    }

    /// Snap a position to the minimum corner of its cell.
    ///
    /// Goes through the integer cell index so every position inside one cell
    /// yields a bit-identical origin.
    pub fn snap(&self, position: Vec3) -> Vec3 {
        self.cell_origin(self.cell_index(position))
    }

    /// World position of `address` in the cell with the given index.
    ///
    /// Computed in half-cell units with one multiply per axis, so a face shared
    /// by two neighbouring cells yields the same point from either side.
    pub fn point_in_cell(&self, index: IVec3, address: GridAddress) -> Vec3 {
        (index * 2 + address.half_steps()).as_vec3() * (self.cell * 0.5)
    }

    /// World position of `address` in the cell whose origin is `cell_origin`.
    pub fn point_for_address(&self, cell_origin: Vec3, address: GridAddress) -> Vec3 {
        self.point_in_cell(self.cell_index(cell_origin), address)
    }

    /// Same as [`Self::point_for_address`] for an unchecked raw index.
    pub fn point_for_index(&self, cell_origin: Vec3, index: u8) -> Result<Vec3, GameplayError> {
        Ok(self.point_for_address(cell_origin, GridAddress::new(index)?))
    }

    /// Snap `position` and return the addressed point of its cell.
    pub fn align(&self, position: Vec3, address: GridAddress) -> Vec3 {
        self.point_in_cell(self.cell_index(position), address)
    }

    /// Round each axis to the nearest lattice line.
    pub fn nearest_lattice_point(&self, position: Vec3) -> Vec3 {
        (position / self.cell).round() * self.cell
    }
}
