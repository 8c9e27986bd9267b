//! World Module
//!
//! World-space lattice used by the construction system.

pub mod grid;

pub use grid::{ADDRESS_COUNT, DEFAULT_CELL_SIZE, GridAddress, GridConfig, GridSpace};
