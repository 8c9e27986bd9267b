//! Building Module
//!
//! Committed constructions, the span registry and construction templates.

pub mod construction;
pub mod factory;
pub mod registry;

pub use construction::{Construction, ConstructionId, ConstructionKind};
pub use factory::{ConstructionFactory, ConstructionTemplate, DefaultFactory};
pub use registry::{ConstructionRegistry, SharedRegistry};
