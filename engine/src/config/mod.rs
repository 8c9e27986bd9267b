//! Config Module
//!
//! Serde-backed tuning for every gameplay component.

pub mod gameplay_config;

pub use gameplay_config::GameplayConfig;
