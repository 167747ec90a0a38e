//! Areas Module
//!
//! The themed areas reachable through portals and the loader that mounts them.

pub mod catalog;

pub use catalog::{AreaCatalog, AreaDefinition, DEFAULT_SPAWN, WORLD_SIZE, default_areas};
