//! Scene Module
//!
//! High-level scene compositions that wire together all game systems.

pub mod exploration_scene;

pub use exploration_scene::{ExplorationScene, FrameContext, FrameReport};
