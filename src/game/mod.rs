//! Game Module
//!
//! Contains game-specific systems that build on top of the engine.

pub mod areas;
pub mod config;
pub mod portal;
pub mod scenes;

pub use areas::{AreaCatalog, AreaDefinition, default_areas};
pub use config::{ConfigError, PortalConfig, SessionConfig};
pub use portal::{
    EntryPolicy, PortalProximity, PortalSelection, PortalTransition, TransitionPhase, TransitionStep,
    prompt_text,
};
pub use scenes::{ExplorationScene, FrameContext, FrameReport};
