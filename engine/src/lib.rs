//! Portal City Engine Library
//!
//! Third-person exploration core: an avatar walks around a themed area, a
//! camera follows it, and portals fly the camera into another area.
//! Everything here is renderer-agnostic; a frame loop feeds in control
//! snapshots and gets back a camera transform and a frame report.
//!
//! # Modules
//!
//! - [`input`] - Per-frame control snapshot from keyboard or a script
//! - [`player`] - Avatar and locomotion controller
//! - [`physics`] - Downward ground probe
//! - [`camera`] - Follow camera and camera transform interpolation
//! - [`animation`] - Locomotion clip selection, cross-fades and the clip cache
//! - [`world`] - Areas, portals and the portal registry
//! - [`game`] - Session config, area catalog, portal transitions and the exploration scene
//!
//! # Example
//!
//! ```ignore
//! use portal_city_engine::game::{AreaCatalog, ExplorationScene, FrameContext, SessionConfig};
//! use portal_city_engine::animation::{ClipCache, StaticClipLoader};
//! use portal_city_engine::input::ControlState;
//!
//! let config = SessionConfig::default();
//! let mut areas = config.area_catalog();
//! let mut clips = ClipCache::spawn(StaticClipLoader::character_rig());
//! let mut scene = ExplorationScene::new(&config);
//! scene.start(&mut areas)?;
//!
//! let mut ctx = FrameContext { areas: &mut areas, clips: &mut clips, mixer: &mut my_mixer };
//! let report = scene.update(1.0 / 60.0, &ControlState::new().with_forward(), &mut ctx);
//! render(report.camera);
//! ```

pub mod animation;
pub mod camera;
pub mod input;
pub mod physics;
pub mod player;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types
pub use camera::{CameraTransform, FollowCamera};
pub use input::{ControlSource, ControlState, KeyCode, KeyboardControls};
pub use player::{Avatar, LocomotionController, LocomotionState, MovementMode};
pub use world::{AreaId, Portal, PortalId, PortalRegistry};
