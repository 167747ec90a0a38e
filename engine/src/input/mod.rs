//! Input Module
//!
//! Produces the per-frame control snapshot consumed by the gameplay core.
//! This module is decoupled from any specific windowing system (like winit)
//! to allow for flexible integration.
//!
//! # Example
//!
//! ```rust,ignore
//! use portal_city_engine::input::{ControlSource, KeyboardControls, KeyCode};
//!
//! let mut keyboard = KeyboardControls::new();
//! keyboard.handle_key(KeyCode::W, true); // W pressed
//!
//! let controls = keyboard.control_state();
//! if controls.forward {
//!     // Move forward
//! }
//! ```

pub mod bindings;
pub mod control;
pub mod keyboard;

pub use bindings::{ControlAction, KeyBindings};
pub use control::{ControlSource, ControlState, ScriptedControls, ScriptedSegment};
pub use keyboard::{KeyCode, KeyboardControls};
