//! Animation Module
//!
//! Chooses which locomotion clip plays and when to cross-fade, on top of an
//! external mixer that owns the actual skeletal blending.
//!
//! - [`AnimationSelector`] - state-to-clip mapping, blend timing, fallbacks
//! - [`ClipCache`] - single asynchronous clip cache keyed by name, loaded on a worker thread
//! - [`ClipSource`] / [`ClipMixer`] - the collaborator seams

pub mod clip;
pub mod clip_cache;
pub mod selector;

pub use clip::{ClipHandle, ClipMixer, ClipNames, ClipSource, LoopMode, loop_mode_for};
pub use clip_cache::{ClipCache, ClipData, ClipLoadError, ClipLoader, ClipStatus, StaticClipLoader};
pub use selector::{AnimationConfig, AnimationSelector, BLEND_SECONDS};
