//! Portal Module
//!
//! Selecting a nearby portal and flying the camera into it.
//!
//! - [`PortalProximity`] - nearest portal within the interaction radius
//! - [`PortalTransition`] - single-flight commit / interpolate / complete machine

pub mod proximity;
pub mod transition;

pub use proximity::{EntryPolicy, INTERACTION_RADIUS, PortalProximity, PortalSelection, prompt_text};
pub use transition::{
    PortalTransition, TRANSITION_DURATION, TransitionPhase, TransitionSnapshot, TransitionStep,
};
