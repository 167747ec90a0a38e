//! Animation Selector
//!
//! Maps the avatar's [`LocomotionState`] to a clip and drives timed
//! cross-fades on a [`ClipMixer`]. Data flows one way: the selector reads
//! locomotion output and never feeds anything back into it.
//!
//! Rules:
//! - A state change fades the old clip out and the new one in over the same
//!   blend window.
//! - Requests made while a blend is running are coalesced: only the latest
//!   one is faded to once the blend ends.
//! - A missing clip falls back to idle; a missing idle means silence.
//! - A clip that becomes available later replaces its fallback on the next
//!   idle (non-blending) update.

use serde::{Deserialize, Serialize};

use super::clip::{ClipHandle, ClipMixer, ClipNames, ClipSource, LoopMode, loop_mode_for};
use crate::player::LocomotionState;

/// Cross-fade window in seconds
pub const BLEND_SECONDS: f32 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Cross-fade window (s)
    pub blend_seconds: f32,
    pub clips: ClipNames,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            blend_seconds: BLEND_SECONDS,
            clips: ClipNames::default(),
        }
    }
}

/// Timing of an in-progress cross-fade.
#[derive(Debug, Clone, PartialEq)]
struct Blend {
    elapsed: f32,
    duration: f32,
    outgoing: Option<ClipHandle>,
}

impl Blend {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

/// Locomotion-to-clip selector with cross-fade bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct AnimationSelector {
    config: AnimationConfig,
    /// Most recent requested state
    requested: LocomotionState,
    /// Clip currently faded in (or fading in)
    current: Option<ClipHandle>,
    blend: Option<Blend>,
}

impl AnimationSelector {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Record the state the avatar is in. Overwrites any earlier request not yet acted on.
    pub fn request(&mut self, state: LocomotionState) {
        self.requested = state;
    }

    pub fn requested(&self) -> LocomotionState {
        self.requested
    }

    pub fn current_clip(&self) -> Option<&ClipHandle> {
        self.current.as_ref()
    }

    pub fn is_blending(&self) -> bool {
        self.blend.is_some()
    }

    /// Blend weights `(outgoing, incoming)`. `(0.0, 1.0)` when no blend is running.
    pub fn weights(&self) -> (f32, f32) {
        match &self.blend {
            Some(blend) => {
                let p = blend.progress();
                (1.0 - p, p)
            }
            None => (0.0, 1.0),
        }
    }

    /// Advance the blend timer and start the next cross-fade if one is due.
    pub fn update(&mut self, dt: f32, clips: &mut dyn ClipSource, mixer: &mut dyn ClipMixer) {
        if let Some(blend) = &mut self.blend {
            blend.elapsed += dt.max(0.0);
            if blend.progress() < 1.0 {
                return;
            }
            self.blend = None;
        }

        match self.resolve(clips) {
            Some((incoming, mode)) => {
                if self.current.as_ref().map(|c| c.name.as_str()) == Some(incoming.name.as_str()) {
                    return;
                }
                log::debug!(
                    "crossfade {} -> {} ({:.2}s)",
                    self.current.as_ref().map_or("<none>", |c| c.name.as_str()),
                    incoming.name,
                    self.config.blend_seconds
                );
                mixer.play_crossfade(self.current.as_ref(), &incoming, self.config.blend_seconds, mode);
                self.start_blend(Some(incoming));
            }
            None => {
                if let Some(outgoing) = &self.current {
                    log::warn!(
                        "no clip for `{}` and no idle fallback, fading out {}",
                        self.requested,
                        outgoing.name
                    );
                    mixer.fade_out(outgoing, self.config.blend_seconds);
                    self.start_blend(None);
                }
            }
        }
    }

    fn start_blend(&mut self, incoming: Option<ClipHandle>) {
        let outgoing = std::mem::replace(&mut self.current, incoming);
        self.blend = Some(Blend {
            elapsed: 0.0,
            duration: self.config.blend_seconds,
            outgoing,
        });
    }

    /// The clip for the requested state, else idle, else nothing.
    fn resolve(&self, clips: &mut dyn ClipSource) -> Option<(ClipHandle, LoopMode)> {
        let name = self.config.clips.name_for(self.requested);
        if let Some(handle) = clips.get_clip(name) {
            return Some((handle, loop_mode_for(self.requested)));
        }
        if self.requested != LocomotionState::Idle {
            let idle = self.config.clips.name_for(LocomotionState::Idle);
            if let Some(handle) = clips.get_clip(idle) {
                return Some((handle, LoopMode::Loop));
            }
        }
        None
    }

    /// Clip fading out during the current blend, if any.
    pub fn outgoing_clip(&self) -> Option<&ClipHandle> {
        self.blend.as_ref().and_then(|b| b.outgoing.as_ref())
    }
}
