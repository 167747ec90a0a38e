//! Portal transition state machine
//!
//! `Idle -> Committed -> Interpolating -> Complete -> Idle`
//!
//! Committing captures everything the transition needs (destination, label,
//! camera endpoints, start time) so a portal that is unmounted mid-flight
//! cannot affect it. While the phase is anything but `Idle`, further
//! triggers are ignored.

use glam::Vec3;

use crate::camera::{CameraTransform, ease_in_out};
use crate::world::{AreaId, Portal, PortalId};

/// Camera flight duration in seconds
pub const TRANSITION_DURATION: f32 = 1.0;

/// How far past the portal the arrival camera looks (m)
const LOOK_THROUGH_DISTANCE: f32 = 5.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Committed,
    Interpolating,
    Complete,
}

/// Data captured when a transition is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSnapshot {
    pub portal_id: PortalId,
    pub destination: AreaId,
    pub label: String,
    /// Session time of the commit (s)
    pub start_time: f64,
    pub duration: f32,
    pub source: CameraTransform,
    pub target: CameraTransform,
}

impl TransitionSnapshot {
    /// Linear progress at `now`, clamped to `[0, 1]`.
    pub fn progress_at(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (((now - self.start_time) / self.duration as f64) as f32).clamp(0.0, 1.0)
    }

    /// Eased camera transform at `now`.
    pub fn camera_at(&self, now: f64) -> CameraTransform {
        let eased = ease_in_out(self.progress_at(now));
        self.source.interpolate(&self.target, eased)
    }
}

/// Result of one [`PortalTransition::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionStep {
    /// Nothing in flight; the follow camera owns the view
    Inactive,
    /// Camera is flying toward the portal
    Flying { camera: CameraTransform, progress: f32 },
    /// Reached the portal. Reported exactly once per transition.
    Completed {
        camera: CameraTransform,
        destination: AreaId,
        portal: PortalId,
    },
    /// Complete but not yet reset; camera rests on the target
    Holding { camera: CameraTransform },
}

impl TransitionStep {
    /// Camera override for this frame, if the transition owns the camera.
    pub fn camera(&self) -> Option<CameraTransform> {
        match self {
            TransitionStep::Inactive => None,
            TransitionStep::Flying { camera, .. }
            | TransitionStep::Completed { camera, .. }
            | TransitionStep::Holding { camera } => Some(*camera),
        }
    }
}

/// Single-flight portal transition.
#[derive(Debug, Clone)]
pub struct PortalTransition {
    duration: f32,
    phase: TransitionPhase,
    snapshot: Option<TransitionSnapshot>,
}

impl Default for PortalTransition {
    fn default() -> Self {
        Self::new(TRANSITION_DURATION)
    }
}

impl PortalTransition {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            phase: TransitionPhase::Idle,
            snapshot: None,
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn snapshot(&self) -> Option<&TransitionSnapshot> {
        self.snapshot.as_ref()
    }

    /// True from commit until [`finish`](Self::finish).
    pub fn in_flight(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    /// Start entering `portal`. Ignored (returns `false`) unless idle.
    pub fn try_commit(&mut self, portal: &Portal, camera: &CameraTransform, now: f64) -> bool {
        if self.phase != TransitionPhase::Idle {
            log::debug!(
                "ignoring trigger for portal {}: transition already {:?}",
                portal.id,
                self.phase
            );
            return false;
        }

        log::info!(
            "entering portal {} -> {} ({})",
            portal.id,
            portal.destination_area,
            portal.label
        );

        self.snapshot = Some(TransitionSnapshot {
            portal_id: portal.id.clone(),
            destination: portal.destination_area.clone(),
            label: portal.label.clone(),
            start_time: now,
            duration: self.duration,
            source: *camera,
            target: arrival_camera(portal.position, camera),
        });
        self.phase = TransitionPhase::Committed;
        true
    }

    /// Move the flight forward to `now`.
    pub fn advance(&mut self, now: f64) -> TransitionStep {
        let Some(snapshot) = &self.snapshot else {
            return TransitionStep::Inactive;
        };

        match self.phase {
            TransitionPhase::Idle => TransitionStep::Inactive,
            TransitionPhase::Committed | TransitionPhase::Interpolating => {
                let progress = snapshot.progress_at(now);
                let camera = snapshot.camera_at(now);
                if progress >= 1.0 {
                    self.phase = TransitionPhase::Complete;
                    TransitionStep::Completed {
                        camera,
                        destination: snapshot.destination.clone(),
                        portal: snapshot.portal_id.clone(),
                    }
                } else {
                    self.phase = TransitionPhase::Interpolating;
                    TransitionStep::Flying { camera, progress }
                }
            }
            TransitionPhase::Complete => TransitionStep::Holding {
                camera: snapshot.target,
            },
        }
    }

    /// Clear the guard after the area swap. Returns the finished snapshot.
    pub fn finish(&mut self) -> Option<TransitionSnapshot> {
        self.phase = TransitionPhase::Idle;
        self.snapshot.take()
    }
}

/// Camera placed at the portal, looking through it along the current view heading.
fn arrival_camera(portal_position: Vec3, camera: &CameraTransform) -> CameraTransform {
    let view = camera.forward();
    let heading = Vec3::new(view.x, 0.0, view.z)
        .try_normalize()
        .or_else(|| {
            let to_portal = portal_position - camera.position;
            Vec3::new(to_portal.x, 0.0, to_portal.z).try_normalize()
        })
        .unwrap_or(Vec3::NEG_Z);

    CameraTransform::looking_at(
        portal_position,
        portal_position + heading * LOOK_THROUGH_DISTANCE,
    )
}
