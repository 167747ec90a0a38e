//! ExplorationScene — high-level composition of the exploration systems.
//!
//! Owns the avatar, locomotion, follow camera, animation selector, portal
//! registry and portal transition. Its [`update`](ExplorationScene::update)
//! method is the single entry point for the per-frame game logic; external
//! collaborators (area loader, clip source, mixer) are passed in through a
//! [`FrameContext`] every frame. **No renderer imports** — this module only
//! produces a camera transform and a report for whoever draws the frame.

use glam::Vec3;

use crate::animation::{AnimationSelector, ClipMixer, ClipSource};
use crate::camera::{CameraTransform, FollowCamera};
use crate::game::config::SessionConfig;
use crate::game::portal::{
    EntryPolicy, PortalProximity, PortalTransition, TransitionPhase, TransitionStep, prompt_text,
};
use crate::input::ControlState;
use crate::player::{Avatar, LocomotionController, LocomotionFrame, LocomotionState};
use crate::world::{AreaError, AreaId, AreaLoader, AreaSpawn, PortalId, PortalRegistry};

/// Collaborators borrowed for one frame.
pub struct FrameContext<'a> {
    pub areas: &'a mut dyn AreaLoader,
    pub clips: &'a mut dyn ClipSource,
    pub mixer: &'a mut dyn ClipMixer,
}

/// Observable outcome of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub locomotion_state: LocomotionState,
    pub locomotion: LocomotionFrame,
    /// Portal within interaction range this frame
    pub selected_portal: Option<PortalId>,
    /// UI affordance text ("Press E to enter ...")
    pub prompt: Option<String>,
    /// Transition phase at the end of the frame
    pub phase: TransitionPhase,
    /// Camera to render this frame with
    pub camera: CameraTransform,
    /// Portal committed this frame
    pub committed_portal: Option<PortalId>,
    /// Area that became active this frame
    pub completed_area: Option<AreaId>,
    /// Avatar fell out of the world and was put back this frame
    pub respawned: bool,
}

/// One player's exploration session.
pub struct ExplorationScene {
    avatar: Avatar,
    controller: LocomotionController,
    camera: FollowCamera,
    animation: AnimationSelector,
    portals: PortalRegistry,
    proximity: PortalProximity,
    transition: PortalTransition,
    entry_policy: EntryPolicy,
    start_area: AreaId,
    active_area: Option<AreaId>,
    /// Camera handed out last frame
    view: CameraTransform,
    /// Session time (s)
    clock: f64,
}

impl ExplorationScene {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            avatar: Avatar::default(),
            controller: LocomotionController::new(config.locomotion.clone(), config.movement_mode),
            camera: FollowCamera::new(config.camera.clone()),
            animation: AnimationSelector::new(config.animation.clone()),
            portals: PortalRegistry::new(),
            proximity: PortalProximity::new(config.portals.interaction_radius),
            transition: PortalTransition::new(config.portals.transition_duration),
            entry_policy: config.portals.entry_policy,
            start_area: config.start_area.clone(),
            active_area: None,
            view: CameraTransform::default(),
            clock: 0.0,
        }
    }

    /// Mount the start area and place the avatar at its spawn point.
    pub fn start(&mut self, areas: &mut dyn AreaLoader) -> Result<(), AreaError> {
        let area = self.start_area.clone();
        let spawn = areas.set_active_area(&area, &mut self.portals)?;
        self.arrive(area, spawn);
        Ok(())
    }

    /// Run one frame.
    ///
    /// Order: locomotion, animation, camera follow, proximity, trigger,
    /// transition advance, area swap on completion.
    pub fn update(&mut self, dt: f32, controls: &ControlState, ctx: &mut FrameContext<'_>) -> FrameReport {
        let dt = dt.max(0.0);
        self.clock += f64::from(dt);

        let locomotion = self.controller.update(
            &mut self.avatar,
            controls,
            dt,
            self.camera.yaw(),
            ctx.areas.ground(),
        );

        self.animation.request(self.avatar.locomotion_state);
        self.animation.update(dt, ctx.clips, ctx.mixer);

        // The transition owns the camera from the frame after commit until completion
        if !self.transition.in_flight() {
            self.view = self.camera.update(&self.avatar, dt);
        }

        let selection = self.proximity.update(&self.portals, self.avatar.position);

        let mut committed_portal = None;
        if let Some(selection) = &selection
            && self.entry_policy.should_enter(selection, controls)
            && self.transition.try_commit(&selection.portal, &self.view, self.clock)
        {
            committed_portal = Some(selection.portal.id.clone());
        }

        let mut completed_area = None;
        if committed_portal.is_none() {
            let step = self.transition.advance(self.clock);
            if let Some(camera) = step.camera() {
                self.view = camera;
            }
            if let TransitionStep::Completed { destination, .. } = step {
                completed_area = self.complete(destination, ctx.areas);
            }
        }

        FrameReport {
            locomotion_state: self.avatar.locomotion_state,
            locomotion,
            selected_portal: selection.as_ref().map(|s| s.portal.id.clone()),
            prompt: self.prompt(selection.as_ref().map(|s| s.portal.label.as_str())),
            phase: self.transition.phase(),
            camera: self.view,
            committed_portal,
            completed_area,
            respawned: locomotion.respawned,
        }
    }

    /// Swap areas at the end of a transition and release the guard.
    fn complete(&mut self, destination: AreaId, areas: &mut dyn AreaLoader) -> Option<AreaId> {
        let result = areas.set_active_area(&destination, &mut self.portals);
        self.transition.finish();

        match result {
            Ok(spawn) => {
                self.arrive(destination.clone(), spawn);
                Some(destination)
            }
            Err(err) => {
                log::error!("portal transition aborted: {err}");
                self.view = self.camera.transform();
                None
            }
        }
    }

    fn arrive(&mut self, area: AreaId, spawn: AreaSpawn) {
        self.controller.respawn(&mut self.avatar, spawn.position);
        self.avatar.facing_angle = spawn.facing_angle;
        self.view = self.camera.snap_to(&self.avatar);
        self.proximity.reset();
        log::info!(
            "arrived in {area} at ({:.1}, {:.1}, {:.1})",
            spawn.position.x,
            spawn.position.y,
            spawn.position.z
        );
        self.active_area = Some(area);
    }

    fn prompt(&self, selected_label: Option<&str>) -> Option<String> {
        if let Some(snapshot) = self.transition.snapshot() {
            return Some(prompt_text(self.entry_policy, &snapshot.label, true));
        }
        selected_label.map(|label| prompt_text(self.entry_policy, label, false))
    }

    /// Move the avatar without a transition and put the camera straight behind it.
    pub fn teleport(&mut self, position: Vec3) {
        self.controller.respawn(&mut self.avatar, position);
        self.view = self.camera.snap_to(&self.avatar);
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    /// Direct avatar access for teleports and fault injection.
    pub fn avatar_mut(&mut self) -> &mut Avatar {
        &mut self.avatar
    }

    pub fn controller(&self) -> &LocomotionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut LocomotionController {
        &mut self.controller
    }

    pub fn follow_camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn follow_camera_mut(&mut self) -> &mut FollowCamera {
        &mut self.camera
    }

    pub fn animation(&self) -> &AnimationSelector {
        &self.animation
    }

    pub fn portals(&self) -> &PortalRegistry {
        &self.portals
    }

    pub fn portals_mut(&mut self) -> &mut PortalRegistry {
        &mut self.portals
    }

    pub fn transition(&self) -> &PortalTransition {
        &self.transition
    }

    pub fn entry_policy(&self) -> EntryPolicy {
        self.entry_policy
    }

    pub fn set_entry_policy(&mut self, policy: EntryPolicy) {
        self.entry_policy = policy;
    }

    pub fn active_area(&self) -> Option<&AreaId> {
        self.active_area.as_ref()
    }

    pub fn camera(&self) -> CameraTransform {
        self.view
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }
}
