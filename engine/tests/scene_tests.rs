//! Scene Tests - Full Frame Loop Scenarios
//!
//! Runs the exploration scene against the default area catalog and in-memory
//! clip collaborators, checking frame ordering, portal entry and recovery.

use std::time::Duration;

use glam::Vec3;
use portal_city_engine::animation::{
    ClipCache, ClipHandle, ClipMixer, ClipSource, LoopMode, StaticClipLoader,
};
use portal_city_engine::game::portal::{EntryPolicy, TransitionPhase};
use portal_city_engine::game::{AreaCatalog, ExplorationScene, FrameContext, FrameReport, SessionConfig};
use portal_city_engine::input::ControlState;
use portal_city_engine::player::LocomotionState;
use portal_city_engine::world::{AreaId, Portal, PortalId};

const DT: f32 = 1.0 / 60.0;

/// Every clip is available immediately.
struct AllClips;

impl ClipSource for AllClips {
    fn get_clip(&mut self, name: &str) -> Option<ClipHandle> {
        Some(ClipHandle::new(1, name, 1.0))
    }
}

#[derive(Default)]
struct RecordingMixer {
    played: Vec<(String, LoopMode)>,
}

impl ClipMixer for RecordingMixer {
    fn play_crossfade(&mut self, _: Option<&ClipHandle>, incoming: &ClipHandle, _: f32, mode: LoopMode) {
        self.played.push((incoming.name.clone(), mode));
    }

    fn fade_out(&mut self, _: &ClipHandle, _: f32) {}
}

struct Harness {
    scene: ExplorationScene,
    areas: AreaCatalog,
    clips: AllClips,
    mixer: RecordingMixer,
}

impl Harness {
    fn new(config: SessionConfig) -> Self {
        let mut areas = config.area_catalog();
        let mut scene = ExplorationScene::new(&config);
        assert!(scene.start(&mut areas).is_ok());
        Self {
            scene,
            areas,
            clips: AllClips,
            mixer: RecordingMixer::default(),
        }
    }

    fn frame(&mut self, controls: ControlState) -> FrameReport {
        let mut ctx = FrameContext {
            areas: &mut self.areas,
            clips: &mut self.clips,
            mixer: &mut self.mixer,
        };
        self.scene.update(DT, &controls, &mut ctx)
    }
}

// ============================================================================
// Portal entry
// ============================================================================

#[test]
fn test_explicit_entry_scenario() {
    let mut harness = Harness::new(SessionConfig::default());
    harness.scene.teleport(Vec3::new(10.0, 0.9, 8.0));
    let interact = ControlState::new().with_interact();

    let first = harness.frame(interact);
    assert_eq!(first.phase, TransitionPhase::Committed);
    assert_eq!(first.committed_portal, Some(PortalId::new("city-to-forest")));
    assert_eq!(first.prompt.as_deref(), Some("Entering Forest..."));
    let commit_time = harness.scene.clock();
    let follow_position = harness.scene.follow_camera().position();

    let second = harness.frame(interact);
    assert_eq!(second.phase, TransitionPhase::Interpolating);
    assert!(second.committed_portal.is_none());

    // Interact stays held: re-triggers are ignored until the swap
    let mut completions = Vec::new();
    for _ in 0..120 {
        let report = harness.frame(interact);
        assert!(report.committed_portal.is_none());
        if let Some(area) = report.completed_area.clone() {
            assert_eq!(report.phase, TransitionPhase::Idle);
            assert!(harness.scene.clock() >= commit_time + 1.0 - 1e-6);
            completions.push(area);
        } else if completions.is_empty() {
            assert_eq!(report.phase, TransitionPhase::Interpolating);
            // The transition owns the camera; follow output is frozen
            assert_eq!(harness.scene.follow_camera().position(), follow_position);
        }
    }

    assert_eq!(completions, vec![AreaId::new("forest")]);
    assert_eq!(harness.scene.active_area(), Some(&AreaId::new("forest")));
    assert_eq!(harness.scene.transition().phase(), TransitionPhase::Idle);
    let ids: Vec<&str> = harness.scene.portals().list().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["forest-to-city"]);
}

#[test]
fn test_avatar_arrives_at_spawn() {
    let mut harness = Harness::new(SessionConfig::default());
    harness.scene.teleport(Vec3::new(10.0, 0.9, 8.0));

    let mut arrival = None;
    for i in 0..90 {
        let controls = if i == 0 { ControlState::new().with_interact() } else { ControlState::new() };
        let report = harness.frame(controls);
        if report.completed_area.is_some() {
            arrival = Some(harness.scene.avatar().clone());
        }
    }

    let avatar = arrival.unwrap_or_default();
    assert_eq!(avatar.position, Vec3::new(0.0, 0.9, 0.0));
    assert_eq!(avatar.vertical_velocity, 0.0);
    // Camera was snapped behind the avatar on arrival
    let camera = harness.scene.follow_camera();
    assert!(camera.position().distance(camera.ideal_position(harness.scene.avatar())) < 1e-4);
}

#[test]
fn test_no_entry_without_interact() {
    let mut harness = Harness::new(SessionConfig::default());
    harness.scene.teleport(Vec3::new(10.0, 0.9, 8.0));

    for _ in 0..30 {
        let report = harness.frame(ControlState::new());
        assert_eq!(report.phase, TransitionPhase::Idle);
        assert_eq!(report.selected_portal, Some(PortalId::new("city-to-forest")));
        assert_eq!(report.prompt.as_deref(), Some("Press E to enter Forest"));
    }
    assert_eq!(harness.scene.active_area(), Some(&AreaId::new("city")));
}

#[test]
fn test_automatic_entry_on_approach() {
    let mut config = SessionConfig::default();
    config.portals.entry_policy = EntryPolicy::Automatic;
    let mut harness = Harness::new(config);
    harness.scene.teleport(Vec3::new(10.0, 0.9, 5.0));

    // Backing up with the camera at +Z walks toward the portal at z = 10
    let mut commits = 0;
    let mut completed = None;
    for _ in 0..180 {
        let report = harness.frame(ControlState::new().with_backward());
        if report.committed_portal.is_some() {
            commits += 1;
        }
        if report.completed_area.is_some() {
            completed = report.completed_area;
        }
    }

    assert_eq!(commits, 1);
    assert_eq!(completed, Some(AreaId::new("forest")));
}

#[test]
fn test_round_trip_city_forest_city() {
    let mut harness = Harness::new(SessionConfig::default());
    let mut visited = Vec::new();

    harness.scene.teleport(Vec3::new(10.0, 0.9, 8.0));
    for _ in 0..80 {
        if let Some(area) = harness.frame(ControlState::new().with_interact()).completed_area {
            visited.push(area);
        }
    }
    // Return portal is 10 m straight ahead of the forest spawn
    for _ in 0..180 {
        let controls = ControlState::new().with_forward().with_interact();
        if let Some(area) = harness.frame(controls).completed_area {
            visited.push(area);
            break;
        }
    }

    assert_eq!(visited, vec![AreaId::new("forest"), AreaId::new("city")]);
    assert_eq!(harness.scene.portals().len(), 2);
}

#[test]
fn test_unknown_destination_keeps_area() {
    let mut harness = Harness::new(SessionConfig::default());
    harness
        .scene
        .portals_mut()
        .upsert(Portal::new("to-moon", Vec3::new(0.0, 1.0, -2.0), "moon", "Moon"));

    let first = harness.frame(ControlState::new().with_interact());
    assert_eq!(first.committed_portal, Some(PortalId::new("to-moon")));

    let mut completions = 0;
    for _ in 0..90 {
        let report = harness.frame(ControlState::new());
        if report.completed_area.is_some() {
            completions += 1;
        }
    }

    assert_eq!(completions, 0);
    assert_eq!(harness.scene.transition().phase(), TransitionPhase::Idle);
    assert_eq!(harness.scene.active_area(), Some(&AreaId::new("city")));
}

// ============================================================================
// Locomotion, animation and recovery inside the loop
// ============================================================================

#[test]
fn test_idle_converges_in_one_frame() {
    let mut harness = Harness::new(SessionConfig::default());
    for _ in 0..20 {
        harness.frame(ControlState::new().with_forward());
    }
    let report = harness.frame(ControlState::new());
    assert_eq!(report.locomotion_state, LocomotionState::Idle);
}

#[test]
fn test_fall_fault_respawns() {
    let mut harness = Harness::new(SessionConfig::default());
    harness.frame(ControlState::new());
    harness.scene.avatar_mut().position.y = -60.0;
    harness.scene.avatar_mut().vertical_velocity = -30.0;

    let report = harness.frame(ControlState::new());

    assert!(report.respawned);
    assert_eq!(harness.scene.avatar().position.y, 5.0);
    assert_eq!(harness.scene.avatar().vertical_velocity, 0.0);
}

#[test]
fn test_jump_plays_once_and_runs_loop() {
    let mut harness = Harness::new(SessionConfig::default());
    harness.frame(ControlState::new());
    for _ in 0..30 {
        harness.frame(ControlState::new().with_forward());
    }
    harness.frame(ControlState::new().with_jump());
    for _ in 0..30 {
        harness.frame(ControlState::new());
    }

    let played = &harness.mixer.played;
    assert_eq!(played.first(), Some(&("idle".to_string(), LoopMode::Loop)));
    assert!(played.contains(&("running".to_string(), LoopMode::Loop)));
    assert!(played.contains(&("jump".to_string(), LoopMode::Once)));
}

#[test]
fn test_missing_clip_falls_back_to_idle_with_clip_cache() {
    let config = SessionConfig::default();
    let mut areas = config.area_catalog();
    let mut clips = ClipCache::spawn(StaticClipLoader::character_rig().without_clip("leftStrafe"));
    clips.request_all(config.animation.clips.all());
    assert!(clips.wait_settled(Duration::from_secs(5)));

    let mut mixer = RecordingMixer::default();
    let mut scene = ExplorationScene::new(&config);
    assert!(scene.start(&mut areas).is_ok());

    let mut run = |scene: &mut ExplorationScene, controls: ControlState, frames: usize| {
        for _ in 0..frames {
            let mut ctx = FrameContext {
                areas: &mut areas,
                clips: &mut clips,
                mixer: &mut mixer,
            };
            scene.update(DT, &controls, &mut ctx);
        }
    };

    run(&mut scene, ControlState::new().with_leftward(), 40);
    assert_eq!(scene.avatar().locomotion_state, LocomotionState::StrafeLeft);
    assert_eq!(scene.animation().current_clip().map(|c| c.name.as_str()), Some("idle"));

    run(&mut scene, ControlState::new().with_rightward(), 40);
    assert_eq!(scene.animation().current_clip().map(|c| c.name.as_str()), Some("rightStrafe"));

    let names: Vec<&str> = mixer.played.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["idle", "rightStrafe"]);
}
