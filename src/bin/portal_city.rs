//! Portal City - headless exploration session
//!
//! Run with: `cargo run --bin portal_city [config.json]`
//!
//! Walks the avatar from the city spawn into the forest portal, then back
//! through the forest's return portal, at a fixed 60 Hz. There is no window:
//! area changes and a final summary go to the log (`RUST_LOG=debug` for
//! crossfades and proximity events).

use std::time::Duration;

use anyhow::{Context, Result};
use portal_city_engine::animation::{ClipCache, ClipHandle, ClipMixer, LoopMode, StaticClipLoader};
use portal_city_engine::game::{ExplorationScene, FrameContext, SessionConfig};
use portal_city_engine::input::{ControlSource, ControlState, ScriptedControls};

/// Fixed simulation step (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Hard stop for the session
const MAX_FRAMES: u32 = 60 * 14;
/// How long the "loading screen" waits for clips
const CLIP_LOAD_TIMEOUT: Duration = Duration::from_secs(5);

/// Mixer stand-in that only records what it was asked to play.
#[derive(Default)]
struct LoggingMixer {
    crossfades: usize,
}

impl ClipMixer for LoggingMixer {
    fn play_crossfade(
        &mut self,
        outgoing: Option<&ClipHandle>,
        incoming: &ClipHandle,
        blend_seconds: f32,
        mode: LoopMode,
    ) {
        self.crossfades += 1;
        log::debug!(
            "mixer: {} -> {} over {blend_seconds:.2}s ({mode:?})",
            outgoing.map_or("<none>", |c| c.name.as_str()),
            incoming.name
        );
    }

    fn fade_out(&mut self, outgoing: &ClipHandle, blend_seconds: f32) {
        log::debug!("mixer: fade out {} over {blend_seconds:.2}s", outgoing.name);
    }
}

/// City spawn -> forest portal (back-right of the spawn) -> return portal (straight ahead).
fn walk_script() -> ScriptedControls {
    ScriptedControls::new()
        .then_at(0.0, ControlState::new())
        .then_at(0.5, ControlState::new().with_backward().with_rightward().with_interact())
        .then_at(6.5, ControlState::new().with_forward().with_interact())
        .then_at(10.5, ControlState::new())
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let config = match std::env::args().nth(1) {
        Some(path) => SessionConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => SessionConfig::default(),
    };
    log::info!(
        "movement: {:?}, camera offset: {:?}, portal entry: {:?}",
        config.movement_mode,
        config.camera.offset_space,
        config.portals.entry_policy
    );

    // The rig ships without a left strafe, so that state falls back to idle
    let mut clips = ClipCache::spawn(StaticClipLoader::character_rig().without_clip("leftStrafe"));
    clips.request_all(config.animation.clips.all());
    if !clips.wait_settled(CLIP_LOAD_TIMEOUT) {
        log::warn!("{} clips still loading, starting anyway", clips.pending_count());
    }
    log::info!("{} animation clips ready", clips.ready_count());

    let mut areas = config.area_catalog();
    let mut mixer = LoggingMixer::default();
    let mut scene = ExplorationScene::new(&config);
    scene.start(&mut areas).context("starting session")?;

    let mut script = walk_script();
    let end_time = script.last_start() + 1.5;
    let mut visited = vec![config.start_area.to_string()];
    let mut frames = 0;
    let mut last_prompt: Option<String> = None;

    while frames < MAX_FRAMES && script.clock() < end_time {
        let controls = script.control_state();
        let mut ctx = FrameContext {
            areas: &mut areas,
            clips: &mut clips,
            mixer: &mut mixer,
        };
        let report = scene.update(FRAME_DT, &controls, &mut ctx);

        if report.prompt != last_prompt {
            if let Some(prompt) = &report.prompt {
                log::info!("{prompt}");
            }
            last_prompt = report.prompt.clone();
        }
        if let Some(area) = &report.completed_area {
            visited.push(area.to_string());
        }

        script.advance(FRAME_DT);
        frames += 1;
    }

    let avatar = scene.avatar();
    log::info!(
        "session finished after {frames} frames ({:.1}s): visited {}, now in {} at ({:.1}, {:.1}, {:.1}), {} crossfades",
        scene.clock(),
        visited.join(" -> "),
        scene.active_area().map_or("<none>", |a| a.as_str()),
        avatar.position.x,
        avatar.position.y,
        avatar.position.z,
        mixer.crossfades
    );
    Ok(())
}
