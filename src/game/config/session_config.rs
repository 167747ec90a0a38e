//! Session Configuration
//!
//! Every tunable of an exploration session in one serde struct. Each section
//! falls back to its defaults when absent, so an empty JSON object is a
//! valid config.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::AnimationConfig;
use crate::camera::{CameraOffsetSpace, FollowCameraConfig};
use crate::game::areas::{AreaCatalog, AreaDefinition, default_areas};
use crate::game::portal::{EntryPolicy, INTERACTION_RADIUS, TRANSITION_DURATION};
use crate::player::{LocomotionConfig, MovementMode};
use crate::world::AreaId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Portal selection and transition tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Selection radius around the avatar (m)
    pub interaction_radius: f32,
    /// Camera flight time (s)
    pub transition_duration: f32,
    pub entry_policy: EntryPolicy,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            interaction_radius: INTERACTION_RADIUS,
            transition_duration: TRANSITION_DURATION,
            entry_policy: EntryPolicy::Explicit,
        }
    }
}

/// Full session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub movement_mode: MovementMode,
    pub locomotion: LocomotionConfig,
    pub camera: FollowCameraConfig,
    pub animation: AnimationConfig,
    pub portals: PortalConfig,
    /// Area mounted when the session starts
    pub start_area: AreaId,
    /// Area table; `None` uses the built-in city / forest / beach set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub areas: Option<Vec<AreaDefinition>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            movement_mode: MovementMode::CameraRelative,
            locomotion: LocomotionConfig::default(),
            camera: FollowCameraConfig::default(),
            animation: AnimationConfig::default(),
            portals: PortalConfig::default(),
            start_area: AreaId::new("city"),
            areas: None,
        }
    }
}

impl SessionConfig {
    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded session config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Area table in effect: the configured one or the built-in set.
    pub fn area_definitions(&self) -> Vec<AreaDefinition> {
        self.areas.clone().unwrap_or_else(default_areas)
    }

    pub fn area_catalog(&self) -> AreaCatalog {
        AreaCatalog::new(self.area_definitions())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !(self.portals.transition_duration > 0.0) {
            return invalid(format!(
                "portals.transition_duration must be positive, got {}",
                self.portals.transition_duration
            ));
        }
        if !(self.portals.interaction_radius > 0.0) {
            return invalid(format!(
                "portals.interaction_radius must be positive, got {}",
                self.portals.interaction_radius
            ));
        }
        if !(self.camera.smoothing > 0.0 && self.camera.smoothing <= 1.0) {
            return invalid(format!(
                "camera.smoothing must be in (0, 1], got {}",
                self.camera.smoothing
            ));
        }
        if self.camera.min_distance > self.camera.max_distance {
            return invalid(format!(
                "camera.min_distance {} exceeds camera.max_distance {}",
                self.camera.min_distance, self.camera.max_distance
            ));
        }
        if !(self.locomotion.max_frame_dt > 0.0) {
            return invalid(format!(
                "locomotion.max_frame_dt must be positive, got {}",
                self.locomotion.max_frame_dt
            ));
        }
        if self.animation.blend_seconds < 0.0 {
            return invalid(format!(
                "animation.blend_seconds must not be negative, got {}",
                self.animation.blend_seconds
            ));
        }

        let areas = self.area_definitions();
        for (i, area) in areas.iter().enumerate() {
            if areas[..i].iter().any(|a| a.id == area.id) {
                return invalid(format!("area `{}` is defined twice", area.id));
            }
            if let Some(id) = area.duplicate_portal() {
                return invalid(format!("area `{}` defines portal `{id}` twice", area.id));
            }
        }
        if !areas.iter().any(|a| a.id == self.start_area) {
            return invalid(format!("start_area `{}` is not a known area", self.start_area));
        }

        if self.movement_mode == MovementMode::CameraRelative
            && self.camera.offset_space == CameraOffsetSpace::Local
        {
            log::warn!(
                "camera-relative movement with a local camera offset makes the camera chase the avatar's facing"
            );
        }

        Ok(())
    }
}
