//! Areas and the loader seam the core calls on portal completion.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::portal::PortalRegistry;
use crate::physics::GroundProbe;

/// Identifier of a themed area ("city", "forest", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(String);

impl AreaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AreaId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Where and how the avatar enters an area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaSpawn {
    /// Avatar body center on arrival
    pub position: Vec3,
    /// Facing on arrival (radians)
    #[serde(default)]
    pub facing_angle: f32,
}

impl AreaSpawn {
    pub fn new(position: Vec3, facing_angle: f32) -> Self {
        Self {
            position,
            facing_angle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AreaError {
    #[error("unknown area `{0}`")]
    UnknownArea(AreaId),
}

/// Owner of area content: static geometry and the portals an area mounts.
///
/// Activating an area unmounts the previous area's portals from the registry
/// and mounts the new area's portals into it.
pub trait AreaLoader {
    fn set_active_area(
        &mut self,
        area: &AreaId,
        portals: &mut PortalRegistry,
    ) -> Result<AreaSpawn, AreaError>;

    /// Ground geometry of the active area.
    fn ground(&self) -> &dyn GroundProbe;
}
