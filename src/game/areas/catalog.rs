//! Area Catalog
//!
//! Static table of themed areas. Activating an area removes the portals the
//! previous area mounted and mounts the new area's portals into the
//! registry. Portals added to the registry by anyone else are left alone.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::{BoxGround, FlatGround, GroundProbe, NoGround};
use crate::world::{AreaError, AreaId, AreaLoader, AreaSpawn, Portal, PortalId, PortalRegistry};

/// Side length of every default area's ground square (m)
pub const WORLD_SIZE: f32 = 50.0;

/// Avatar body center on arrival in a default area
pub const DEFAULT_SPAWN: Vec3 = Vec3::new(0.0, 0.9, 0.0);

/// Everything needed to mount one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaDefinition {
    pub id: AreaId,
    pub spawn: AreaSpawn,
    #[serde(default)]
    pub ground: BoxGround,
    #[serde(default)]
    pub portals: Vec<Portal>,
}

impl AreaDefinition {
    /// Area with the default spawn point and a bounded flat ground.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: AreaId::new(id),
            spawn: AreaSpawn::new(DEFAULT_SPAWN, 0.0),
            ground: BoxGround::new(FlatGround::square(0.0, WORLD_SIZE)),
            portals: Vec::new(),
        }
    }

    pub fn with_portal(mut self, portal: Portal) -> Self {
        self.portals.push(portal);
        self
    }

    pub fn with_spawn(mut self, spawn: AreaSpawn) -> Self {
        self.spawn = spawn;
        self
    }

    pub fn with_ground(mut self, ground: BoxGround) -> Self {
        self.ground = ground;
        self
    }

    /// First portal id that appears more than once in this area.
    pub fn duplicate_portal(&self) -> Option<&PortalId> {
        self.portals
            .iter()
            .enumerate()
            .find(|(i, p)| self.portals[..*i].iter().any(|q| q.id == p.id))
            .map(|(_, p)| &p.id)
    }
}

/// City hub plus the forest and beach areas, each linked back to the city.
pub fn default_areas() -> Vec<AreaDefinition> {
    vec![
        AreaDefinition::new("city")
            .with_portal(Portal::new(
                "city-to-forest",
                Vec3::new(10.0, 1.0, 10.0),
                "forest",
                "Forest",
            ))
            .with_portal(Portal::new(
                "city-to-beach",
                Vec3::new(-10.0, 1.0, 10.0),
                "beach",
                "Beach",
            )),
        AreaDefinition::new("forest").with_portal(Portal::new(
            "forest-to-city",
            Vec3::new(0.0, 1.0, -10.0),
            "city",
            "City",
        )),
        AreaDefinition::new("beach").with_portal(Portal::new(
            "beach-to-city",
            Vec3::new(0.0, 1.0, -10.0),
            "city",
            "City",
        )),
    ]
}

/// [`AreaLoader`] over a fixed set of [`AreaDefinition`]s.
#[derive(Debug, Clone)]
pub struct AreaCatalog {
    areas: Vec<AreaDefinition>,
    active: Option<usize>,
    /// Portal ids this catalog put into the registry for the active area
    mounted: Vec<PortalId>,
}

impl Default for AreaCatalog {
    fn default() -> Self {
        Self::new(default_areas())
    }
}

impl AreaCatalog {
    pub fn new(areas: Vec<AreaDefinition>) -> Self {
        Self {
            areas,
            active: None,
            mounted: Vec::new(),
        }
    }

    pub fn areas(&self) -> &[AreaDefinition] {
        &self.areas
    }

    pub fn get(&self, id: &AreaId) -> Option<&AreaDefinition> {
        self.areas.iter().find(|a| &a.id == id)
    }

    pub fn contains(&self, id: &AreaId) -> bool {
        self.get(id).is_some()
    }

    pub fn active_area(&self) -> Option<&AreaId> {
        self.active.map(|i| &self.areas[i].id)
    }

    /// Portal ids currently mounted by this catalog.
    pub fn mounted(&self) -> &[PortalId] {
        &self.mounted
    }

    fn unmount(&mut self, portals: &mut PortalRegistry) {
        for id in self.mounted.drain(..) {
            portals.remove(&id);
        }
    }
}

impl AreaLoader for AreaCatalog {
    fn set_active_area(
        &mut self,
        area: &AreaId,
        portals: &mut PortalRegistry,
    ) -> Result<AreaSpawn, AreaError> {
        let Some(index) = self.areas.iter().position(|a| &a.id == area) else {
            log::error!("cannot activate unknown area {area}");
            return Err(AreaError::UnknownArea(area.clone()));
        };

        if let Some(previous) = self.active_area() {
            log::debug!("unmounting area {previous} ({} portals)", self.mounted.len());
        }
        self.unmount(portals);

        let definition = &self.areas[index];
        for portal in &definition.portals {
            portals.upsert(portal.clone());
            self.mounted.push(portal.id.clone());
        }
        self.active = Some(index);

        log::info!(
            "active area: {} ({} portals mounted)",
            definition.id,
            definition.portals.len()
        );
        Ok(definition.spawn)
    }

    fn ground(&self) -> &dyn GroundProbe {
        match self.active {
            Some(index) => &self.areas[index].ground,
            None => &NoGround,
        }
    }
}
