//! Portals and the portal registry.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::area::AreaId;

/// Stable identifier of one portal placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortalId(String);

impl PortalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PortalId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A named teleport endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub id: PortalId,
    pub position: Vec3,
    /// Area activated when the portal is entered
    pub destination_area: AreaId,
    /// Display text
    pub label: String,
}

impl Portal {
    pub fn new(
        id: impl Into<String>,
        position: Vec3,
        destination_area: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: PortalId::new(id),
            position,
            destination_area: AreaId::new(destination_area),
            label: label.into(),
        }
    }
}

/// Active portals, at most one per id, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PortalRegistry {
    portals: Vec<Portal>,
}

impl PortalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a portal, or replace the one with the same id in place.
    ///
    /// Returns the replaced portal, if any.
    pub fn upsert(&mut self, portal: Portal) -> Option<Portal> {
        match self.portals.iter_mut().find(|p| p.id == portal.id) {
            Some(slot) => Some(std::mem::replace(slot, portal)),
            None => {
                self.portals.push(portal);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &PortalId) -> Option<Portal> {
        let index = self.portals.iter().position(|p| &p.id == id)?;
        Some(self.portals.remove(index))
    }

    /// All active portals in registry order.
    pub fn list(&self) -> &[Portal] {
        &self.portals
    }

    pub fn get(&self, id: &PortalId) -> Option<&Portal> {
        self.portals.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &PortalId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }

    pub fn clear(&mut self) {
        self.portals.clear();
    }

    /// Closest portal strictly inside `radius` of `point`, with its distance.
    ///
    /// Equal distances resolve to the portal that comes first in registry order.
    pub fn nearest_within(&self, point: Vec3, radius: f32) -> Option<(&Portal, f32)> {
        let mut closest = None;
        let mut closest_distance = radius;

        for portal in &self.portals {
            let distance = point.distance(portal.position);
            if distance < closest_distance {
                closest_distance = distance;
                closest = Some(portal);
            }
        }

        closest.map(|portal| (portal, closest_distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portal(id: &str, position: Vec3) -> Portal {
        Portal::new(id, position, "forest", "Forest")
    }

    #[test]
    fn test_upsert_same_id_replaces() {
        let mut registry = PortalRegistry::new();
        registry.upsert(portal("a", Vec3::ZERO));
        registry.upsert(portal("b", Vec3::X));

        let replaced = registry.upsert(portal("a", Vec3::new(5.0, 0.0, 0.0)));

        assert_eq!(replaced.map(|p| p.position), Some(Vec3::ZERO));
        assert_eq!(registry.len(), 2);
        // Order is kept
        assert_eq!(registry.list()[0].id.as_str(), "a");
        assert_eq!(registry.list()[0].position, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_upsert_identical_is_idempotent() {
        let mut registry = PortalRegistry::new();
        registry.upsert(portal("a", Vec3::ZERO));
        let before = registry.list().to_vec();

        registry.upsert(portal("a", Vec3::ZERO));

        assert_eq!(registry.list(), before.as_slice());
    }

    #[test]
    fn test_remove() {
        let mut registry = PortalRegistry::new();
        registry.upsert(portal("a", Vec3::ZERO));

        assert!(registry.remove(&PortalId::new("missing")).is_none());
        assert!(registry.remove(&PortalId::new("a")).is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_nearest_within_picks_closest() {
        let mut registry = PortalRegistry::new();
        registry.upsert(portal("far", Vec3::new(4.0, 0.0, 0.0)));
        registry.upsert(portal("near", Vec3::new(0.0, 0.0, 2.0)));

        let (selected, distance) = registry
            .nearest_within(Vec3::ZERO, 5.0)
            .map(|(p, d)| (p.id.as_str().to_string(), d))
            .unwrap_or_default();

        assert_eq!(selected, "near");
        assert_eq!(distance, 2.0);
    }

    #[test]
    fn test_nearest_within_radius_is_exclusive() {
        let mut registry = PortalRegistry::new();
        registry.upsert(portal("edge", Vec3::new(3.0, 0.0, 0.0)));

        assert!(registry.nearest_within(Vec3::ZERO, 3.0).is_none());
        assert!(registry.nearest_within(Vec3::ZERO, 3.01).is_some());
    }

    #[test]
    fn test_nearest_within_tie_goes_to_first() {
        let mut registry = PortalRegistry::new();
        registry.upsert(portal("first", Vec3::new(2.0, 0.0, 0.0)));
        registry.upsert(portal("second", Vec3::new(-2.0, 0.0, 0.0)));

        let selected = registry.nearest_within(Vec3::ZERO, 3.0).map(|(p, _)| p.id.as_str());
        assert_eq!(selected, Some("first"));
    }
}
