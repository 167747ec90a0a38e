//! Portal proximity
//!
//! Tracks which portal (if any) the avatar is close enough to enter, and
//! decides whether this frame's input should start an entry.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::input::ControlState;
use crate::world::{Portal, PortalId, PortalRegistry};

/// Portal interaction distance in meters
pub const INTERACTION_RADIUS: f32 = 3.0;

/// When a selected portal is entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPolicy {
    /// Only on interact intent while a portal is selected
    #[default]
    Explicit,
    /// As soon as a portal becomes selected
    Automatic,
}

impl EntryPolicy {
    /// Whether `selection` should be entered given this frame's controls.
    pub fn should_enter(self, selection: &PortalSelection, controls: &ControlState) -> bool {
        match self {
            EntryPolicy::Explicit => controls.interact,
            EntryPolicy::Automatic => selection.newly_selected,
        }
    }
}

/// The portal selected this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalSelection {
    /// Copy of the registry entry at selection time
    pub portal: Portal,
    pub distance: f32,
    /// Not selected on the previous frame
    pub newly_selected: bool,
}

/// Per-frame nearest-portal tracker.
#[derive(Debug, Clone)]
pub struct PortalProximity {
    radius: f32,
    selected: Option<PortalId>,
}

impl Default for PortalProximity {
    fn default() -> Self {
        Self::new(INTERACTION_RADIUS)
    }
}

impl PortalProximity {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            selected: None,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn selected_id(&self) -> Option<&PortalId> {
        self.selected.as_ref()
    }

    /// Re-scan the registry from `position`.
    pub fn update(&mut self, registry: &PortalRegistry, position: Vec3) -> Option<PortalSelection> {
        let Some((portal, distance)) = registry.nearest_within(position, self.radius) else {
            if let Some(previous) = self.selected.take() {
                log::debug!("left range of portal {previous}");
            }
            return None;
        };

        let newly_selected = self.selected.as_ref() != Some(&portal.id);
        if newly_selected {
            log::debug!("portal {} in range ({distance:.2} m)", portal.id);
            self.selected = Some(portal.id.clone());
        }

        Some(PortalSelection {
            portal: portal.clone(),
            distance,
            newly_selected,
        })
    }

    /// Forget the current selection so the next scan reports it as new.
    pub fn reset(&mut self) {
        self.selected = None;
    }
}

/// UI affordance text for a selected portal.
pub fn prompt_text(policy: EntryPolicy, label: &str, entering: bool) -> String {
    if entering || policy == EntryPolicy::Automatic {
        format!("Entering {label}...")
    } else {
        format!("Press E to enter {label}")
    }
}
