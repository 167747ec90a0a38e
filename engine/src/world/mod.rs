//! World Module
//!
//! Areas, portals and the registry of portals currently mounted.
//!
//! Portal lifetime belongs to whatever implements [`AreaLoader`]; the
//! gameplay core only reads and queries the [`PortalRegistry`].

pub mod area;
pub mod portal;

pub use area::{AreaError, AreaId, AreaLoader, AreaSpawn};
pub use portal::{Portal, PortalId, PortalRegistry};
