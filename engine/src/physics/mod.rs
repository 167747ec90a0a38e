//! Physics module
//!
//! The minimal physics the exploration core needs: one downward ground
//! probe and the ray/box math behind it. There is no rigid-body simulation
//! and no collision against building geometry.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//!
//! # Submodules
//!
//! - [`collision`] - Ray-AABB intersection
//! - [`ground`] - [`GroundProbe`] and the flat / block ground implementations

pub mod collision;
pub mod ground;

pub use collision::{Aabb, ray_aabb_intersect};
pub use ground::{BoxGround, FlatGround, GroundProbe, NoGround};
pub use glam::{Quat, Vec3};
