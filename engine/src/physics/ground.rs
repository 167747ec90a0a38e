//! Ground probes
//!
//! The locomotion controller only ever asks one physics question: "what is
//! the highest walkable surface straight below this point?". Everything that
//! can answer it implements [`GroundProbe`]. Probes hold static world
//! geometry only, so the avatar's own body can never be hit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, ray_aabb_intersect};

/// Downward ray query against static world geometry.
pub trait GroundProbe {
    /// Cast a ray straight down from `origin`.
    ///
    /// Returns the height of the first surface hit, or `None` if nothing is
    /// below the origin.
    fn cast_down(&self, origin: Vec3) -> Option<f32>;
}

/// No ground at all; everything falls.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGround;

impl GroundProbe for NoGround {
    fn cast_down(&self, _origin: Vec3) -> Option<f32> {
        None
    }
}

/// Horizontal plane, optionally bounded to a square centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatGround {
    /// Surface height (Y)
    pub height: f32,
    /// Half the side length of the square, or `None` for an infinite plane
    pub half_extent: Option<f32>,
}

impl Default for FlatGround {
    fn default() -> Self {
        Self {
            height: 0.0,
            half_extent: None,
        }
    }
}

impl FlatGround {
    pub fn infinite(height: f32) -> Self {
        Self {
            height,
            half_extent: None,
        }
    }

    /// Square plane of side `size` centered on the world origin.
    pub fn square(height: f32, size: f32) -> Self {
        Self {
            height,
            half_extent: Some(size.abs() * 0.5),
        }
    }

    fn covers(&self, origin: Vec3) -> bool {
        match self.half_extent {
            Some(half) => origin.x.abs() <= half && origin.z.abs() <= half,
            None => true,
        }
    }
}

impl GroundProbe for FlatGround {
    fn cast_down(&self, origin: Vec3) -> Option<f32> {
        (self.covers(origin) && origin.y >= self.height).then_some(self.height)
    }
}

/// A base plane plus solid blocks (plazas, steps, platforms).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxGround {
    pub base: FlatGround,
    pub blocks: Vec<Aabb>,
}

impl BoxGround {
    pub fn new(base: FlatGround) -> Self {
        Self {
            base,
            blocks: Vec::new(),
        }
    }

    pub fn with_block(mut self, block: Aabb) -> Self {
        self.blocks.push(block);
        self
    }
}

impl GroundProbe for BoxGround {
    fn cast_down(&self, origin: Vec3) -> Option<f32> {
        let mut best = self.base.cast_down(origin);

        for block in &self.blocks {
            // Only top faces count as ground; an origin inside a block sees no floor there
            if origin.y < block.max.y {
                continue;
            }
            if let Some(t) = ray_aabb_intersect(origin, Vec3::NEG_Y, block.min, block.max) {
                let surface = origin.y - t;
                if best.is_none_or(|current| surface > current) {
                    best = Some(surface);
                }
            }
        }

        best
    }
}

impl<T: GroundProbe + ?Sized> GroundProbe for &T {
    fn cast_down(&self, origin: Vec3) -> Option<f32> {
        (**self).cast_down(origin)
    }
}

impl<T: GroundProbe + ?Sized> GroundProbe for Box<T> {
    fn cast_down(&self, origin: Vec3) -> Option<f32> {
        (**self).cast_down(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinite_plane_hits_everywhere_above() {
        let ground = FlatGround::infinite(2.0);
        assert_eq!(ground.cast_down(Vec3::new(1000.0, 5.0, -1000.0)), Some(2.0));
        assert_eq!(ground.cast_down(Vec3::new(0.0, 1.0, 0.0)), None);
    }

    #[test]
    fn test_square_plane_has_edges() {
        let ground = FlatGround::square(0.0, 50.0);
        assert_eq!(ground.cast_down(Vec3::new(24.9, 1.0, 0.0)), Some(0.0));
        assert_eq!(ground.cast_down(Vec3::new(25.1, 1.0, 0.0)), None);
        assert_eq!(ground.cast_down(Vec3::new(0.0, 1.0, -30.0)), None);
    }

    #[test]
    fn test_box_ground_prefers_highest_surface() {
        let ground = BoxGround::new(FlatGround::infinite(0.0))
            .with_block(Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.5, 1.0)))
            .with_block(Aabb::new(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 1.5, 0.5)));

        assert_eq!(ground.cast_down(Vec3::new(0.0, 5.0, 0.0)), Some(1.5));
        assert_eq!(ground.cast_down(Vec3::new(0.8, 5.0, 0.0)), Some(0.5));
        assert_eq!(ground.cast_down(Vec3::new(3.0, 5.0, 0.0)), Some(0.0));
    }

    #[test]
    fn test_box_ground_ignores_block_above_origin() {
        let ground = BoxGround::new(FlatGround::infinite(0.0))
            .with_block(Aabb::new(Vec3::new(-1.0, 2.0, -1.0), Vec3::new(1.0, 3.0, 1.0)));
        // Standing under an overhang sees the floor
        assert_eq!(ground.cast_down(Vec3::new(0.0, 1.5, 0.0)), Some(0.0));
    }

    #[test]
    fn test_no_ground() {
        assert_eq!(NoGround.cast_down(Vec3::new(0.0, 100.0, 0.0)), None);
    }
}
