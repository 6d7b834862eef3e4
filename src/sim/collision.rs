//! Axis-aligned bounding-box collision with inward padding
//!
//! The effective hitbox is smaller than the visual sprite: both boxes are
//! shrunk by the padding before the overlap test, which makes near-miss
//! grazes feel fair.

use glam::Vec2;

/// An axis-aligned box in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from top-left corner and size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink the box inward by `padding` on all four sides
    pub fn shrunk(&self, padding: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(padding),
            max: self.max - Vec2::splat(padding),
        }
    }

    /// Standard AABB overlap test
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.max.y >= other.min.y
            && self.min.y <= other.max.y
            && self.min.x <= other.max.x
            && self.max.x >= other.min.x
    }
}

/// Overlap test after shrinking both boxes inward by `padding`.
/// Deterministic, pure, and symmetric in its arguments.
pub fn overlaps(a: &Aabb, b: &Aabb, padding: f32) -> bool {
    a.shrunk(padding).intersects(&b.shrunk(padding))
}
