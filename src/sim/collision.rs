//! Axis-aligned bounding box overlap
//!
//! Every entity on the field is a box; there is no other collision shape.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// True when the interiors of `a` and `b` intersect.
///
/// Inequalities are strict, so boxes that only share an edge do not overlap.
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.pos.x < b.right() && b.pos.x < a.right() && a.pos.y < b.bottom() && b.pos.y < a.bottom()
}
