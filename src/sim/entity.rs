//! Shared spatial record for everything on the field

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::crop::CropKind;
use super::player::Facing;

/// Position, fixed size and liveness flag common to every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Set at construction, never changes
    size: Vec2,
    /// Marked for removal at the end of the current pass
    pub dead: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            dead: false,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Visual variant handed to the renderer, one per entity kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player { facing: Facing, frame: u8 },
    Crop { kind: CropKind, sway: f32 },
    Scarecrow,
    Crow,
}
