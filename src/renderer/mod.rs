//! Rendering module
//!
//! `Scene` is the per-frame snapshot handed to a painter; the Canvas2D
//! painter only exists on wasm32.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::consts::PLAYER_SHEET_CELL;
use crate::sim::{GamePhase, GameState, SpriteKind};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

/// One entity to paint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: SpriteKind,
}

impl Sprite {
    /// Top-left of this sprite's cell in the walk sheet (column = frame, row = facing)
    pub fn sheet_cell(&self) -> Option<Vec2> {
        match self.kind {
            SpriteKind::Player { facing, frame } => Some(Vec2::new(
                frame as f32 * PLAYER_SHEET_CELL,
                facing.row() as f32 * PLAYER_SHEET_CELL,
            )),
            _ => None,
        }
    }
}

/// Everything a painter needs for one frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub field: Vec2,
    /// Paint order: crops, then obstacles, then the player
    pub sprites: Vec<Sprite>,
    pub phase: GamePhase,
    pub level: u32,
    pub score: u32,
    pub time_left: f32,
    /// Label lines for the top-left corner
    pub overlay: Vec<String>,
}

impl Scene {
    pub fn capture(state: &GameState) -> Self {
        let mut sprites = Vec::with_capacity(state.crops.len() + state.obstacles.len() + 1);
        sprites.extend(state.crops.iter().map(|c| Sprite {
            pos: c.body.pos,
            size: c.body.size(),
            kind: c.sprite(),
        }));
        sprites.extend(state.obstacles.iter().map(|o| Sprite {
            pos: o.body.pos,
            size: o.body.size(),
            kind: o.sprite(),
        }));
        sprites.push(Sprite {
            pos: state.player.body.pos,
            size: state.player.body.size(),
            kind: state.player.sprite(),
        });

        Self {
            field: state.field,
            sprites,
            phase: state.phase,
            level: state.level,
            score: state.score,
            time_left: state.time_left,
            overlay: crate::ui::overlay_lines(state),
        }
    }
}
