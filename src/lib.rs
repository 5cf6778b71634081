//! Crop Dash - a farm-field arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, level state machine)
//! - `tuning`: Data-driven level table
//! - `renderer`: Render snapshot and Canvas2D painter
//! - `platform`: Keyboard tracking, frame clock, browser listeners
//! - `ui`: HUD text projection

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{LevelConfig, LevelTable, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 540.0;
    /// Grid size used for crop placement and the background grid
    pub const TILE: f32 = 30.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 34.0;
    pub const PLAYER_HEIGHT: f32 = 34.0;
    pub const PLAYER_SPEED: f32 = 260.0;
    /// Start point: horizontally centered, 80px above the bottom edge
    pub const PLAYER_START_X: f32 = FIELD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0;
    pub const PLAYER_START_Y: f32 = FIELD_HEIGHT - 80.0;
    /// Walk cycle
    pub const PLAYER_WALK_FRAMES: u8 = 4;
    pub const PLAYER_FRAME_DURATION: f32 = 0.15;
    /// Walk sheet: 4x4 cells of 48px, rows down/left/right/up
    pub const PLAYER_SHEET_PATH: &str = "sprites/farmer.png";
    pub const PLAYER_SHEET_CELL: f32 = 48.0;

    /// Crop defaults
    pub const CROP_WIDTH: f32 = 20.0;
    pub const CROP_HEIGHT: f32 = 26.0;
    /// Sway speed (radians/sec)
    pub const CROP_SWAY_RATE: f32 = 2.0;

    /// Scarecrow defaults
    pub const SCARECROW_WIDTH: f32 = 26.0;
    pub const SCARECROW_HEIGHT: f32 = 46.0;

    /// Crow defaults
    pub const CROW_WIDTH: f32 = 20.0;
    pub const CROW_HEIGHT: f32 = 16.0;
    pub const CROW_MIN_SPEED: f32 = 100.0;
    pub const CROW_MAX_SPEED: f32 = 200.0;
    /// Crows enter the field on this row
    pub const CROW_Y_MARGIN: f32 = 50.0;
    /// Points lost per crow touched
    pub const CROW_PENALTY: u32 = 2;

    /// Difficulty ramp: spawn interval shrinks by this much over a full round
    pub const SPAWN_RAMP: f32 = 0.5;
    /// Fastest allowed crop spawn interval (seconds)
    pub const MIN_SPAWN_INTERVAL: f32 = 0.1;
}

/// Bound `v` to `[lo, hi]` (caller guarantees `lo <= hi`)
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    hi.min(lo.max(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(3.0, 3.0, 3.0), 3.0);
    }
}
