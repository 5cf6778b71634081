//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through `tick(dt)`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod crop;
pub mod entity;
pub mod obstacle;
pub mod player;
mod round;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlaps};
pub use crop::{Crop, CropKind, spawn_crop};
pub use entity::{Body, SpriteKind};
pub use obstacle::{Obstacle, ObstacleKind, place_scarecrows, spawn_crow};
pub use player::{Directions, Facing, Player, WalkAnim};
pub use state::{GameEvent, GamePhase, GameState, StartOutcome};
pub use tick::{TickInput, effective_spawn_interval, tick};
