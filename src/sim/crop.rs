//! Collectible crops

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, SpriteKind};
use crate::consts::*;

/// Crop tiers, cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropKind {
    Wheat,
    Pumpkin,
    GoldenApple,
}

impl CropKind {
    pub fn points(self) -> u32 {
        match self {
            CropKind::Wheat => 1,
            CropKind::Pumpkin => 3,
            CropKind::GoldenApple => 5,
        }
    }

    /// Map a uniform roll in [0, 1) to a tier: 30% wheat, 50% pumpkin, 20% golden apple
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.3 {
            CropKind::Wheat
        } else if roll < 0.8 {
            CropKind::Pumpkin
        } else {
            CropKind::GoldenApple
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CropKind::Wheat => "wheat",
            CropKind::Pumpkin => "pumpkin",
            CropKind::GoldenApple => "golden_apple",
        }
    }
}

/// A collectible on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crop {
    pub body: Body,
    pub kind: CropKind,
    /// Sway phase (radians, cosmetic)
    pub sway: f32,
}

impl Crop {
    pub fn new(x: f32, y: f32, kind: CropKind, sway: f32) -> Self {
        Self {
            body: Body::new(x, y, CROP_WIDTH, CROP_HEIGHT),
            kind,
            sway,
        }
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    pub fn update(&mut self, dt: f32) {
        self.sway += dt * CROP_SWAY_RATE;
    }

    pub fn sprite(&self) -> SpriteKind {
        SpriteKind::Crop {
            kind: self.kind,
            sway: self.sway,
        }
    }
}

/// Grid-aligned coordinate on one axis, excluding the outermost ring of tiles
fn grid_coord(rng: &mut impl Rng, extent: f32, tile: f32) -> f32 {
    let cells = (extent - 2.0 * tile) / tile;
    (rng.random::<f32>() * cells).floor() * tile + tile
}

/// Roll a new crop at a random interior grid cell
pub fn spawn_crop(rng: &mut impl Rng, field: Vec2, tile: f32) -> Crop {
    let x = grid_coord(rng, field.x, tile);
    let y = grid_coord(rng, field.y, tile);
    let kind = CropKind::from_roll(rng.random::<f32>());
    let sway = rng.random::<f32>() * std::f32::consts::TAU;
    Crop::new(x, y, kind, sway)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(CropKind::from_roll(0.0), CropKind::Wheat);
        assert_eq!(CropKind::from_roll(0.299), CropKind::Wheat);
        assert_eq!(CropKind::from_roll(0.3), CropKind::Pumpkin);
        assert_eq!(CropKind::from_roll(0.799), CropKind::Pumpkin);
        assert_eq!(CropKind::from_roll(0.8), CropKind::GoldenApple);
        assert_eq!(CropKind::from_roll(0.999), CropKind::GoldenApple);
    }

    #[test]
    fn test_points_by_tier() {
        assert_eq!(CropKind::Wheat.points(), 1);
        assert_eq!(CropKind::Pumpkin.points(), 3);
        assert_eq!(CropKind::GoldenApple.points(), 5);
    }

    #[test]
    fn test_spawns_on_interior_grid() {
        let mut rng = Pcg32::seed_from_u64(7);
        let field = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT);
        for _ in 0..500 {
            let crop = spawn_crop(&mut rng, field, TILE);
            let Vec2 { x, y } = crop.body.pos;
            assert_eq!(x % TILE, 0.0);
            assert_eq!(y % TILE, 0.0);
            assert!(x >= TILE && x <= FIELD_WIDTH - 2.0 * TILE);
            assert!(y >= TILE && y <= FIELD_HEIGHT - 2.0 * TILE);
        }
    }

    #[test]
    fn test_tier_mix_roughly_matches_weights() {
        let mut rng = Pcg32::seed_from_u64(42);
        let field = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            let idx = match spawn_crop(&mut rng, field, TILE).kind {
                CropKind::Wheat => 0,
                CropKind::Pumpkin => 1,
                CropKind::GoldenApple => 2,
            };
            counts[idx] += 1;
        }
        assert!((2500..3500).contains(&counts[0]));
        assert!((4500..5500).contains(&counts[1]));
        assert!((1500..2500).contains(&counts[2]));
    }

    #[test]
    fn test_sway_advances() {
        let mut crop = Crop::new(30.0, 30.0, CropKind::Wheat, 0.0);
        crop.update(0.5);
        assert!((crop.sway - 1.0).abs() < 1e-6);
    }
}
