//! Scarecrows (static blockers) and crows (wrapping penalizers)

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, SpriteKind};
use crate::consts::*;

/// Obstacle behavior, dispatched by tag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Blocks the player; never moves
    Scarecrow,
    /// Flies horizontally at a fixed signed speed and wraps around the field
    Crow { vx: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Body,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn scarecrow(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, SCARECROW_WIDTH, SCARECROW_HEIGHT),
            kind: ObstacleKind::Scarecrow,
        }
    }

    pub fn crow(x: f32, y: f32, vx: f32) -> Self {
        Self {
            body: Body::new(x, y, CROW_WIDTH, CROW_HEIGHT),
            kind: ObstacleKind::Crow { vx },
        }
    }

    /// Only scarecrows stop the player
    #[inline]
    pub fn blocks_movement(&self) -> bool {
        matches!(self.kind, ObstacleKind::Scarecrow)
    }

    #[inline]
    pub fn is_crow(&self) -> bool {
        matches!(self.kind, ObstacleKind::Crow { .. })
    }

    /// Move a crow by `vx * dt`, wrapping across the horizontal bounds.
    /// Scarecrows are left untouched.
    pub fn advance(&mut self, dt: f32, field_width: f32) {
        if let ObstacleKind::Crow { vx } = self.kind {
            let w = self.body.size().x;
            self.body.pos.x += vx * dt;
            if self.body.pos.x < -w {
                self.body.pos.x = field_width;
            }
            if self.body.pos.x > field_width {
                self.body.pos.x = -w;
            }
        }
    }

    /// Put a crow back on the entry row at a fresh random x
    pub fn respawn(&mut self, rng: &mut impl Rng, field_width: f32) {
        self.body.pos.x = rng.random::<f32>() * field_width;
        self.body.pos.y = CROW_Y_MARGIN;
    }

    pub fn sprite(&self) -> SpriteKind {
        match self.kind {
            ObstacleKind::Scarecrow => SpriteKind::Scarecrow,
            ObstacleKind::Crow { .. } => SpriteKind::Crow,
        }
    }
}

/// Roll a crow on the entry row with speed in [CROW_MIN_SPEED, CROW_MAX_SPEED] and random heading
pub fn spawn_crow(rng: &mut impl Rng, field_width: f32) -> Obstacle {
    let x = rng.random::<f32>() * field_width;
    let speed = rng.random_range(CROW_MIN_SPEED..=CROW_MAX_SPEED);
    let vx = if rng.random_bool(0.5) { speed } else { -speed };
    Obstacle::crow(x, CROW_Y_MARGIN, vx)
}

/// Append scarecrows from `positions` until `count` are present.
///
/// Scarecrows already on the field are kept in place; the table prefix
/// they came from is skipped.
pub fn place_scarecrows(obstacles: &mut Vec<Obstacle>, positions: &[[f32; 2]], count: usize) {
    let present = obstacles.iter().filter(|o| o.blocks_movement()).count();
    let target = count.min(positions.len());
    if count > positions.len() {
        log::warn!(
            "Wanted {} scarecrows but only {} positions are configured",
            count,
            positions.len()
        );
    }
    for &[x, y] in positions.iter().take(target).skip(present) {
        obstacles.push(Obstacle::scarecrow(x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const POSITIONS: [[f32; 2]; 4] = [[200.0, 220.0], [650.0, 160.0], [400.0, 300.0], [100.0, 400.0]];

    #[test]
    fn test_crow_wraps_left_to_right() {
        let mut crow = Obstacle::crow(-5.0, CROW_Y_MARGIN, -200.0);
        crow.advance(0.1, 900.0);
        assert_eq!(crow.body.pos.x, 900.0);
    }

    #[test]
    fn test_crow_wraps_right_to_left() {
        let mut crow = Obstacle::crow(895.0, CROW_Y_MARGIN, 200.0);
        crow.advance(0.1, 900.0);
        assert_eq!(crow.body.pos.x, -CROW_WIDTH);
    }

    #[test]
    fn test_crow_inside_bounds_just_moves() {
        let mut crow = Obstacle::crow(-5.0, CROW_Y_MARGIN, -100.0);
        crow.advance(0.1, 900.0);
        assert!((crow.body.pos.x + 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_scarecrow_never_moves() {
        let mut s = Obstacle::scarecrow(200.0, 220.0);
        s.advance(10.0, 900.0);
        assert_eq!(s.body.pos.x, 200.0);
        assert_eq!(s.body.pos.y, 220.0);
    }

    #[test]
    fn test_spawned_crow_speed_and_row() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen_left = false;
        let mut seen_right = false;
        for _ in 0..200 {
            let crow = spawn_crow(&mut rng, FIELD_WIDTH);
            let ObstacleKind::Crow { vx } = crow.kind else {
                panic!("spawn_crow must produce a crow");
            };
            assert!((CROW_MIN_SPEED..=CROW_MAX_SPEED).contains(&vx.abs()));
            assert!(crow.body.pos.x >= 0.0 && crow.body.pos.x < FIELD_WIDTH);
            assert_eq!(crow.body.pos.y, CROW_Y_MARGIN);
            seen_left |= vx < 0.0;
            seen_right |= vx > 0.0;
        }
        assert!(seen_left && seen_right);
    }

    #[test]
    fn test_place_scarecrows_tops_up() {
        let mut obstacles = Vec::new();
        place_scarecrows(&mut obstacles, &POSITIONS, 2);
        assert_eq!(obstacles.len(), 2);

        // Existing ones stay, one more appended from the table
        obstacles.push(Obstacle::crow(0.0, CROW_Y_MARGIN, 150.0));
        place_scarecrows(&mut obstacles, &POSITIONS, 3);
        let scarecrows: Vec<_> = obstacles.iter().filter(|o| o.blocks_movement()).collect();
        assert_eq!(scarecrows.len(), 3);
        assert_eq!(scarecrows[2].body.pos.x, 400.0);
        assert_eq!(scarecrows[2].body.pos.y, 300.0);
    }

    #[test]
    fn test_place_scarecrows_caps_at_table() {
        let mut obstacles = Vec::new();
        place_scarecrows(&mut obstacles, &POSITIONS, 9);
        assert_eq!(obstacles.len(), POSITIONS.len());
    }

    proptest! {
        #[test]
        fn prop_crow_stays_within_wrap_band(x in -20.0f32..900.0, vx in -200.0f32..200.0, dt in 0.0f32..0.033) {
            let mut crow = Obstacle::crow(x, CROW_Y_MARGIN, vx);
            crow.advance(dt, 900.0);
            prop_assert!(crow.body.pos.x >= -CROW_WIDTH && crow.body.pos.x <= 900.0);
        }
    }
}
