//! The farmer: keyboard-driven movement blocked by scarecrows

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::overlaps;
use super::entity::{Body, SpriteKind};
use super::obstacle::Obstacle;
use crate::clamp;
use crate::consts::*;

/// Directional keys held during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directions {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Directions {
    /// Net horizontal/vertical intent in {-1, 0, 1}; opposite keys cancel
    pub fn axis(&self) -> Vec2 {
        Vec2::new(
            self.right as i8 as f32 - self.left as i8 as f32,
            self.down as i8 as f32 - self.up as i8 as f32,
        )
    }
}

/// Sprite-sheet row, one per facing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

impl Facing {
    /// Row index in a 4x4 walk sheet (rows: down, left, right, up)
    pub fn row(self) -> u8 {
        match self {
            Facing::Down => 0,
            Facing::Left => 1,
            Facing::Right => 2,
            Facing::Up => 3,
        }
    }
}

/// Walk cycle state (cosmetic only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WalkAnim {
    pub frame: u8,
    pub facing: Facing,
    /// Time spent on the current frame
    pub frame_time: f32,
    pub moving: bool,
}

impl WalkAnim {
    /// Advance the walk cycle from the current velocity
    pub fn update(&mut self, vel: Vec2, dt: f32) {
        self.moving = vel.x.abs() + vel.y.abs() > 0.0;
        if !self.moving {
            self.frame = 0;
            self.frame_time = 0.0;
            return;
        }

        self.frame_time += dt;
        if self.frame_time >= PLAYER_FRAME_DURATION {
            self.frame = (self.frame + 1) % PLAYER_WALK_FRAMES;
            self.frame_time = 0.0;
        }

        // Vertical wins ties
        self.facing = if vel.y.abs() >= vel.x.abs() {
            if vel.y > 0.0 { Facing::Down } else { Facing::Up }
        } else if vel.x > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        };
    }
}

/// The player-controlled farmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub vel: Vec2,
    pub speed: f32,
    pub anim: WalkAnim,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_START_X, PLAYER_START_Y)
    }
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            speed: PLAYER_SPEED,
            anim: WalkAnim::default(),
        }
    }

    /// Set velocity from the held direction keys
    pub fn apply_input(&mut self, dirs: Directions) {
        self.vel = dirs.axis() * self.speed;
    }

    /// Move by `vel * dt`, clamped to the field.
    ///
    /// If the destination overlaps a static obstacle the whole step is
    /// discarded, clamp included. Moving obstacles never block.
    pub fn advance(&mut self, dt: f32, obstacles: &[Obstacle], field: Vec2) {
        self.anim.update(self.vel, dt);

        let old = self.body.pos;
        let size = self.body.size();
        let next = old + self.vel * dt;
        self.body.pos = Vec2::new(
            clamp(next.x, 0.0, field.x - size.x),
            clamp(next.y, 0.0, field.y - size.y),
        );

        let me = self.body.aabb();
        let blocked = obstacles
            .iter()
            .filter(|o| o.blocks_movement())
            .any(|o| overlaps(&me, &o.body.aabb()));
        if blocked {
            self.body.pos = old;
        }
    }

    pub fn sprite(&self) -> SpriteKind {
        SpriteKind::Player {
            facing: self.anim.facing,
            frame: self.anim.frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> Vec2 {
        Vec2::new(FIELD_WIDTH, FIELD_HEIGHT)
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut p = Player::default();
        p.apply_input(Directions {
            left: true,
            right: true,
            up: true,
            down: false,
        });
        assert_eq!(p.vel, Vec2::new(0.0, -PLAYER_SPEED));
    }

    #[test]
    fn test_clamped_to_field() {
        let mut p = Player::new(5.0, 5.0);
        p.apply_input(Directions {
            left: true,
            up: true,
            ..Default::default()
        });
        p.advance(1.0, &[], field());
        assert_eq!(p.body.pos, Vec2::ZERO);

        let mut p = Player::new(FIELD_WIDTH - 40.0, FIELD_HEIGHT - 40.0);
        p.apply_input(Directions {
            right: true,
            down: true,
            ..Default::default()
        });
        p.advance(1.0, &[], field());
        assert_eq!(
            p.body.pos,
            Vec2::new(FIELD_WIDTH - PLAYER_WIDTH, FIELD_HEIGHT - PLAYER_HEIGHT)
        );
    }

    #[test]
    fn test_scarecrow_rolls_back_whole_move() {
        let scarecrow = Obstacle::scarecrow(100.0, 0.0);
        let mut p = Player::new(60.0, 0.0);
        // Diagonal move: x would hit the scarecrow, y alone would be free
        p.apply_input(Directions {
            right: true,
            down: true,
            ..Default::default()
        });
        p.advance(0.1, &[scarecrow], field());
        assert_eq!(p.body.pos, Vec2::new(60.0, 0.0));
    }

    #[test]
    fn test_crow_does_not_block() {
        let crow = Obstacle::crow(100.0, 0.0, 150.0);
        let mut p = Player::new(60.0, 0.0);
        p.apply_input(Directions {
            right: true,
            ..Default::default()
        });
        p.advance(0.1, &[crow], field());
        assert!((p.body.pos.x - 86.0).abs() < 1e-3);
        assert_eq!(p.body.pos.y, 0.0);
    }

    #[test]
    fn test_walk_anim_prefers_vertical_on_tie() {
        let mut anim = WalkAnim::default();
        anim.update(Vec2::new(260.0, -260.0), 0.01);
        assert_eq!(anim.facing, Facing::Up);
        anim.update(Vec2::new(-260.0, 0.0), 0.01);
        assert_eq!(anim.facing, Facing::Left);
    }

    #[test]
    fn test_walk_anim_cycles_and_resets() {
        let mut anim = WalkAnim::default();
        for _ in 0..4 {
            anim.update(Vec2::new(260.0, 0.0), 0.16);
        }
        assert_eq!(anim.frame, 0); // wrapped after four frames
        anim.update(Vec2::new(260.0, 0.0), 0.16);
        assert_eq!(anim.frame, 1);
        anim.update(Vec2::ZERO, 0.16);
        assert_eq!(anim.frame, 0);
        assert!(!anim.moving);
    }

    fn any_dirs() -> impl Strategy<Value = Directions> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(left, right, up, down)| Directions {
                left,
                right,
                up,
                down,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_field(
            x in 0.0f32..(FIELD_WIDTH - PLAYER_WIDTH),
            y in 0.0f32..(FIELD_HEIGHT - PLAYER_HEIGHT),
            dirs in any_dirs(),
            dt in 0.0f32..5.0,
        ) {
            let mut p = Player::new(x, y);
            p.apply_input(dirs);
            p.advance(dt, &[], field());
            prop_assert!(p.body.pos.x >= 0.0 && p.body.pos.x <= FIELD_WIDTH - PLAYER_WIDTH);
            prop_assert!(p.body.pos.y >= 0.0 && p.body.pos.y <= FIELD_HEIGHT - PLAYER_HEIGHT);
        }

        #[test]
        fn prop_player_never_ends_inside_scarecrow(
            x in 0.0f32..(FIELD_WIDTH - PLAYER_WIDTH),
            y in 0.0f32..(FIELD_HEIGHT - PLAYER_HEIGHT),
            vx in -2000.0f32..2000.0,
            vy in -2000.0f32..2000.0,
            dt in 0.0f32..0.5,
        ) {
            let scarecrow = Obstacle::scarecrow(400.0, 300.0);
            let mut p = Player::new(x, y);
            prop_assume!(!overlaps(&p.body.aabb(), &scarecrow.body.aabb()));
            p.vel = Vec2::new(vx, vy);
            let obstacles = [scarecrow];
            p.advance(dt, &obstacles, field());
            prop_assert!(!overlaps(&p.body.aabb(), &obstacles[0].body.aabb()));
        }
    }
}
