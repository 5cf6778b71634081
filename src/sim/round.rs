//! Round lifecycle: full reset, round reset and level advance

use super::obstacle::place_scarecrows;
use super::player::Player;
use super::state::{GameEvent, GamePhase, GameState};

impl GameState {
    /// Back to level 1 with an empty field (phase is left to the caller)
    pub(crate) fn full_reset(&mut self) {
        self.level = 1;
        self.score = 0;
        self.player = Player::default();
        self.crops.clear();
        self.obstacles.clear();
        self.time_ticks = 0;
        self.load_level_params();
        let count = self.scarecrows_for_level();
        place_scarecrows(&mut self.obstacles, &self.tuning.scarecrow_positions, count);
        self.events.push(GameEvent::RoundStarted { level: self.level });
    }

    /// Fresh timer, no crops or crows, scarecrows topped up for the new level.
    /// The farmer walks back to the start point so a new scarecrow can't land on them.
    pub(crate) fn round_reset(&mut self) {
        self.player = Player::default();
        self.crops.clear();
        self.obstacles.retain(|o| o.blocks_movement());
        self.load_level_params();
        let count = self.scarecrows_for_level();
        place_scarecrows(&mut self.obstacles, &self.tuning.scarecrow_positions, count);
        self.events.push(GameEvent::RoundStarted { level: self.level });
    }

    /// Move to the next level, or to Win past the last configured one
    pub(crate) fn advance_level(&mut self) {
        self.level += 1;
        if self.level as usize > self.level_count() {
            self.phase = GamePhase::Win;
            self.status = "All Levels Complete! You Win!".to_string();
            self.events.push(GameEvent::Won);
            log::info!("All levels complete with score {}", self.score);
            return;
        }
        self.status = format!("Level {} Started!", self.level);
        self.events.push(GameEvent::LevelAdvanced { level: self.level });
        log::info!("Advanced to level {} (score {})", self.level, self.score);
        self.round_reset();
    }

    /// Scarecrows on the field during the current level: level + 1
    fn scarecrows_for_level(&self) -> usize {
        self.level as usize + 1
    }

    /// Pull goal, timer and spawn intervals from the current level's config
    fn load_level_params(&mut self) {
        let Some(cfg) = self.level_config().copied() else {
            log::error!("No config for level {}", self.level);
            return;
        };
        self.goal = cfg.goal;
        self.time_left = cfg.time_limit;
        self.spawn_interval = cfg.spawn_rate;
        self.crow_interval = cfg.crow_rate;
        self.crop_accum = 0.0;
        self.crow_accum = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::crop::{Crop, CropKind};
    use crate::sim::obstacle::Obstacle;
    use crate::tuning::Tuning;

    fn playing() -> GameState {
        let mut state = GameState::with_tuning(5, Tuning::default());
        state.start();
        state
    }

    #[test]
    fn test_full_reset_places_level_one_scarecrows() {
        let mut state = playing();
        state.level = 3;
        state.advance_level(); // -> Win
        state.reset();
        assert_eq!(state.level, 1);
        assert_eq!(state.scarecrow_count(), 2);
        assert_eq!(state.crow_count(), 0);
        assert!(state.crops.is_empty());
        assert_eq!(state.crop_accum, 0.0);
        assert_eq!(state.crow_accum, 0.0);
        assert_eq!(state.time_left, 60.0);
    }

    #[test]
    fn test_round_reset_keeps_scarecrows_and_adds_one() {
        let mut state = playing();
        state.crops.push(Crop::new(60.0, 60.0, CropKind::Pumpkin, 0.0));
        state.obstacles.push(Obstacle::crow(10.0, 50.0, 120.0));
        state.crop_accum = 0.3;
        state.crow_accum = 2.0;
        state.time_left = 4.0;
        let before: Vec<_> = state
            .obstacles
            .iter()
            .filter(|o| o.blocks_movement())
            .map(|o| o.body.pos)
            .collect();

        state.score = 16;
        state.advance_level();

        assert_eq!(state.level, 2);
        assert_eq!(state.goal, 30);
        assert_eq!(state.score, 16);
        assert_eq!(state.time_left, 60.0);
        assert!(state.crops.is_empty());
        assert_eq!(state.crow_count(), 0);
        assert_eq!(state.scarecrow_count(), 3);
        assert_eq!(state.crop_accum, 0.0);
        assert_eq!(state.crow_accum, 0.0);
        assert_eq!(state.spawn_interval, 0.6);
        assert_eq!(state.crow_interval, 4.0);
        let after: Vec<_> = state
            .obstacles
            .iter()
            .filter(|o| o.blocks_movement())
            .map(|o| o.body.pos)
            .collect();
        assert_eq!(&after[..2], &before[..]);
        assert_eq!(state.status, "Level 2 Started!");
    }

    #[test]
    fn test_advance_past_last_level_wins() {
        let mut state = playing();
        state.level = 3;
        let crops_before = state.crops.len();
        state.advance_level();
        assert_eq!(state.phase, GamePhase::Win);
        assert_eq!(state.level, 4);
        // No round reset on the way out
        assert_eq!(state.scarecrow_count(), 2);
        assert_eq!(state.crops.len(), crops_before);
        assert!(state.events.contains(&GameEvent::Won));
    }

    #[test]
    fn test_single_level_config_wins_on_first_advance() {
        let tuning = Tuning::from_json(
            r#"{ "levels": [ { "goal": 3, "timeLimit": 20, "spawnRate": 0.5, "crowRate": 2 } ] }"#,
        )
        .unwrap();
        let mut state = GameState::with_tuning(5, tuning);
        state.start();
        state.advance_level();
        assert_eq!(state.phase, GamePhase::Win);
    }
}
