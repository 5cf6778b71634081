//! Game session state and phase machine
//!
//! The session owns every entity, both spawn accumulators, the score and the
//! level index. Nothing outside `sim` mutates it except through `start`,
//! `reset`, `toggle_pause`, `apply_tuning` and `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::crop::{Crop, CropKind};
use super::obstacle::Obstacle;
use super::player::Player;
use crate::consts::*;
use crate::tuning::{LevelConfig, Tuning};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for Start
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-round
    Paused,
    /// Timer ran out
    GameOver,
    /// Cleared the last configured level
    Win,
}

/// Things that happened during a tick or transition, for hosts to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh round began; hosts re-sample their frame clock
    RoundStarted { level: u32 },
    CropCollected { kind: CropKind, points: u32 },
    CrowHit { penalty: u32 },
    LevelAdvanced { level: u32 },
    Won,
    TimeUp,
}

/// Result of pressing Start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Full reset, now playing
    Started,
    /// Left pause without resetting
    Resumed,
    /// Config still loading; call again later
    Deferred,
    /// Already playing
    Ignored,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Level table and scarecrow slots
    pub(crate) tuning: Tuning,
    /// Set once the config source has resolved (successfully or not)
    pub(crate) config_ready: bool,
    /// Playfield size
    pub field: Vec2,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: u32,
    /// Score needed to clear the current level
    pub goal: u32,
    /// Seconds left in the round, within [0, time limit]
    pub time_left: f32,
    /// Effective crop spawn interval after the difficulty ramp
    pub spawn_interval: f32,
    /// Crow spawn interval for the current level
    pub crow_interval: f32,
    pub(crate) crop_accum: f32,
    pub(crate) crow_accum: f32,
    pub player: Player,
    pub crops: Vec<Crop>,
    /// Scarecrows and crows
    pub obstacles: Vec<Obstacle>,
    /// Status line shown by the HUD
    pub status: String,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
    /// Simulation ticks run in the current session
    pub time_ticks: u64,
}

impl GameState {
    /// Create a session in the Menu phase using the built-in level table.
    ///
    /// The config is not considered loaded until `apply_tuning` is called.
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning: Tuning::default(),
            config_ready: false,
            field: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            phase: GamePhase::Menu,
            level: 1,
            score: 0,
            goal: 0,
            time_left: 0.0,
            spawn_interval: 0.0,
            crow_interval: 0.0,
            crop_accum: 0.0,
            crow_accum: 0.0,
            player: Player::default(),
            crops: Vec::new(),
            obstacles: Vec::new(),
            status: String::new(),
            events: Vec::new(),
            time_ticks: 0,
        };
        state.reset();
        state
    }

    /// Create a session whose config is already resolved
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self::new(seed);
        state.apply_tuning(tuning);
        state
    }

    /// Install the resolved config and mark it ready.
    ///
    /// Only the Menu screen is refreshed; a round in progress keeps its
    /// parameters until the next reset.
    pub fn apply_tuning(&mut self, tuning: Tuning) {
        log::info!("Config ready ({} levels)", tuning.levels.len());
        self.tuning = tuning;
        self.config_ready = true;
        if self.phase == GamePhase::Menu {
            self.reset();
        }
    }

    pub fn config_ready(&self) -> bool {
        self.config_ready
    }

    /// Number of configured levels
    pub fn level_count(&self) -> usize {
        self.tuning.levels.len()
    }

    /// Parameters of the current level
    pub fn level_config(&self) -> Option<&LevelConfig> {
        self.tuning.levels.get(self.level)
    }

    /// Round length of the current level
    pub fn time_limit(&self) -> f32 {
        self.level_config().map(|l| l.time_limit).unwrap_or(0.0)
    }

    /// Start from Menu/GameOver/Win (full reset) or resume from Paused
    pub fn start(&mut self) -> StartOutcome {
        if !self.config_ready {
            self.status = "Loading config...".to_string();
            log::debug!("Start deferred until config is loaded");
            return StartOutcome::Deferred;
        }
        match self.phase {
            GamePhase::Menu | GamePhase::GameOver | GamePhase::Win => {
                self.reset();
                self.phase = GamePhase::Playing;
                self.status = "Playing…".to_string();
                log::info!("Game started (level {})", self.level);
                StartOutcome::Started
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.status = "Playing…".to_string();
                log::info!("Resumed");
                StartOutcome::Resumed
            }
            GamePhase::Playing => StartOutcome::Ignored,
        }
    }

    /// Return to the Menu with a fresh level-1 session
    pub fn reset(&mut self) {
        self.full_reset();
        self.phase = GamePhase::Menu;
        self.status = "Menu".to_string();
        log::info!("Reset to menu");
    }

    /// Playing <-> Paused; ignored in every other phase
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.status = "Paused".to_string();
                log::info!("Paused");
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.status = "Playing…".to_string();
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of scarecrows currently on the field
    pub fn scarecrow_count(&self) -> usize {
        self.obstacles.iter().filter(|o| o.blocks_movement()).count()
    }

    /// Number of crows currently on the field
    pub fn crow_count(&self) -> usize {
        self.obstacles.iter().filter(|o| o.is_crow()).count()
    }
}
