//! Data-driven level table
//!
//! Loaded once (from `config.json` on disk or over `fetch` in the browser)
//! and never mutated afterwards. Any failure falls back to the built-in
//! three-level table.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    /// Score needed to clear the level
    pub goal: u32,
    /// Round length (seconds)
    pub time_limit: f32,
    /// Base crop spawn interval (seconds)
    pub spawn_rate: f32,
    /// Crow spawn interval (seconds)
    pub crow_rate: f32,
}

/// Ordered per-level parameters; index 0 is level 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable(Vec<LevelConfig>);

impl LevelTable {
    /// Number of configured levels
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a level by its 1-based number
    pub fn get(&self, level: u32) -> Option<&LevelConfig> {
        let idx = (level as usize).checked_sub(1)?;
        self.0.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.0.iter()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self(vec![
            LevelConfig {
                goal: 15,
                time_limit: 60.0,
                spawn_rate: 0.8,
                crow_rate: 5.0,
            },
            LevelConfig {
                goal: 30,
                time_limit: 60.0,
                spawn_rate: 0.6,
                crow_rate: 4.0,
            },
            LevelConfig {
                goal: 45,
                time_limit: 60.0,
                spawn_rate: 0.4,
                crow_rate: 3.0,
            },
        ])
    }
}

fn default_scarecrow_positions() -> Vec<[f32; 2]> {
    vec![[200.0, 220.0], [650.0, 160.0], [400.0, 300.0], [100.0, 400.0]]
}

/// Everything the game reads from its config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tuning {
    pub levels: LevelTable,
    /// Scarecrow slots; level N uses the first N+1
    #[serde(default = "default_scarecrow_positions")]
    pub scarecrow_positions: Vec<[f32; 2]>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            levels: LevelTable::default(),
            scarecrow_positions: default_scarecrow_positions(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to fetch config: {0}")]
    Fetch(String),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config has no levels")]
    Empty,
    #[error("level {level} is invalid: {reason}")]
    InvalidLevel { level: usize, reason: &'static str },
}

impl Tuning {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read a config file, falling back to the built-in table on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(tuning) => {
                log::info!(
                    "Loaded {} levels from {}",
                    tuning.levels.len(),
                    path.display()
                );
                tuning
            }
            Err(e) => Self::fallback(e),
        }
    }

    /// Log why a load failed and hand back the defaults
    pub fn fallback(err: TuningError) -> Self {
        log::warn!("Config load failed, using defaults: {}", err);
        Self::default()
    }

    fn validate(&self) -> Result<(), TuningError> {
        if self.levels.is_empty() {
            return Err(TuningError::Empty);
        }
        for (i, lvl) in self.levels.iter().enumerate() {
            let level = i + 1;
            let reason = if lvl.goal == 0 {
                Some("goal must be at least 1")
            } else if !(lvl.time_limit.is_finite() && lvl.time_limit > 0.0) {
                Some("timeLimit must be a positive number of seconds")
            } else if !(lvl.spawn_rate.is_finite() && lvl.spawn_rate > 0.0) {
                Some("spawnRate must be a positive number of seconds")
            } else if !(lvl.crow_rate.is_finite() && lvl.crow_rate > 0.0) {
                Some("crowRate must be a positive number of seconds")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(TuningError::InvalidLevel { level, reason });
            }
        }
        Ok(())
    }
}
