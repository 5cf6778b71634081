//! HUD text projection
//!
//! Pure functions of the session state; hosts write the strings into
//! whatever display elements they have.

use crate::sim::{GamePhase, GameState};

/// Text for the four HUD slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    /// Current score
    pub score: String,
    /// Whole seconds left, rounded up
    pub time: String,
    /// `"<score>/<target>"`
    pub goal: String,
    pub status: String,
}

/// Project the session onto the HUD
pub fn hud(state: &GameState) -> HudText {
    HudText {
        score: state.score.to_string(),
        time: format!("{}", state.time_left.max(0.0).ceil() as u32),
        goal: format!("{}/{}", state.score, state.goal),
        status: state.status.clone(),
    }
}

/// Labels painted over the field in the top-left corner, one per line
pub fn overlay_lines(state: &GameState) -> Vec<String> {
    match state.phase {
        GamePhase::Menu => vec!["Press Start to play".to_string()],
        GamePhase::Playing => vec![format!("Level {}", state.level)],
        GamePhase::Paused => vec![
            format!("Level {}", state.level),
            "Paused (press P to resume)".to_string(),
        ],
        GamePhase::GameOver => vec!["Time up! Press Reset to return to Menu".to_string()],
        GamePhase::Win => {
            vec!["All levels complete! Press Reset for another round".to_string()]
        }
    }
}
