//! Keyboard tracking
//!
//! Hosts forward raw key names (DOM `KeyboardEvent.key` values) and read
//! back one `TickInput` per frame.

use std::collections::HashSet;

use crate::sim::{Directions, TickInput};

/// Keys currently held plus edge-triggered toggles
#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    held: HashSet<String>,
    pause_pending: bool,
    autopilot: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat presses of a held key do not
    /// re-trigger toggles.
    pub fn key_down(&mut self, key: &str) {
        let fresh = self.held.insert(key.to_string());
        if !fresh {
            return;
        }
        match key {
            "p" | "P" => self.pause_pending = true,
            "i" | "I" => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Drop all held keys (focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    fn any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.held.contains(*k))
    }

    /// Arrow keys, with WASD as aliases
    pub fn directions(&self) -> Directions {
        Directions {
            left: self.any(&["ArrowLeft", "a", "A"]),
            right: self.any(&["ArrowRight", "d", "D"]),
            up: self.any(&["ArrowUp", "w", "W"]),
            down: self.any(&["ArrowDown", "s", "S"]),
        }
    }

    /// Snapshot for the next tick; consumes the pause edge
    pub fn take_input(&mut self) -> TickInput {
        TickInput {
            dirs: self.directions(),
            pause: std::mem::take(&mut self.pause_pending),
            autopilot: self.autopilot,
        }
    }
}
