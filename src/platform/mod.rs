//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Keyboard state (held directions, pause edge)
//! - Frame timing (delta clamp, re-sync on new rounds)
//! - Browser event listeners with guaranteed removal (wasm32)

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod input;
pub mod time;

pub use input::KeyTracker;
pub use time::FrameClock;
