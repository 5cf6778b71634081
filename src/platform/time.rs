//! Frame timing
//!
//! Turns host timestamps (milliseconds, e.g. the rAF argument) into a
//! clamped `dt` in seconds.

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous frame, clamped to `[0, max_dt]`.
    /// The first frame after construction or `resync` yields 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, self.max_dt)
    }

    /// Forget the previous timestamp so a new round starts from zero
    pub fn resync(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = FrameClock::default();
        clock.delta(0.0);
        assert_eq!(clock.delta(5000.0), MAX_FRAME_DT);
        // Clock going backwards never yields a negative step
        assert_eq!(clock.delta(4000.0), 0.0);
    }

    #[test]
    fn test_resync() {
        let mut clock = FrameClock::default();
        clock.delta(0.0);
        clock.resync();
        assert_eq!(clock.delta(20.0), 0.0);
    }
}
