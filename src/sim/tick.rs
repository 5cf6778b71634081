//! Per-frame simulation step
//!
//! One call per rendered frame. The order of the steps below is part of the
//! game's behavior: reordering them changes which spawns and hits land on
//! a given frame.

use glam::Vec2;

use super::collision::overlaps;
use super::crop::spawn_crop;
use super::obstacle::spawn_crow;
use super::player::Directions;
use super::state::{GameEvent, GamePhase, GameState};
use crate::clamp;
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional keys currently held
    pub dirs: Directions,
    /// Pause toggle (edge, consumed by this tick)
    pub pause: bool,
    /// Steer toward the nearest crop instead of reading `dirs`
    pub autopilot: bool,
}

/// Crop spawn interval after the in-round difficulty ramp.
///
/// Shrinks linearly from `base` toward `base - SPAWN_RAMP` as the round
/// progresses, never below `MIN_SPAWN_INTERVAL` and never above `base`.
pub fn effective_spawn_interval(base: f32, time_left: f32, time_limit: f32) -> f32 {
    let progress = if time_limit > 0.0 {
        1.0 - time_left / time_limit
    } else {
        1.0
    };
    clamp(base - SPAWN_RAMP * progress, MIN_SPAWN_INTERVAL, base)
}

/// Advance the session by `dt` seconds. Does nothing outside Playing.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.toggle_pause();
    }
    if state.phase != GamePhase::Playing {
        return;
    }
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.time_ticks += 1;

    // 1. Countdown; a timeout always loses
    let time_limit = state.time_limit();
    state.time_left = clamp(state.time_left - dt, 0.0, time_limit);
    if state.time_left <= 0.0 {
        state.phase = GamePhase::GameOver;
        state.status = "Time's Up! Game Over".to_string();
        state.events.push(GameEvent::TimeUp);
        log::info!("Time up on level {} with score {}", state.level, state.score);
        return;
    }

    // 2. Player
    let dirs = if input.autopilot {
        autopilot(state)
    } else {
        input.dirs
    };
    state.player.apply_input(dirs);
    state.player.advance(dt, &state.obstacles, state.field);

    // 3. Crow spawns
    state.crow_accum += dt;
    while state.crow_accum >= state.crow_interval {
        state.crow_accum -= state.crow_interval;
        let crow = spawn_crow(&mut state.rng, state.field.x);
        log::debug!("Crow spawned at x={:.0}", crow.body.pos.x);
        state.obstacles.push(crow);
    }

    // 4. Move crows
    for obstacle in &mut state.obstacles {
        obstacle.advance(dt, state.field.x);
    }

    // 5. Crow hits: penalty and respawn per crow
    let me = state.player.body.aabb();
    for obstacle in state.obstacles.iter_mut().filter(|o| o.is_crow()) {
        if overlaps(&me, &obstacle.body.aabb()) {
            state.score = state.score.saturating_sub(CROW_PENALTY);
            state.events.push(GameEvent::CrowHit {
                penalty: CROW_PENALTY,
            });
            obstacle.respawn(&mut state.rng, state.field.x);
        }
    }

    // 6. Difficulty ramp
    let base = state.level_config().map(|l| l.spawn_rate).unwrap_or(state.spawn_interval);
    state.spawn_interval = effective_spawn_interval(base, state.time_left, time_limit);

    // 7. Crop spawns
    state.crop_accum += dt;
    while state.crop_accum >= state.spawn_interval {
        state.crop_accum -= state.spawn_interval;
        let crop = spawn_crop(&mut state.rng, state.field, TILE);
        log::debug!(
            "{} spawned at ({:.0}, {:.0})",
            crop.kind.as_str(),
            crop.body.pos.x,
            crop.body.pos.y
        );
        state.crops.push(crop);
    }

    // 8. Collection
    let mut collected = 0;
    for crop in &mut state.crops {
        if overlaps(&me, &crop.body.aabb()) {
            crop.body.dead = true;
            state.score += crop.points();
            state.events.push(GameEvent::CropCollected {
                kind: crop.kind,
                points: crop.points(),
            });
            collected += 1;
        }
    }
    state.crops.retain(|c| !c.body.dead);

    // 9. Goal check, only when something was collected this tick
    if collected > 0 && state.score >= state.goal {
        state.advance_level();
    }

    // 10. Crop animation
    for crop in &mut state.crops {
        crop.update(dt);
    }
}

/// Head for the nearest crop, or stand still when the field is empty
fn autopilot(state: &GameState) -> Directions {
    let size = state.player.body.size();
    let center = state.player.body.pos + size * 0.5;
    let Some(target) = state
        .crops
        .iter()
        .map(|c| c.body.pos + c.body.size() * 0.5)
        .min_by(|a, b| {
            a.distance_squared(center)
                .partial_cmp(&b.distance_squared(center))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    else {
        return Directions::default();
    };

    // Dead zone keeps the farmer from jittering around the target
    let delta: Vec2 = target - center;
    let dead_zone = 4.0;
    Directions {
        left: delta.x < -dead_zone,
        right: delta.x > dead_zone,
        up: delta.y < -dead_zone,
        down: delta.y > dead_zone,
    }
}
