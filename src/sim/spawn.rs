//! Audio-reactive target spawning

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Surface, Target, TargetKind};
use crate::consts::*;

/// Minimum gap between spawns for the current energy window
pub fn spawn_interval_ms(high_energy: bool) -> f64 {
    if high_energy {
        HIGH_ENERGY_SPAWN_INTERVAL_MS
    } else {
        BASE_SPAWN_INTERVAL_MS
    }
}

/// Uniform coordinate inside `[margin, extent - margin]`.
/// Surfaces narrower than two margins get the center line.
fn spawn_coord<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    let span = extent - 2.0 * SPAWN_MARGIN;
    if span <= 0.0 {
        extent / 2.0
    } else {
        SPAWN_MARGIN + rng.random::<f32>() * span
    }
}

/// Append one target unless the cap is reached. Returns the new ID.
pub fn spawn_target(
    state: &mut GameState,
    surface: Surface,
    kind: TargetKind,
    now_ms: f64,
) -> Option<u32> {
    if state.targets.len() >= MAX_TARGETS {
        return None;
    }

    let id = state.next_entity_id();
    let rng = &mut state.rng;

    let pos = Vec2::new(
        spawn_coord(rng, surface.width),
        spawn_coord(rng, surface.height),
    );
    let speed = kind.speed();
    let vel = Vec2::new(
        (rng.random::<f32>() - 0.5) * speed,
        (rng.random::<f32>() - 0.5) * speed,
    );
    let radius = (TARGET_MIN_RADIUS + rng.random::<f32>() * TARGET_RADIUS_SPREAD)
        * kind.size_multiplier();
    let emoji_index = rng.random_range(0..kind.emojis().len());
    let hue = rng.random_range(0..360u16);

    state.targets.push(Target {
        id,
        pos,
        vel,
        radius,
        kind,
        emoji_index,
        hue,
        created_at_ms: now_ms,
    });
    log::debug!("spawned {kind:?} target {id} at ({:.0}, {:.0})", pos.x, pos.y);
    Some(id)
}

/// Spawn if the interval for the current energy window has elapsed.
///
/// The interval clock restarts on every due attempt, including one that
/// finds the field full, so a freed slot waits for the next interval.
pub fn maybe_spawn(
    state: &mut GameState,
    surface: Surface,
    high_energy: bool,
    now_ms: f64,
) -> Option<u32> {
    let due = match state.last_spawn_ms {
        None => true,
        Some(last) => now_ms - last > spawn_interval_ms(high_energy),
    };
    if !due {
        return None;
    }

    state.last_spawn_ms = Some(now_ms);
    spawn_target(state, surface, TargetKind::from_energy(high_energy), now_ms)
}
