//! Fixed timestep game tick
//!
//! Single entry point that advances the whole game by one step: character
//! movement, every live falling object, the spawn and difficulty timers,
//! catch resolution and the end-of-run transition. The periodic timers are
//! in-state millisecond accumulators, so a paused game receives no ticks
//! and therefore preserves deadlines, difficulty and object positions
//! exactly until resume.

use super::character;
use super::falling::{self, ObjectFate};
use super::state::{GameEvent, GamePhase, GameState, SoundEffect};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held keyboard direction
    pub direction: super::state::InputDirection,
    /// Absolute pointer position over the field (pointer control mode)
    pub pointer_x: Option<f32>,
    /// Pointer movement since the last frame (touch drag)
    pub pointer_delta: Option<f32>,
    /// Pause/resume toggle (one-shot)
    pub pause: bool,
    /// Start or restart the game (one-shot)
    pub start: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.start {
        match state.phase {
            GamePhase::Idle | GamePhase::Ended | GamePhase::Paused => state.start(),
            GamePhase::Running => {}
        }
    }

    if input.pause {
        match state.phase {
            GamePhase::Running => state.pause(),
            GamePhase::Paused => state.resume(),
            _ => {}
        }
    }

    // Any tick outside Running is a no-op, not an error
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    let geometry = state.geometry;
    let tuning = state.tuning.clone();

    character::tick(
        &mut state.character,
        input,
        state.controls,
        &geometry,
        &tuning,
        dt,
    );

    // Advance every live object against the character's current hitbox.
    // Removed objects (caught or exited) are never touched again.
    let character_box = state.character.aabb(&geometry);
    let mut good_catches = 0u32;
    let mut bad_catches = 0u32;
    let mut missed_goods = 0u32;

    let mut objects = std::mem::take(&mut state.objects);
    objects.retain_mut(|object| {
        match falling::tick(object, &character_box, &geometry, &tuning, dt) {
            ObjectFate::Continue => true,
            ObjectFate::Exited => {
                if object.kind.is_good() {
                    missed_goods += 1;
                }
                false
            }
            ObjectFate::Caught => {
                if object.kind.is_good() {
                    good_catches += 1;
                } else {
                    bad_catches += 1;
                }
                false
            }
        }
    });
    state.objects = objects;

    state.missed_good += missed_goods;
    for _ in 0..good_catches {
        state.score += tuning.catch_reward;
        state.push_event(GameEvent::Sound(SoundEffect::GoodCatch));
    }
    for _ in 0..bad_catches {
        state.missed_bad += 1;
        state.push_event(GameEvent::Sound(SoundEffect::BadCatch));
    }

    if state.missed_bad >= tuning.miss_limit {
        state.finish();
        return;
    }

    // Difficulty ramp timer
    state.ramp_elapsed_ms += dt * 1000.0;
    if state.ramp_elapsed_ms >= tuning.ramp_period_ms {
        state.ramp_elapsed_ms -= tuning.ramp_period_ms;
        if state.difficulty.ramp(&tuning) {
            // The shrunk interval takes effect against the already
            // accumulated spawn time below - no waiting for the old
            // deadline to fire
            log::debug!(
                "spawn interval rescheduled to {}ms",
                state.difficulty.spawn_interval_ms
            );
        }
    }

    // Spawn timer, evaluated against the current (possibly just-shrunk)
    // interval
    state.spawn_elapsed_ms += dt * 1000.0;
    while state.spawn_elapsed_ms >= state.difficulty.spawn_interval_ms {
        state.spawn_elapsed_ms -= state.difficulty.spawn_interval_ms;
        let id = state.next_entity_id();
        let object = falling::spawn(id, &state.difficulty, &geometry, &mut state.rng);
        state.objects.push(object);
    }
}
