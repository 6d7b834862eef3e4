//! Data-driven game balance
//!
//! All gameplay numbers live here so variants can be tried without code
//! changes. Defaults were tuned at a 60 Hz reference rate; per-frame
//! quantities are expressed per second.

use serde::{Deserialize, Serialize};

/// Balance values for a single game variant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Character movement (keyboard mode) ===
    /// Acceleration while a direction is held (px/s²)
    pub character_accel: f32,
    /// Velocity cap in either direction (px/s)
    pub character_max_speed: f32,
    /// Per-frame velocity retention when no direction is held
    /// (applied as `friction^(dt·60)`)
    pub character_friction: f32,
    /// Pointer-delta multiplier (touch drag mode)
    pub drag_factor: f32,

    // === Falling objects ===
    /// Fall speed at the start of a run (px/s)
    pub initial_fall_speed: f32,
    /// Fall speed cap (px/s)
    pub max_fall_speed: f32,
    /// Fall speed added per difficulty ramp (px/s)
    pub fall_speed_step: f32,
    /// Rotation rate while falling (degrees/s, cosmetic)
    pub rotation_rate: f32,

    // === Spawning ===
    /// Time between spawns at the start of a run (ms)
    pub initial_spawn_interval_ms: f32,
    /// Spawn interval floor (ms)
    pub min_spawn_interval_ms: f32,
    /// Interval removed per difficulty ramp (ms)
    pub spawn_interval_step_ms: f32,
    /// Chance a spawn is a rotten item at the start of a run
    pub initial_bad_probability: f32,
    /// Rotten-item probability cap
    pub max_bad_probability: f32,
    /// Probability added per difficulty ramp
    pub bad_probability_step: f32,

    // === Difficulty ramp ===
    /// Time between difficulty ramps (ms)
    pub ramp_period_ms: f32,

    // === Scoring ===
    /// Points per good catch
    pub catch_reward: u32,
    /// Rotten catches that end the run
    pub miss_limit: u32,
    /// Inward hitbox padding for the catch test (px)
    pub collision_padding: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            character_accel: 1080.0,
            character_max_speed: 360.0,
            character_friction: 0.8,
            drag_factor: 0.5,

            initial_fall_speed: 120.0,
            max_fall_speed: 480.0,
            fall_speed_step: 30.0,
            rotation_rate: 432.0,

            initial_spawn_interval_ms: 1400.0,
            min_spawn_interval_ms: 700.0,
            spawn_interval_step_ms: 50.0,
            initial_bad_probability: 0.2,
            max_bad_probability: 0.5,
            bad_probability_step: 0.05,

            ramp_period_ms: 5000.0,

            catch_reward: 10,
            miss_limit: 3,
            collision_padding: 10.0,
        }
    }
}

impl Tuning {
    /// Parse a tuning override from JSON; missing fields keep defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(tuning) => Some(tuning),
            Err(e) => {
                log::warn!("Ignoring invalid tuning JSON: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{"catch_reward": 25}"#).expect("valid json");
        assert_eq!(t.catch_reward, 25);
        assert_eq!(t.miss_limit, Tuning::default().miss_limit);
    }

    #[test]
    fn test_invalid_json_is_none() {
        assert!(Tuning::from_json("not json").is_none());
    }
}
