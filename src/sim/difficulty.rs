//! Escalating difficulty
//!
//! Three independent monotone adjustments, each clamped to its cap.
//! Once a field hits its cap further ramps leave it unchanged.

use crate::tuning::Tuning;

/// Difficulty values read by spawn logic and falling-object animation.
/// Mutated only by [`DifficultyState::ramp`] on the ramp period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyState {
    /// Fall speed for newly spawned objects (px/s), `[initial, max]`
    pub fall_speed: f32,
    /// Time between spawns (ms), decreasing toward the floor
    pub spawn_interval_ms: f32,
    /// Chance a spawn is rotten, `[initial, max]`
    pub bad_probability: f32,
}

impl DifficultyState {
    /// Values at the start of a run
    pub fn initial(tuning: &Tuning) -> Self {
        Self {
            fall_speed: tuning.initial_fall_speed,
            spawn_interval_ms: tuning.initial_spawn_interval_ms,
            bad_probability: tuning.initial_bad_probability,
        }
    }

    /// Apply one ramp step. Returns `true` when the spawn interval
    /// changed, so the caller can reschedule the pending spawn deadline
    /// in place instead of waiting for the old interval to elapse.
    pub fn ramp(&mut self, tuning: &Tuning) -> bool {
        self.fall_speed = (self.fall_speed + tuning.fall_speed_step).min(tuning.max_fall_speed);
        self.bad_probability =
            (self.bad_probability + tuning.bad_probability_step).min(tuning.max_bad_probability);

        let old_interval = self.spawn_interval_ms;
        self.spawn_interval_ms = (self.spawn_interval_ms - tuning.spawn_interval_step_ms)
            .max(tuning.min_spawn_interval_ms);
        self.spawn_interval_ms != old_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ramp_moves_all_fields() {
        let tuning = Tuning::default();
        let mut d = DifficultyState::initial(&tuning);
        let before = d;
        d.ramp(&tuning);
        assert!(d.fall_speed > before.fall_speed);
        assert!(d.spawn_interval_ms < before.spawn_interval_ms);
        assert!(d.bad_probability > before.bad_probability);
    }

    #[test]
    fn test_twenty_ramps_reach_all_caps() {
        let tuning = Tuning::default();
        let mut d = DifficultyState::initial(&tuning);
        for _ in 0..20 {
            d.ramp(&tuning);
        }
        assert_eq!(d.fall_speed, tuning.max_fall_speed);
        assert_eq!(d.spawn_interval_ms, tuning.min_spawn_interval_ms);
        assert_eq!(d.bad_probability, tuning.max_bad_probability);
    }

    #[test]
    fn test_capped_ramp_is_noop_and_reports_no_reschedule() {
        let tuning = Tuning::default();
        let mut d = DifficultyState::initial(&tuning);
        for _ in 0..100 {
            d.ramp(&tuning);
        }
        let capped = d;
        let rescheduled = d.ramp(&tuning);
        assert_eq!(d, capped);
        assert!(!rescheduled);
    }

    proptest! {
        #[test]
        fn prop_monotone_and_bounded(ramps in 0usize..200) {
            let tuning = Tuning::default();
            let mut d = DifficultyState::initial(&tuning);
            let mut prev = d;
            for _ in 0..ramps {
                d.ramp(&tuning);
                prop_assert!(d.fall_speed >= prev.fall_speed);
                prop_assert!(d.spawn_interval_ms <= prev.spawn_interval_ms);
                prop_assert!(d.bad_probability >= prev.bad_probability);
                prop_assert!(d.fall_speed <= tuning.max_fall_speed);
                prop_assert!(d.spawn_interval_ms >= tuning.min_spawn_interval_ms);
                prop_assert!(d.bad_probability <= tuning.max_bad_probability);
                prev = d;
            }
        }
    }
}
