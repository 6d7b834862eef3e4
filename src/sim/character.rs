//! Character movement
//!
//! Two control schemes, one authoritative per build (picked in settings):
//! keyboard hold with acceleration/friction physics, or direct pointer
//! positioning that bypasses velocity entirely. Either way the position is
//! clamped to the field. Clamping is positional only - velocity is left
//! alone at the boundary so releasing toward open field feels responsive.

use super::state::{Character, FieldGeometry, InputDirection};
use super::tick::TickInput;
use crate::settings::ControlMode;
use crate::tuning::Tuning;

/// Reference frame rate the friction factor was tuned at
const FRICTION_REFERENCE_HZ: f32 = 60.0;

/// Advance the character by one tick. Pure per-tick function; callers
/// gate on the game phase.
pub fn tick(
    character: &mut Character,
    input: &TickInput,
    controls: ControlMode,
    geometry: &FieldGeometry,
    tuning: &Tuning,
    dt: f32,
) {
    character.direction = input.direction;

    match controls {
        ControlMode::Keys => {
            match input.direction {
                InputDirection::Left => {
                    character.velocity = (character.velocity - tuning.character_accel * dt)
                        .max(-tuning.character_max_speed);
                }
                InputDirection::Right => {
                    character.velocity = (character.velocity + tuning.character_accel * dt)
                        .min(tuning.character_max_speed);
                }
                InputDirection::None => {
                    character.velocity *=
                        tuning.character_friction.powf(dt * FRICTION_REFERENCE_HZ);
                }
            }
            character.position += character.velocity * dt;
        }
        ControlMode::Pointer => {
            if let Some(x) = input.pointer_x {
                // Absolute: center the character under the pointer
                character.position = x - geometry.character_width / 2.0;
            }
            if let Some(delta) = input.pointer_delta {
                // Applied after the absolute position so a same-frame
                // mousemove cannot swallow a touch drag
                character.position += delta * tuning.drag_factor;
            }
            character.velocity = 0.0;
        }
    }

    character.position = character.position.clamp(0.0, geometry.max_character_x());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    fn setup() -> (Character, FieldGeometry, Tuning) {
        let geometry = FieldGeometry::default();
        (Character::centered(&geometry), geometry, Tuning::default())
    }

    fn held(direction: InputDirection) -> TickInput {
        TickInput {
            direction,
            ..TickInput::default()
        }
    }

    #[test]
    fn test_hold_right_accelerates_to_cap() {
        let (mut character, geometry, tuning) = setup();
        for _ in 0..600 {
            tick(
                &mut character,
                &held(InputDirection::Right),
                ControlMode::Keys,
                &geometry,
                &tuning,
                SIM_DT,
            );
        }
        // Long hold pins the character to the right edge at max velocity
        assert_eq!(character.position, geometry.max_character_x());
        assert_eq!(character.velocity, tuning.character_max_speed);
    }

    #[test]
    fn test_release_decays_velocity() {
        let (mut character, geometry, tuning) = setup();
        for _ in 0..10 {
            tick(
                &mut character,
                &held(InputDirection::Right),
                ControlMode::Keys,
                &geometry,
                &tuning,
                SIM_DT,
            );
        }
        let moving = character.velocity;
        assert!(moving > 0.0);
        tick(
            &mut character,
            &held(InputDirection::None),
            ControlMode::Keys,
            &geometry,
            &tuning,
            SIM_DT,
        );
        assert!(character.velocity < moving);
        assert!(character.velocity > 0.0);
    }

    #[test]
    fn test_boundary_clamp_keeps_velocity() {
        let (mut character, geometry, tuning) = setup();
        for _ in 0..600 {
            tick(
                &mut character,
                &held(InputDirection::Left),
                ControlMode::Keys,
                &geometry,
                &tuning,
                SIM_DT,
            );
        }
        assert_eq!(character.position, 0.0);
        // Clamping is positional only; the held velocity survives
        assert_eq!(character.velocity, -tuning.character_max_speed);
    }

    #[test]
    fn test_pointer_absolute_centers_under_pointer() {
        let (mut character, geometry, tuning) = setup();
        let input = TickInput {
            pointer_x: Some(200.0),
            ..TickInput::default()
        };
        tick(
            &mut character,
            &input,
            ControlMode::Pointer,
            &geometry,
            &tuning,
            SIM_DT,
        );
        assert_eq!(character.position, 200.0 - geometry.character_width / 2.0);
        assert_eq!(character.velocity, 0.0);
    }

    #[test]
    fn test_pointer_delta_is_scaled_and_clamped() {
        let (mut character, geometry, tuning) = setup();
        let input = TickInput {
            pointer_delta: Some(-10_000.0),
            ..TickInput::default()
        };
        tick(
            &mut character,
            &input,
            ControlMode::Pointer,
            &geometry,
            &tuning,
            SIM_DT,
        );
        assert_eq!(character.position, 0.0);
    }

    #[test]
    fn test_same_frame_drag_applies_after_absolute_position() {
        let (mut character, geometry, tuning) = setup();
        // A mousemove and a touch drag can land in the same frame; the
        // drag must still move the character
        let input = TickInput {
            pointer_x: Some(300.0),
            pointer_delta: Some(-100.0),
            ..TickInput::default()
        };
        tick(
            &mut character,
            &input,
            ControlMode::Pointer,
            &geometry,
            &tuning,
            SIM_DT,
        );
        assert_eq!(
            character.position,
            300.0 - geometry.character_width / 2.0 - 100.0 * tuning.drag_factor
        );

        // A later delta-only frame keeps moving it
        let before = character.position;
        let drag = TickInput {
            pointer_delta: Some(-40.0),
            ..TickInput::default()
        };
        tick(
            &mut character,
            &drag,
            ControlMode::Pointer,
            &geometry,
            &tuning,
            SIM_DT,
        );
        assert_eq!(character.position, before - 40.0 * tuning.drag_factor);
    }

    proptest! {
        /// Position stays in bounds for any input sequence in either mode
        #[test]
        fn prop_position_always_in_bounds(
            moves in prop::collection::vec(0u8..5, 0..400),
        ) {
            let (mut character, geometry, tuning) = setup();
            for m in moves {
                let (mode, input) = match m {
                    0 => (ControlMode::Keys, held(InputDirection::Left)),
                    1 => (ControlMode::Keys, held(InputDirection::Right)),
                    2 => (ControlMode::Keys, held(InputDirection::None)),
                    3 => (
                        ControlMode::Pointer,
                        TickInput { pointer_x: Some(-500.0), ..TickInput::default() },
                    ),
                    _ => (
                        ControlMode::Pointer,
                        TickInput { pointer_delta: Some(2000.0), ..TickInput::default() },
                    ),
                };
                tick(&mut character, &input, mode, &geometry, &tuning, SIM_DT);
                prop_assert!(character.position >= 0.0);
                prop_assert!(character.position <= geometry.max_character_x());
            }
        }
    }
}
