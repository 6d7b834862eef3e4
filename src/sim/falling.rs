//! Falling-object spawning and animation
//!
//! Each object is a plain record advanced by the shared tick - no
//! per-object timers, so pausing the game trivially freezes every object
//! exactly where it is.

use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{Aabb, overlaps};
use super::difficulty::DifficultyState;
use super::state::{BadVariant, FallingObject, FieldGeometry, FoodKind, GoodVariant};
use crate::tuning::Tuning;

/// Outcome of one animation tick for a single object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectFate {
    /// Still falling
    Continue,
    /// Crossed the bottom edge without being caught
    Exited,
    /// Overlapped the character's padded hitbox
    Caught,
}

/// Spawn a new object at the top of the field. Kind, sub-variant and
/// horizontal offset are sampled from the seeded RNG; the fall speed is
/// the current difficulty value, fixed for this object's lifetime.
pub fn spawn(
    id: u32,
    difficulty: &DifficultyState,
    geometry: &FieldGeometry,
    rng: &mut Pcg32,
) -> FallingObject {
    let kind = if rng.random::<f32>() > difficulty.bad_probability {
        FoodKind::Good(match rng.random_range(0..3) {
            0 => GoodVariant::Taco,
            1 => GoodVariant::Burger,
            _ => GoodVariant::Donut,
        })
    } else if rng.random::<f32>() < 0.5 {
        FoodKind::Bad(BadVariant::Mold)
    } else {
        FoodKind::Bad(BadVariant::Bone)
    };

    FallingObject {
        id,
        kind,
        x: rng.random_range(0.0..=geometry.max_spawn_x()),
        y: 0.0,
        rotation: 0.0,
        speed: difficulty.fall_speed,
    }
}

/// Advance one object by `dt` and report its fate. Catches are checked
/// before the exit test, matching the order players perceive: an item
/// scraping the floor in front of the character still counts.
pub fn tick(
    object: &mut FallingObject,
    character_box: &Aabb,
    geometry: &FieldGeometry,
    tuning: &Tuning,
    dt: f32,
) -> ObjectFate {
    object.y += object.speed * dt;
    object.rotation += tuning.rotation_rate * dt;

    if overlaps(&object.aabb(geometry), character_box, tuning.collision_padding) {
        return ObjectFate::Caught;
    }
    if object.y >= geometry.field_height {
        return ObjectFate::Exited;
    }
    ObjectFate::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;

    fn setup() -> (DifficultyState, FieldGeometry, Tuning, Pcg32) {
        let tuning = Tuning::default();
        (
            DifficultyState::initial(&tuning),
            FieldGeometry::default(),
            tuning,
            Pcg32::seed_from_u64(7),
        )
    }

    #[test]
    fn test_spawn_within_field() {
        let (difficulty, geometry, _, mut rng) = setup();
        for id in 0..200 {
            let object = spawn(id, &difficulty, &geometry, &mut rng);
            assert!(object.x >= 0.0);
            assert!(object.x <= geometry.max_spawn_x());
            assert_eq!(object.y, 0.0);
            assert_eq!(object.speed, difficulty.fall_speed);
        }
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let (difficulty, geometry, _, _) = setup();
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for id in 0..50 {
            let oa = spawn(id, &difficulty, &geometry, &mut a);
            let ob = spawn(id, &difficulty, &geometry, &mut b);
            assert_eq!(oa.kind, ob.kind);
            assert_eq!(oa.x, ob.x);
        }
    }

    #[test]
    fn test_object_falls_and_rotates() {
        let (difficulty, geometry, tuning, mut rng) = setup();
        let mut object = spawn(1, &difficulty, &geometry, &mut rng);
        object.x = 0.0; // Keep it away from the (centered) character
        let character_box = Aabb::from_pos_size(
            glam::Vec2::new(geometry.field_width - 1.0, geometry.field_height - 1.0),
            glam::Vec2::ONE,
        );

        let fate = tick(&mut object, &character_box, &geometry, &tuning, SIM_DT);
        assert_eq!(fate, ObjectFate::Continue);
        assert!(object.y > 0.0);
        assert!(object.rotation > 0.0);
    }

    #[test]
    fn test_object_exits_at_bottom() {
        let (difficulty, geometry, tuning, mut rng) = setup();
        let mut object = spawn(1, &difficulty, &geometry, &mut rng);
        object.x = 0.0;
        object.y = geometry.field_height - 0.01;
        let far_box = Aabb::from_pos_size(
            glam::Vec2::new(geometry.field_width - 1.0, 0.0),
            glam::Vec2::ONE,
        );
        let fate = tick(&mut object, &far_box, &geometry, &tuning, SIM_DT);
        assert_eq!(fate, ObjectFate::Exited);
    }

    #[test]
    fn test_object_caught_on_overlap() {
        let (difficulty, geometry, tuning, mut rng) = setup();
        let mut object = spawn(1, &difficulty, &geometry, &mut rng);
        object.x = 100.0;
        object.y = geometry.field_height - geometry.object_height;
        let character_box = Aabb::from_pos_size(
            glam::Vec2::new(100.0, geometry.field_height - geometry.character_height),
            glam::Vec2::new(geometry.character_width, geometry.character_height),
        );
        let fate = tick(&mut object, &character_box, &geometry, &tuning, SIM_DT);
        assert_eq!(fate, ObjectFate::Caught);
    }
}
