//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod character;
pub mod collision;
pub mod difficulty;
pub mod falling;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlaps};
pub use difficulty::DifficultyState;
pub use falling::ObjectFate;
pub use state::{
    BadVariant, Character, FallingObject, FieldGeometry, FoodKind, GameEvent, GamePhase,
    GameState, GoodVariant, InputDirection, SoundEffect,
};
pub use tick::{TickInput, tick};
