//! Snack Dash - catch the falling snacks, dodge the rotten ones
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (control mode, audio)
//! - `highscore`: Single persisted high score

pub mod highscore;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{ControlMode, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz matches the reference frame rate
    /// the balance values were tuned at)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Fallback play-field geometry when the host layout is unavailable.
    /// Real dimensions come from the environment at startup.
    pub const DEFAULT_FIELD_WIDTH: f32 = 600.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 400.0;
    pub const DEFAULT_CHARACTER_WIDTH: f32 = 50.0;
    pub const DEFAULT_CHARACTER_HEIGHT: f32 = 50.0;
    pub const DEFAULT_OBJECT_WIDTH: f32 = 30.0;
    pub const DEFAULT_OBJECT_HEIGHT: f32 = 30.0;
}
