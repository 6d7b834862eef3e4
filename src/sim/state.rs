//! Game state and core simulation types
//!
//! One owned aggregate holds everything the game mutates; no globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::difficulty::DifficultyState;
use crate::consts::*;
use crate::settings::ControlMode;
use crate::tuning::Tuning;

/// Current phase of gameplay. Single source of truth; every subsystem
/// checks it before acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting on the start screen
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused (manually or via tab visibility loss)
    Paused,
    /// Run ended (three rotten catches)
    Ended,
}

/// Held movement direction from keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputDirection {
    Left,
    Right,
    #[default]
    None,
}

/// Cosmetic sub-variant for good snacks (sprite selection only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoodVariant {
    Taco,
    Burger,
    Donut,
}

/// Cosmetic sub-variant for rotten items (sprite selection only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadVariant {
    Mold,
    Bone,
}

/// What kind of item is falling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodKind {
    Good(GoodVariant),
    Bad(BadVariant),
}

impl FoodKind {
    pub fn is_good(&self) -> bool {
        matches!(self, FoodKind::Good(_))
    }

    /// Sprite class name for the host UI layer
    pub fn sprite_class(&self) -> &'static str {
        match self {
            FoodKind::Good(GoodVariant::Taco) => "good1",
            FoodKind::Good(GoodVariant::Burger) => "good2",
            FoodKind::Good(GoodVariant::Donut) => "good3",
            FoodKind::Bad(BadVariant::Mold) => "bad",
            FoodKind::Bad(BadVariant::Bone) => "bad2",
        }
    }
}

/// Sound cues the host audio layer should play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    GoodCatch,
    BadCatch,
    GameOver,
}

/// Discrete outputs for the host (sounds, persistence triggers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundEffect),
    /// Score beat the stored high score; host should persist the new value
    HighScore(u32),
}

/// Play-field and sprite dimensions, provided by the host layout at
/// startup. The sim never assumes fixed screen sizes.
#[derive(Debug, Clone, Copy)]
pub struct FieldGeometry {
    pub field_width: f32,
    pub field_height: f32,
    pub character_width: f32,
    pub character_height: f32,
    pub object_width: f32,
    pub object_height: f32,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            character_width: DEFAULT_CHARACTER_WIDTH,
            character_height: DEFAULT_CHARACTER_HEIGHT,
            object_width: DEFAULT_OBJECT_WIDTH,
            object_height: DEFAULT_OBJECT_HEIGHT,
        }
    }
}

impl FieldGeometry {
    /// Rightmost legal character position
    pub fn max_character_x(&self) -> f32 {
        (self.field_width - self.character_width).max(0.0)
    }

    /// Rightmost legal spawn offset for a falling object
    pub fn max_spawn_x(&self) -> f32 {
        (self.field_width - self.object_width).max(0.0)
    }
}

/// The player character, anchored to the bottom edge of the field
#[derive(Debug, Clone)]
pub struct Character {
    /// Horizontal offset of the left edge, clamped to `[0, max_character_x]`
    pub position: f32,
    /// Horizontal velocity in px/s (keyboard control mode only)
    pub velocity: f32,
    /// Currently held direction
    pub direction: InputDirection,
}

impl Character {
    /// Character centered in the field, at rest
    pub fn centered(geometry: &FieldGeometry) -> Self {
        Self {
            position: (geometry.field_width - geometry.character_width) / 2.0,
            velocity: 0.0,
            direction: InputDirection::None,
        }
    }

    /// Bounding box in field coordinates (y grows downward)
    pub fn aabb(&self, geometry: &FieldGeometry) -> Aabb {
        Aabb::from_pos_size(
            Vec2::new(
                self.position,
                geometry.field_height - geometry.character_height,
            ),
            Vec2::new(geometry.character_width, geometry.character_height),
        )
    }
}

/// A falling item. Spawned by the spawn timer, destroyed on catch or on
/// exiting the bottom edge; never updated after removal.
#[derive(Debug, Clone)]
pub struct FallingObject {
    pub id: u32,
    pub kind: FoodKind,
    /// Horizontal offset, fixed at spawn
    pub x: f32,
    /// Vertical position, 0 at the top edge
    pub y: f32,
    /// Rotation in degrees (cosmetic)
    pub rotation: f32,
    /// Fall speed in px/s, captured from the difficulty at spawn and
    /// fixed for the object's lifetime
    pub speed: f32,
}

impl FallingObject {
    /// Bounding box in field coordinates
    pub fn aabb(&self, geometry: &FieldGeometry) -> Aabb {
        Aabb::from_pos_size(
            Vec2::new(self.x, self.y),
            Vec2::new(geometry.object_width, geometry.object_height),
        )
    }
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving spawn decisions
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Player character
    pub character: Character,
    /// Live falling objects (membership matters, order does not)
    pub objects: Vec<FallingObject>,
    /// Current difficulty values
    pub difficulty: DifficultyState,
    /// Score (increments of the catch reward only)
    pub score: u32,
    /// Rotten items caught; game ends at `tuning.miss_limit`
    pub missed_bad: u32,
    /// Good items that fell past the character (display only)
    pub missed_good: u32,
    /// Best score loaded at startup; written back only when beaten
    pub high_score: u32,
    /// Milliseconds accumulated toward the next spawn
    pub spawn_elapsed_ms: f32,
    /// Milliseconds accumulated toward the next difficulty ramp
    pub ramp_elapsed_ms: f32,
    /// Field dimensions from the host layout
    pub geometry: FieldGeometry,
    /// Balance values
    pub tuning: Tuning,
    /// Which input scheme is authoritative
    pub controls: ControlMode,
    /// Pending host-facing events (drained each frame)
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game in the `Idle` phase
    pub fn new(
        seed: u64,
        geometry: FieldGeometry,
        tuning: Tuning,
        controls: ControlMode,
        high_score: u32,
    ) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            time_ticks: 0,
            character: Character::centered(&geometry),
            objects: Vec::new(),
            difficulty: DifficultyState::initial(&tuning),
            score: 0,
            missed_bad: 0,
            missed_good: 0,
            high_score,
            spawn_elapsed_ms: 0.0,
            ramp_elapsed_ms: 0.0,
            geometry,
            tuning,
            controls,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue an event for the host
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending host events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start a fresh run from `Idle`, `Ended`, or a discarded pause.
    /// High score and input bindings survive; everything else resets.
    pub fn start(&mut self) {
        self.character = Character::centered(&self.geometry);
        self.objects.clear();
        self.difficulty = DifficultyState::initial(&self.tuning);
        self.score = 0;
        self.missed_bad = 0;
        self.missed_good = 0;
        self.spawn_elapsed_ms = 0.0;
        self.ramp_elapsed_ms = 0.0;
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        log::info!("game started (seed {})", self.seed);
    }

    /// Suspend ticking. Falling objects keep their exact position and
    /// rotation; nothing advances until `resume`.
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
        }
    }

    /// Resume from pause. Timers pick up from their accumulated elapsed
    /// time and current difficulty values, not from a reset.
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
        }
    }

    /// Terminal transition: clear the field, compare against the stored
    /// high score, and notify the host.
    pub fn finish(&mut self) {
        self.phase = GamePhase::Ended;
        self.objects.clear();
        self.push_event(GameEvent::Sound(SoundEffect::GameOver));
        if self.score > self.high_score {
            self.high_score = self.score;
            self.push_event(GameEvent::HighScore(self.score));
            log::info!("new high score: {}", self.score);
        }
    }
}
