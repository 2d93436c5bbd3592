//! Arcade Cores - deterministic game cores for a small arcade suite
//!
//! Core modules:
//! - `sim`: Deterministic simulation (Pong physics, Snake state machine)
//! - `rng`: Injectable randomness sources
//! - `session`: Loop drivers that own per-game context
//! - `persistence`: Key-value storage backends
//! - `highscores`: Best-score accessor over a store
//! - `settings`: Data-driven board sizes, pacing and progression rules

pub mod highscores;
pub mod persistence;
pub mod rng;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::{HighScores, ScoreKey};
pub use rng::{FixedSource, RandomSource, SeededSource, SequenceSource};
pub use session::{PongSession, SnakeSession};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Pong fixed simulation timestep in milliseconds (~62.5 Hz)
    pub const PONG_STEP_MS: f32 = 16.0;
    /// Maximum substeps per update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest elapsed time a single update will account for
    pub const MAX_FRAME_MS: f32 = 250.0;

    /// Pong board dimensions
    pub const PONG_WIDTH: f32 = 480.0;
    pub const PONG_HEIGHT: f32 = 320.0;

    /// Paddle defaults (positions are the top-left corner)
    pub const PADDLE_HEIGHT: f32 = 64.0;
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 6.0;
    pub const PADDLE_START_Y: f32 = 128.0;

    /// Ball defaults (the ball is a square of side BALL_SIZE)
    pub const BALL_SIZE: f32 = 10.0;
    pub const BALL_BASE_SPEED: f32 = 4.0;

    /// Ticks per Pong speed level
    pub const DIFFICULTY_TICK_INTERVAL: u64 = 600;
    /// Ball speed gain per level (multiplicative on base speed)
    pub const SPEED_INCREASE_PER_LEVEL: f32 = 0.18;
    /// Paddle speed gain per level
    pub const PADDLE_SPEED_INCREASE_PER_LEVEL: f32 = 0.08;
    /// Vertical slope of a freshly spawned ball, indexed by spawn seed
    pub const SPAWN_ANGLES: [f32; 3] = [0.35, 0.55, 0.75];

    /// Snake default board
    pub const SNAKE_COLS: i32 = 20;
    pub const SNAKE_ROWS: i32 = 20;
    /// Score points per snake level
    pub const SCORE_PER_LEVEL: u32 = 4;

    /// Snake pacing
    pub const SNAKE_BASE_TICK_MS: f64 = 140.0;
    pub const SNAKE_MIN_TICK_MS: f64 = 16.0;
    pub const SNAKE_EXP_GROWTH_RATE: f64 = 0.115;
    /// Extra delay per tick while the slow effect is active
    pub const SLOW_TICK_PENALTY_MS: f64 = 45.0;
    /// Delay removed per tick while fever is active
    pub const FEVER_TICK_BONUS_MS: f64 = 20.0;
    /// Cap on the length-based speedup
    pub const MAX_LENGTH_BONUS_MS: f64 = 18.0;

    /// Eating again within this window extends the combo
    pub const COMBO_WINDOW_MS: f64 = 2200.0;
    /// Combo that triggers fever
    pub const FEVER_COMBO: u32 = 4;
    /// Fever duration in snake ticks
    pub const FEVER_TICKS: u32 = 22;
}
