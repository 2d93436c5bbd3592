//! Game settings
//!
//! Board sizes, pacing and progression rules. The browser keeps them in the
//! same key-value store as the high scores under `arcade_settings`; the native
//! demo reads a JSON file. Every field has a default, so partial documents
//! load.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{ScoreStore, StoreError};

/// Pong board and speed tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongSettings {
    pub width: f32,
    pub height: f32,
    pub paddle_height: f32,
    pub paddle_width: f32,
    pub paddle_speed: f32,
    pub ball_size: f32,
    pub base_ball_speed: f32,
    /// Session adds a ball every this many ticks (off when `None`)
    pub extra_ball_every: Option<u64>,
    /// Upper bound on balls added by the session
    pub max_balls: usize,
}

impl Default for PongSettings {
    fn default() -> Self {
        Self {
            width: PONG_WIDTH,
            height: PONG_HEIGHT,
            paddle_height: PADDLE_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_speed: PADDLE_SPEED,
            ball_size: BALL_SIZE,
            base_ball_speed: BALL_BASE_SPEED,
            extra_ball_every: None,
            max_balls: 4,
        }
    }
}

/// Snake board and pacing tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub cols: i32,
    pub rows: i32,
    /// Tick interval at level 1
    pub base_tick_ms: f64,
    /// Fastest level-based interval
    pub min_tick_ms: f64,
    /// Exponential speedup per level
    pub growth_rate: f64,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            cols: SNAKE_COLS,
            rows: SNAKE_ROWS,
            base_tick_ms: SNAKE_BASE_TICK_MS,
            min_tick_ms: SNAKE_MIN_TICK_MS,
            growth_rate: SNAKE_EXP_GROWTH_RATE,
        }
    }
}

/// Score milestones that reshape the Snake board.
///
/// A period of 0 disables that event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionRules {
    /// Add an obstacle on every multiple of this score
    pub obstacle_every: u32,
    /// Start a growth boost on every multiple of this score
    pub boost_every: u32,
    pub boost_turns: u32,
    /// Grow the board on every multiple of this score
    pub expand_every: u32,
    pub expand_cols: i32,
    pub expand_rows: i32,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            obstacle_every: 3,
            boost_every: 5,
            boost_turns: 5,
            expand_every: 7,
            expand_cols: 2,
            expand_rows: 2,
        }
    }
}

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pong: PongSettings,
    pub snake: SnakeSettings,
    pub progression: ProgressionRules,
}

impl Settings {
    /// Store key the settings document lives under
    pub const STORAGE_KEY: &'static str = "arcade_settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Settings file {} unreadable ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Settings file {} invalid ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Settings saved in `store`, or defaults when absent or unreadable
    pub fn load_from_store(store: &dyn ScoreStore) -> Self {
        match store.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Stored settings invalid ({}), using defaults", e);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Could not read settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save_to_store(&self, store: &mut dyn ScoreStore) -> Result<(), StoreError> {
        store.set_item(Self::STORAGE_KEY, &serde_json::to_string(self)?)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Parse a settings document from the page and store it. Invalid JSON is
    /// rejected before anything is written.
    pub fn import_json(json: &str, store: &mut dyn ScoreStore) -> Result<Self, StoreError> {
        let settings = Self::from_json(json)?;
        settings.save_to_store(store)?;
        Ok(settings)
    }
}
