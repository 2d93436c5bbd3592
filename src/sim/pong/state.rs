//! Pong state and player intent
//!
//! Positions are top-left corners in board pixels. The board never changes
//! size during a match.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::PongSettings;

/// Whether the match is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PongStatus {
    #[default]
    Running,
    Paused,
}

/// Which paddle an intent applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            _ => None,
        }
    }
}

/// Per-paddle movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddleMove {
    Up,
    Down,
    #[default]
    Still,
}

impl PaddleMove {
    /// Anything other than "up"/"down" means standing still
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "up" => PaddleMove::Up,
            "down" => PaddleMove::Down,
            _ => PaddleMove::Still,
        }
    }

    /// Signed direction along the y axis (screen y grows downward)
    pub fn factor(self) -> f32 {
        match self {
            PaddleMove::Up => -1.0,
            PaddleMove::Down => 1.0,
            PaddleMove::Still => 0.0,
        }
    }
}

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
        }
    }

    /// A centered ball heading toward `direction` (+1 right, -1 left).
    ///
    /// The seed picks the slope from `SPAWN_ANGLES` and whether it heads down
    /// (even) or up (odd), so balls spawned by index fan out.
    pub fn spawn(width: f32, height: f32, size: f32, speed: f32, direction: f32, seed: usize) -> Self {
        let angle = SPAWN_ANGLES[seed % SPAWN_ANGLES.len()];
        let vertical = if seed % 2 == 0 { 1.0 } else { -1.0 };
        Self {
            pos: Vec2::new((width - size) / 2.0, (height - size) / 2.0),
            vel: Vec2::new(speed * direction, speed * angle * vertical),
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Complete Pong state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PongState {
    pub width: f32,
    pub height: f32,
    pub paddle_height: f32,
    pub paddle_width: f32,
    /// Paddle speed at level 0, pixels per tick
    pub paddle_speed: f32,
    pub ball_size: f32,
    /// Ball speed at level 0, pixels per tick
    pub base_ball_speed: f32,
    pub left_y: f32,
    pub right_y: f32,
    pub left_move: PaddleMove,
    pub right_move: PaddleMove,
    /// Active balls, in spawn-slot order
    pub balls: Vec<Ball>,
    pub left_score: u32,
    pub right_score: u32,
    pub status: PongStatus,
    /// Simulation tick counter
    pub ticks: u64,
    /// `ticks / DIFFICULTY_TICK_INTERVAL`
    pub speed_level: u32,
}

impl Default for PongState {
    fn default() -> Self {
        Self::new()
    }
}

impl PongState {
    /// Standard 480x320 board with one centered ball heading right
    pub fn new() -> Self {
        Self::with_settings(&PongSettings::default())
    }

    pub fn with_settings(settings: &PongSettings) -> Self {
        let ball = Ball::spawn(
            settings.width,
            settings.height,
            settings.ball_size,
            settings.base_ball_speed,
            1.0,
            0,
        );
        let start_y = ((settings.height - settings.paddle_height) / 2.0).max(0.0);

        Self {
            width: settings.width,
            height: settings.height,
            paddle_height: settings.paddle_height,
            paddle_width: settings.paddle_width,
            paddle_speed: settings.paddle_speed,
            ball_size: settings.ball_size,
            base_ball_speed: settings.base_ball_speed,
            left_y: start_y,
            right_y: start_y,
            left_move: PaddleMove::Still,
            right_move: PaddleMove::Still,
            balls: vec![ball],
            left_score: 0,
            right_score: 0,
            status: PongStatus::Running,
            ticks: 0,
            speed_level: 0,
        }
    }

    /// Combined score of both sides (what the best-total record tracks)
    pub fn total_score(&self) -> u32 {
        self.left_score + self.right_score
    }

    /// Ball speed for the current level
    pub fn current_speed(&self) -> f32 {
        speed_for_level(self.base_ball_speed, self.speed_level)
    }

    /// Highest y a paddle's top edge may reach
    pub fn paddle_limit(&self) -> f32 {
        self.height - self.paddle_height
    }
}

/// Ball speed at a speed level
pub fn speed_for_level(base_speed: f32, level: u32) -> f32 {
    base_speed * (1.0 + level as f32 * SPEED_INCREASE_PER_LEVEL)
}

/// Paddle speed at a speed level
pub fn paddle_speed_for_level(base_speed: f32, level: u32) -> f32 {
    base_speed * (1.0 + level as f32 * PADDLE_SPEED_INCREASE_PER_LEVEL)
}

/// Set one paddle's movement intent
pub fn set_move(state: &PongState, side: Side, movement: PaddleMove) -> PongState {
    let mut next = state.clone();
    match side {
        Side::Left => next.left_move = movement,
        Side::Right => next.right_move = movement,
    }
    next
}

/// Stop one paddle
pub fn clear_move(state: &PongState, side: Side) -> PongState {
    set_move(state, side, PaddleMove::Still)
}

/// Flip between running and paused
pub fn toggle_pause(state: &PongState) -> PongState {
    let mut next = state.clone();
    next.status = match state.status {
        PongStatus::Running => PongStatus::Paused,
        PongStatus::Paused => PongStatus::Running,
    };
    next
}

/// Add one centered ball at the current level speed.
///
/// The engine itself never adds balls; drivers that want multi-ball call this.
/// Successive balls alternate horizontal direction and take the next seed.
pub fn add_ball(state: &PongState) -> PongState {
    let mut next = state.clone();
    let seed = next.balls.len();
    let direction = if seed % 2 == 0 { 1.0 } else { -1.0 };
    next.balls.push(Ball::spawn(
        next.width,
        next.height,
        next.ball_size,
        next.current_speed(),
        direction,
        seed,
    ));
    next
}
