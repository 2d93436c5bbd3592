//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Every operation takes a state by reference and returns the next state
//! - Randomness only through injected `RandomSource`s
//! - No rendering, timing or storage dependencies

pub mod collision;
pub mod pong;
pub mod progression;
pub mod snake;

pub use pong::{Ball, PaddleMove, PongState, PongStatus, Side};
pub use progression::{ProgressEvent, apply_progress_events};
pub use snake::{Cell, Direction, Food, FruitKind, SnakeOptions, SnakeState, SnakeStatus};
