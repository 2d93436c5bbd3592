//! Pong engine
//!
//! Two paddles, any number of balls, and a difficulty level that rises with
//! elapsed ticks. There is no terminal state: scores accumulate forever.

pub mod state;
pub mod tick;

pub use state::{
    Ball, PaddleMove, PongState, PongStatus, Side, add_ball, clear_move, paddle_speed_for_level,
    set_move, speed_for_level, toggle_pause,
};
pub use tick::step;
