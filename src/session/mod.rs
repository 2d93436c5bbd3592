//! Loop drivers
//!
//! A session is the single owner of one game's context: the engine state, its
//! random streams, the bonus layers the engines don't model, and the high-score
//! record. Render and input code borrow it; nothing lives in globals.

pub mod pong;
pub mod snake;

pub use pong::PongSession;
pub use snake::{Combo, SnakeSession, SnakeTickReport};
