//! Snake engine
//!
//! A grid snake that may cross its own body, one fruit with a random effect,
//! obstacles, and a board that can grow. The run ends on a wall, an obstacle,
//! or when no empty cell is left for food.

pub mod food;
pub mod state;
pub mod tick;
pub mod world;

pub use food::{FoodEffect, apply_food_effect, pick_fruit_kind, place_food, spawn_food};
pub use state::{
    Cell, Direction, Food, FruitKind, SnakeOptions, SnakeState, SnakeStatus,
    difficulty_level_for_score, set_direction, toggle_pause,
};
pub use tick::step;
pub use world::{activate_growth_boost, add_random_obstacle, expand_map};

pub use crate::sim::collision::{hits_obstacle, hits_wall};
