//! Snake tick
//!
//! Moves the snake one cell, resolves collisions, growth and fruit effects.

use super::food::{apply_food_effect, spawn_food};
use super::state::{SnakeState, SnakeStatus, difficulty_level_for_score};
use crate::rng::RandomSource;
use crate::sim::collision::{hits_obstacle, hits_wall};

/// Advance the run by one step. Paused or finished runs come back unchanged.
///
/// `rng` places the next fruit and picks purge targets; `kind_rng` rolls the
/// next fruit's kind.
pub fn step(
    state: &SnakeState,
    rng: &mut dyn RandomSource,
    kind_rng: &mut dyn RandomSource,
) -> SnakeState {
    if state.status != SnakeStatus::Running {
        return state.clone();
    }
    let mut next = state.clone();

    let direction = state.next_direction;
    next.direction = direction;
    let head = state.head().step(direction);

    // Crossing the body is allowed; only walls and obstacles end the run
    if hits_wall(head, state.cols, state.rows) || hits_obstacle(head, &state.obstacles) {
        log::debug!("Snake crashed at ({}, {}) with score {}", head.x, head.y, state.score);
        next.status = SnakeStatus::GameOver;
        return next;
    }

    let eaten = state.food.filter(|food| food.pos == head);
    let grow = eaten.is_some() || state.growth_turns > 0;

    next.snake.insert(0, head);
    if !grow {
        next.snake.pop();
    }
    next.growth_turns = state.growth_turns.saturating_sub(1);
    next.slow_ticks = state.slow_ticks.saturating_sub(1);
    next.last_event = None;

    if let Some(food) = eaten {
        let effect = apply_food_effect(food.kind, &state.obstacles, rng);
        next.growth_turns += effect.growth_turns_delta;
        next.slow_ticks = next.slow_ticks.max(effect.slow_ticks);
        next.score += effect.score_delta;
        next.obstacles = effect.obstacles;
        next.last_event = Some(food.kind);
        next.food = spawn_food(&next.snake, next.cols, next.rows, &next.obstacles, rng, kind_rng);
    }

    next.level = difficulty_level_for_score(next.score);

    if next.food.is_none() {
        log::debug!("Snake board full at length {}", next.snake.len());
        next.status = SnakeStatus::GameOver;
    }

    next
}
