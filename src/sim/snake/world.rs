//! World mutations driven from outside the tick: obstacles, forced growth and
//! board expansion.

use super::food::{empty_cells, spawn_food};
use super::state::SnakeState;
use crate::rng::RandomSource;

/// Drop one obstacle on a random cell that holds neither snake, obstacle nor
/// food. A full board is left as is.
pub fn add_random_obstacle(state: &SnakeState, rng: &mut dyn RandomSource) -> SnakeState {
    let food = state.food.map(|food| food.pos);
    let empty = empty_cells(&state.snake, &state.obstacles, food, state.cols, state.rows);

    let mut next = state.clone();
    if let Some(index) = rng.pick_index(empty.len()) {
        next.obstacles.push(empty[index]);
    }
    next
}

/// Force growth for the next `turns` steps. Boosts don't stack: the longer of
/// the pending and requested counts wins.
pub fn activate_growth_boost(state: &SnakeState, turns: u32) -> SnakeState {
    let mut next = state.clone();
    next.growth_turns = state.growth_turns.max(turns);
    next
}

/// Grow the board to the right and bottom.
///
/// Existing food stays where it is; a missing fruit (full board) is placed on
/// the new space.
pub fn expand_map(
    state: &SnakeState,
    cols_delta: i32,
    rows_delta: i32,
    rng: &mut dyn RandomSource,
    kind_rng: &mut dyn RandomSource,
) -> SnakeState {
    let mut next = state.clone();
    next.cols = state.cols + cols_delta;
    next.rows = state.rows + rows_delta;
    if next.food.is_none() {
        next.food = spawn_food(&next.snake, next.cols, next.rows, &next.obstacles, rng, kind_rng);
    }
    log::debug!("Snake board expanded to {}x{}", next.cols, next.rows);
    next
}
