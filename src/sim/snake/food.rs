//! Food placement, fruit rolls and the fruit effect table

use std::collections::HashSet;

use super::state::{Cell, Food, FruitKind};
use crate::rng::RandomSource;

/// Cumulative odds for a fruit roll: normal, bonus, growth, slow (purge is the rest)
const FRUIT_THRESHOLDS: [(f64, FruitKind); 4] = [
    (0.50, FruitKind::Normal),
    (0.67, FruitKind::Bonus),
    (0.80, FruitKind::Growth),
    (0.92, FruitKind::Slow),
];

/// Forced growth turns from a growth fruit
pub const GROWTH_FRUIT_TURNS: u32 = 8;
/// Slow ticks from a slow fruit
pub const SLOW_FRUIT_TICKS: u32 = 35;
/// Obstacles a purge fruit removes at most
pub const PURGE_COUNT: usize = 2;

/// Everything eating a fruit changes
#[derive(Debug, Clone, PartialEq)]
pub struct FoodEffect {
    pub kind: FruitKind,
    pub score_delta: u32,
    /// Added to the pending growth turns
    pub growth_turns_delta: u32,
    /// Slow duration; the state keeps the larger of this and what remains
    pub slow_ticks: u32,
    /// Obstacle set after the effect
    pub obstacles: Vec<Cell>,
}

/// Empty cells in row-major order (excluding body, obstacles and `extra`)
pub fn empty_cells(snake: &[Cell], obstacles: &[Cell], extra: Option<Cell>, cols: i32, rows: i32) -> Vec<Cell> {
    let blocked: HashSet<Cell> = snake
        .iter()
        .chain(obstacles.iter())
        .copied()
        .chain(extra)
        .collect();

    let mut empty = Vec::new();
    for y in 0..rows {
        for x in 0..cols {
            let cell = Cell::new(x, y);
            if !blocked.contains(&cell) {
                empty.push(cell);
            }
        }
    }
    empty
}

/// Pick a uniformly random cell not covered by the snake or an obstacle
pub fn place_food(
    snake: &[Cell],
    cols: i32,
    rows: i32,
    obstacles: &[Cell],
    rng: &mut dyn RandomSource,
) -> Option<Cell> {
    let empty = empty_cells(snake, obstacles, None, cols, rows);
    rng.pick_index(empty.len()).map(|i| empty[i])
}

/// Place a fruit with a rolled kind, or `None` when the board is full
pub fn spawn_food(
    snake: &[Cell],
    cols: i32,
    rows: i32,
    obstacles: &[Cell],
    rng: &mut dyn RandomSource,
    kind_rng: &mut dyn RandomSource,
) -> Option<Food> {
    let pos = place_food(snake, cols, rows, obstacles, rng)?;
    Some(Food {
        pos,
        kind: pick_fruit_kind(kind_rng),
    })
}

/// Roll a fruit kind with the weighted odds
pub fn pick_fruit_kind(rng: &mut dyn RandomSource) -> FruitKind {
    let roll = rng.next_unit();
    FRUIT_THRESHOLDS
        .iter()
        .find(|(threshold, _)| roll < *threshold)
        .map(|(_, kind)| *kind)
        .unwrap_or(FruitKind::Purge)
}

/// Effect of eating `kind` given the current obstacles.
///
/// Only purge draws from `rng` (to choose which obstacles go).
pub fn apply_food_effect(kind: FruitKind, obstacles: &[Cell], rng: &mut dyn RandomSource) -> FoodEffect {
    let mut effect = FoodEffect {
        kind,
        score_delta: 1,
        growth_turns_delta: 0,
        slow_ticks: 0,
        obstacles: obstacles.to_vec(),
    };

    match kind {
        FruitKind::Normal => {}
        FruitKind::Bonus => effect.score_delta = 3,
        FruitKind::Growth => effect.growth_turns_delta = GROWTH_FRUIT_TURNS,
        FruitKind::Slow => effect.slow_ticks = SLOW_FRUIT_TICKS,
        FruitKind::Purge => {
            effect.obstacles = remove_random_obstacles(obstacles, PURGE_COUNT, rng);
        }
    }

    effect
}

fn remove_random_obstacles(obstacles: &[Cell], count: usize, rng: &mut dyn RandomSource) -> Vec<Cell> {
    let mut remaining = obstacles.to_vec();
    for _ in 0..count.min(obstacles.len()) {
        if let Some(index) = rng.pick_index(remaining.len()) {
            remaining.remove(index);
        }
    }
    remaining
}
