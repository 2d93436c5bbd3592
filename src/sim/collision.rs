//! Collision helpers shared by the engines
//!
//! Pong works with axis-aligned squares and paddles in continuous space; Snake
//! works with integer grid cells. Both only need bounds tests and a little
//! vector arithmetic.

use glam::Vec2;

use super::snake::Cell;

/// Clamp that tolerates `min > max` (the lower bound wins)
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(value))
}

/// Rescale a velocity to exactly `speed`, keeping its direction.
///
/// A zero vector has no direction, so it becomes `(speed, 0)`.
pub fn normalize_velocity(velocity: Vec2, speed: f32) -> Vec2 {
    let magnitude = velocity.length();
    if magnitude == 0.0 {
        return Vec2::new(speed, 0.0);
    }
    velocity * (speed / magnitude)
}

/// Do the closed vertical spans `[a, a + a_len]` and `[b, b + b_len]` touch?
#[inline]
pub fn spans_overlap(a: f32, a_len: f32, b: f32, b_len: f32) -> bool {
    a + a_len >= b && a <= b + b_len
}

/// Is the cell outside the `cols x rows` board?
#[inline]
pub fn hits_wall(cell: Cell, cols: i32, rows: i32) -> bool {
    cell.x < 0 || cell.y < 0 || cell.x >= cols || cell.y >= rows
}

/// Does the cell coincide with any obstacle?
#[inline]
pub fn hits_obstacle(cell: Cell, obstacles: &[Cell]) -> bool {
    obstacles.contains(&cell)
}
