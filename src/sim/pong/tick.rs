//! Fixed timestep Pong tick
//!
//! One call advances paddles, difficulty and every ball by one tick.

use super::state::{Ball, PongState, PongStatus, paddle_speed_for_level, speed_for_level};
use crate::consts::DIFFICULTY_TICK_INTERVAL;
use crate::sim::collision::{clamp, normalize_velocity, spans_overlap};

/// Outcome of advancing one ball
struct BallStep {
    ball: Ball,
    left_point: bool,
    right_point: bool,
}

/// Advance the match by one tick. Paused matches come back unchanged.
pub fn step(state: &PongState) -> PongState {
    if state.status != PongStatus::Running {
        return state.clone();
    }
    let mut next = state.clone();

    // Paddles move at the speed of the level they started the tick in
    let paddle_speed = paddle_speed_for_level(state.paddle_speed, state.speed_level);
    let limit = state.paddle_limit();
    next.left_y = clamp(state.left_y + state.left_move.factor() * paddle_speed, 0.0, limit);
    next.right_y = clamp(state.right_y + state.right_move.factor() * paddle_speed, 0.0, limit);

    next.ticks = state.ticks + 1;
    next.speed_level = (next.ticks / DIFFICULTY_TICK_INTERVAL) as u32;
    let previous_speed = speed_for_level(state.base_ball_speed, state.speed_level);
    let current_speed = speed_for_level(state.base_ball_speed, next.speed_level);

    if next.speed_level != state.speed_level {
        log::debug!(
            "Pong speed level {} -> {} (ball speed {:.2})",
            state.speed_level,
            next.speed_level,
            current_speed
        );
        if previous_speed != 0.0 {
            let ratio = current_speed / previous_speed;
            for ball in &mut next.balls {
                ball.vel *= ratio;
            }
        }
    }

    for index in 0..next.balls.len() {
        let result = step_ball(&next, next.balls[index], index, current_speed);
        if result.left_point {
            next.left_score += 1;
        }
        if result.right_point {
            next.right_score += 1;
        }
        next.balls[index] = result.ball;
    }

    next
}

/// Move one ball, bounce it off walls and paddles, and respawn it if it left
/// the board. Paddle positions are read from `state` (already moved).
fn step_ball(state: &PongState, ball: Ball, index: usize, speed: f32) -> BallStep {
    let size = state.ball_size;
    let mut pos = ball.pos + ball.vel;
    let mut vel = ball.vel;

    if pos.y <= 0.0 || pos.y + size >= state.height {
        vel.y = -vel.y;
        pos.y = clamp(pos.y, 0.0, state.height - size);
    }

    let left_hit =
        pos.x <= state.paddle_width && spans_overlap(pos.y, size, state.left_y, state.paddle_height);
    let right_face = state.width - state.paddle_width;
    let right_hit =
        pos.x + size >= right_face && spans_overlap(pos.y, size, state.right_y, state.paddle_height);

    if left_hit && vel.x < 0.0 {
        vel.x = vel.x.abs();
        pos.x = state.paddle_width;
        vel = normalize_velocity(vel, speed);
    }

    if right_hit && vel.x > 0.0 {
        vel.x = -vel.x.abs();
        pos.x = right_face - size;
        vel = normalize_velocity(vel, speed);
    }

    // Left exit scores for the right side and serves leftward
    if pos.x + size < 0.0 {
        return BallStep {
            ball: Ball::spawn(state.width, state.height, size, speed, -1.0, index),
            left_point: false,
            right_point: true,
        };
    }

    if pos.x > state.width {
        return BallStep {
            ball: Ball::spawn(state.width, state.height, size, speed, 1.0, index),
            left_point: true,
            right_point: false,
        };
    }

    BallStep {
        ball: Ball { pos, vel },
        left_point: false,
        right_point: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pong::{PaddleMove, Side, set_move, toggle_pause};
    use glam::Vec2;

    #[test]
    fn test_paddle_stays_in_bounds() {
        let mut state = PongState::new();
        state.left_y = 0.0;
        let state = set_move(&state, Side::Left, PaddleMove::Up);
        let state = step(&state);
        assert_eq!(state.left_y, 0.0);

        let mut state = set_move(&state, Side::Right, PaddleMove::Down);
        state.right_y = state.paddle_limit() - 1.0;
        let state = step(&state);
        assert_eq!(state.right_y, state.paddle_limit());
    }

    #[test]
    fn test_paddle_moves_by_speed() {
        let state = set_move(&PongState::new(), Side::Right, PaddleMove::Down);
        let state = step(&state);
        assert_eq!(state.right_y, 128.0 + 6.0);
    }

    #[test]
    fn test_wall_bounce() {
        let mut state = PongState::new();
        state.balls = vec![Ball::new(100.0, 0.0, 4.0, -4.0)];
        let state = step(&state);
        assert!(state.balls[0].vel.y > 0.0);
        assert_eq!(state.balls[0].pos.y, 0.0);

        let mut state = state;
        let bottom = state.height - state.ball_size;
        state.balls = vec![Ball::new(100.0, bottom, 4.0, 4.0)];
        let state = step(&state);
        assert!(state.balls[0].vel.y < 0.0);
        assert_eq!(state.balls[0].pos.y, bottom);
    }

    #[test]
    fn test_left_paddle_reflects_and_renormalizes() {
        let mut state = PongState::new();
        state.balls = vec![Ball::new(8.0, state.left_y + 10.0, -4.0, 3.0)];
        let state = step(&state);
        let ball = state.balls[0];
        assert!(ball.vel.x > 0.0);
        assert_eq!(ball.pos.x, state.paddle_width);
        assert!((ball.speed() - state.current_speed()).abs() < 1e-4);
    }

    #[test]
    fn test_right_paddle_reflects() {
        let mut state = PongState::new();
        let x = state.width - state.paddle_width - state.ball_size - 2.0;
        state.balls = vec![Ball::new(x, state.right_y + 20.0, 4.0, 0.0)];
        let state = step(&state);
        let ball = state.balls[0];
        assert!(ball.vel.x < 0.0);
        assert_eq!(ball.pos.x, state.width - state.paddle_width - state.ball_size);
        assert!((ball.speed() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ball_moving_away_from_paddle_passes() {
        let mut state = PongState::new();
        state.balls = vec![Ball::new(5.0, state.left_y + 10.0, 4.0, 0.0)];
        let state = step(&state);
        assert_eq!(state.balls[0].pos.x, 9.0);
        assert_eq!(state.balls[0].vel.x, 4.0);
    }

    #[test]
    fn test_scoring_respawns_at_center() {
        let mut state = PongState::new();
        state.balls = vec![Ball::new(-20.0, 0.0, -4.0, 0.0)];
        let state = step(&state);
        assert_eq!(state.right_score, 1);
        assert_eq!(state.left_score, 0);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].pos, Vec2::new(235.0, 155.0));
        assert!(state.balls[0].vel.x < 0.0);

        let mut state = state;
        state.balls = vec![Ball::new(state.width + 1.0, 0.0, 4.0, 0.0)];
        let state = step(&state);
        assert_eq!(state.left_score, 1);
        assert!(state.balls[0].vel.x > 0.0);
    }

    #[test]
    fn test_respawn_seed_follows_ball_index() {
        let mut state = PongState::new();
        state.balls = vec![
            Ball::new(200.0, 100.0, 1.0, 0.0),
            Ball::new(-30.0, 100.0, -4.0, 0.0),
        ];
        let state = step(&state);
        assert_eq!(state.right_score, 1);
        // Index 1: slope 0.55, heading up
        let respawned = state.balls[1];
        assert!((respawned.vel.y + 4.0 * 0.55).abs() < 1e-5);
        assert_eq!(state.balls[0].pos.x, 201.0);
    }

    #[test]
    fn test_speed_level_rescales_balls() {
        let mut state = PongState::new();
        state.ticks = DIFFICULTY_TICK_INTERVAL - 1;
        state.balls = vec![Ball::new(200.0, 150.0, 3.0, 2.0)];
        let state = step(&state);
        assert_eq!(state.speed_level, 1);
        let vel = state.balls[0].vel;
        assert!((vel.x - 3.0 * 1.18).abs() < 1e-5);
        assert!((vel.y - 2.0 * 1.18).abs() < 1e-5);
    }

    #[test]
    fn test_level_ratio_between_later_levels() {
        let mut state = PongState::new();
        state.ticks = 3 * DIFFICULTY_TICK_INTERVAL - 1;
        state.speed_level = 2;
        state.balls = vec![Ball::new(200.0, 150.0, 4.0, 0.0)];
        let state = step(&state);
        assert_eq!(state.speed_level, 3);
        let expected = 4.0 * (1.0 + 3.0 * 0.18) / (1.0 + 2.0 * 0.18);
        assert!((state.balls[0].vel.x - expected).abs() < 1e-4);
    }

    #[test]
    fn test_difficulty_increases_over_time() {
        let mut state = PongState::new();
        let initial = state.balls[0].vel.x.abs();
        for _ in 0..DIFFICULTY_TICK_INTERVAL {
            state = step(&state);
        }
        assert_eq!(state.speed_level, 1);
        assert!(state.balls[0].vel.x.abs() > initial);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let state = toggle_pause(&PongState::new());
        let before = state.balls[0].pos;
        let next = step(&state);
        assert_eq!(next.balls[0].pos, before);
        assert_eq!(next.ticks, 0);
    }

    #[test]
    fn test_step_does_not_touch_input() {
        let state = PongState::new();
        let snapshot = state.clone();
        let _ = step(&state);
        assert_eq!(state, snapshot);
    }
}
