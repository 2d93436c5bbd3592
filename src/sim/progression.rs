//! Score-milestone progression for Snake
//!
//! Runs after a step that raised the score, outside the engine's `step`, so
//! drivers can swap the policy without touching the state machine.

use serde::{Deserialize, Serialize};

use super::snake::{SnakeState, activate_growth_boost, add_random_obstacle, expand_map};
use crate::rng::RandomSource;
use crate::settings::ProgressionRules;

/// A milestone that fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressEvent {
    ObstacleAdded { score: u32 },
    GrowthBoost { score: u32, turns: u32 },
    MapExpanded { score: u32, cols: i32, rows: i32 },
}

/// Apply every milestone for the scores in `(previous_score, state.score]`.
///
/// Each crossed score is checked on its own, so a +3 bonus fruit can fire
/// several milestones at once. An obstacle that finds no room is not reported.
pub fn apply_progress_events(
    state: &SnakeState,
    previous_score: u32,
    rules: &ProgressionRules,
    rng: &mut dyn RandomSource,
    kind_rng: &mut dyn RandomSource,
) -> (SnakeState, Vec<ProgressEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();

    for score in previous_score + 1..=state.score {
        if is_milestone(score, rules.obstacle_every) {
            let before = next.obstacles.len();
            next = add_random_obstacle(&next, rng);
            if next.obstacles.len() > before {
                events.push(ProgressEvent::ObstacleAdded { score });
            }
        }
        if is_milestone(score, rules.boost_every) {
            next = activate_growth_boost(&next, rules.boost_turns);
            events.push(ProgressEvent::GrowthBoost {
                score,
                turns: rules.boost_turns,
            });
        }
        if is_milestone(score, rules.expand_every) {
            next = expand_map(&next, rules.expand_cols, rules.expand_rows, rng, kind_rng);
            events.push(ProgressEvent::MapExpanded {
                score,
                cols: next.cols,
                rows: next.rows,
            });
        }
    }

    (next, events)
}

fn is_milestone(score: u32, every: u32) -> bool {
    every > 0 && score % every == 0
}
