//! Snake state and player intent

use serde::{Deserialize, Serialize};

use super::food::spawn_food;
use crate::consts::{SCORE_PER_LEVEL, SNAKE_COLS, SNAKE_ROWS};
use crate::rng::RandomSource;
use crate::settings::SnakeSettings;

/// A grid cell. Coordinates are signed so a head that left the board is
/// still representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Heading of the snake (screen y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Fruit variants and their spawn odds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FruitKind {
    /// +1 score (50%)
    #[default]
    Normal,
    /// +3 score (17%)
    Bonus,
    /// +1 score, 8 forced growth turns (13%)
    Growth,
    /// +1 score, 35 slow ticks (12%)
    Slow,
    /// +1 score, clears up to two obstacles (8%)
    Purge,
}

impl FruitKind {
    /// Short description of what eating this fruit did
    pub fn event_label(self) -> &'static str {
        match self {
            FruitKind::Normal => "+1 point",
            FruitKind::Bonus => "Bonus fruit +3",
            FruitKind::Growth => "Growth fruit",
            FruitKind::Slow => "Slow fruit",
            FruitKind::Purge => "Purge fruit (obstacles cleared)",
        }
    }
}

/// The single piece of food on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub pos: Cell,
    pub kind: FruitKind,
}

impl Food {
    pub fn new(x: i32, y: i32, kind: FruitKind) -> Self {
        Self {
            pos: Cell::new(x, y),
            kind,
        }
    }
}

/// Run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnakeStatus {
    #[default]
    Running,
    Paused,
    /// Run ended (wall, obstacle, or no room left for food)
    GameOver,
}

/// Board size for a new run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeOptions {
    pub cols: i32,
    pub rows: i32,
}

impl Default for SnakeOptions {
    fn default() -> Self {
        Self {
            cols: SNAKE_COLS,
            rows: SNAKE_ROWS,
        }
    }
}

impl From<&SnakeSettings> for SnakeOptions {
    fn from(settings: &SnakeSettings) -> Self {
        Self {
            cols: settings.cols,
            rows: settings.rows,
        }
    }
}

/// Complete Snake state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnakeState {
    pub cols: i32,
    pub rows: i32,
    /// Body cells, head first. Cells may repeat: the snake can cross itself.
    pub snake: Vec<Cell>,
    pub obstacles: Vec<Cell>,
    pub direction: Direction,
    /// Heading adopted on the next step
    pub next_direction: Direction,
    /// `None` only when the board has no empty cell left
    pub food: Option<Food>,
    /// Remaining steps that grow the snake without eating
    pub growth_turns: u32,
    /// Remaining steps under the slow effect
    pub slow_ticks: u32,
    pub score: u32,
    /// `1 + score / 4`
    pub level: u32,
    /// Fruit eaten on the most recent step, if any
    pub last_event: Option<FruitKind>,
    pub status: SnakeStatus,
}

impl SnakeState {
    /// Three-segment snake centered on the board, heading right, with one
    /// fruit on a random empty cell.
    pub fn new(
        options: SnakeOptions,
        rng: &mut dyn RandomSource,
        kind_rng: &mut dyn RandomSource,
    ) -> Self {
        let SnakeOptions { cols, rows } = options;
        let start_x = cols / 2;
        let start_y = rows / 2;
        let snake = vec![
            Cell::new(start_x, start_y),
            Cell::new(start_x - 1, start_y),
            Cell::new(start_x - 2, start_y),
        ];
        let food = spawn_food(&snake, cols, rows, &[], rng, kind_rng);

        Self {
            cols,
            rows,
            snake,
            obstacles: Vec::new(),
            direction: Direction::Right,
            next_direction: Direction::Right,
            food,
            growth_turns: 0,
            slow_ticks: 0,
            score: 0,
            level: 1,
            last_event: None,
            status: SnakeStatus::Running,
        }
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn is_over(&self) -> bool {
        self.status == SnakeStatus::GameOver
    }
}

/// Level reached at a score
pub fn difficulty_level_for_score(score: u32) -> u32 {
    1 + score / SCORE_PER_LEVEL
}

/// Queue a new heading for the next step.
///
/// Reversing onto the current heading is ignored. The check is against
/// `direction`, not `next_direction`, so two quick turns inside one tick can't
/// fold the snake back onto itself.
pub fn set_direction(state: &SnakeState, direction: Direction) -> SnakeState {
    let mut next = state.clone();
    if direction != state.direction.opposite() {
        next.next_direction = direction;
    }
    next
}

/// Flip between running and paused. A finished run stays finished.
pub fn toggle_pause(state: &SnakeState) -> SnakeState {
    let mut next = state.clone();
    next.status = match state.status {
        SnakeStatus::GameOver => SnakeStatus::GameOver,
        SnakeStatus::Paused => SnakeStatus::Running,
        SnakeStatus::Running => SnakeStatus::Paused,
    };
    next
}
