//! Snake loop driver
//!
//! Owns the run, its random streams, the combo/fever bonus layer and the
//! best-score record. The caller owns the clock: it asks for
//! [`SnakeSession::tick_interval_ms`], waits, and calls [`SnakeSession::tick`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::highscores::{HighScores, ScoreKey};
use crate::persistence::ScoreStore;
use crate::rng::SeededSource;
use crate::settings::{ProgressionRules, SnakeSettings};
use crate::sim::progression::{ProgressEvent, apply_progress_events};
use crate::sim::snake::{
    self, Direction, FruitKind, SnakeOptions, SnakeState, SnakeStatus, difficulty_level_for_score,
};

/// Eat-streak bonus state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    /// Current streak (1 = no streak)
    pub count: u32,
    /// Clock time of the last meal
    pub last_eat_ms: Option<f64>,
    /// Remaining fever ticks
    pub fever_ticks: u32,
}

impl Default for Combo {
    fn default() -> Self {
        Self {
            count: 1,
            last_eat_ms: None,
            fever_ticks: 0,
        }
    }
}

/// What one tick did, for the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnakeTickReport {
    /// Fruit eaten this tick
    pub ate: Option<FruitKind>,
    /// Streak after this tick
    pub combo: u32,
    /// Extra points granted by the streak
    pub combo_bonus: u32,
    pub fever_started: bool,
    pub fever_ended: bool,
    pub progress: Vec<ProgressEvent>,
    pub game_over: bool,
}

/// A Snake run plus everything the loop needs around it
pub struct SnakeSession<S: ScoreStore> {
    state: SnakeState,
    settings: SnakeSettings,
    rules: ProgressionRules,
    rng: SeededSource,
    kind_rng: SeededSource,
    scores: HighScores<S>,
    best_score: f64,
    combo: Combo,
}

impl<S: ScoreStore> SnakeSession<S> {
    pub fn new(settings: SnakeSettings, rules: ProgressionRules, store: S, seed: u64) -> Self {
        let (mut rng, mut kind_rng) = SeededSource::pair(seed);
        let state = SnakeState::new(SnakeOptions::from(&settings), &mut rng, &mut kind_rng);
        let scores = HighScores::new(store);
        let best_score = scores.get(ScoreKey::Snake, 0.0);
        log::info!(
            "Snake session ready ({}x{}, seed {}, best {})",
            settings.cols,
            settings.rows,
            seed,
            best_score
        );

        Self {
            state,
            settings,
            rules,
            rng,
            kind_rng,
            scores,
            best_score,
            combo: Combo::default(),
        }
    }

    pub fn state(&self) -> &SnakeState {
        &self.state
    }

    pub fn combo(&self) -> &Combo {
        &self.combo
    }

    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    pub fn scores(&self) -> &HighScores<S> {
        &self.scores
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.state = snake::set_direction(&self.state, direction);
    }

    /// Unknown names are ignored
    pub fn set_direction_name(&mut self, name: &str) {
        if let Some(direction) = Direction::from_name(name) {
            self.set_direction(direction);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.state = snake::toggle_pause(&self.state);
    }

    /// New run on the configured board; the random streams carry on
    pub fn restart(&mut self) {
        self.state = SnakeState::new(
            SnakeOptions::from(&self.settings),
            &mut self.rng,
            &mut self.kind_rng,
        );
        self.combo = Combo::default();
    }

    /// Advance one step at clock time `now_ms`
    pub fn tick(&mut self, now_ms: f64) -> SnakeTickReport {
        let previous_score = self.state.score;
        let was_running = self.state.status == SnakeStatus::Running;
        self.state = snake::step(&self.state, &mut self.rng, &mut self.kind_rng);

        let mut report = SnakeTickReport::default();
        if !was_running {
            report.combo = self.combo.count;
            return report;
        }

        if self.state.status == SnakeStatus::Running {
            if let Some(kind) = self.state.last_event {
                report.ate = Some(kind);
                self.on_eat(now_ms, &mut report);
                let (state, events) = apply_progress_events(
                    &self.state,
                    previous_score,
                    &self.rules,
                    &mut self.rng,
                    &mut self.kind_rng,
                );
                self.state = state;
                report.progress = events;
            }
        }

        if self.combo.fever_ticks > 0 {
            self.combo.fever_ticks -= 1;
            report.fever_ended = self.combo.fever_ticks == 0;
        }

        if f64::from(self.state.score) > self.best_score {
            self.best_score = self.scores.set_max(ScoreKey::Snake, f64::from(self.state.score));
        }

        report.combo = self.combo.count;
        report.game_over = self.state.status == SnakeStatus::GameOver;
        if report.game_over {
            log::info!("Snake run over: score {}, length {}", self.state.score, self.state.len());
        }
        report
    }

    fn on_eat(&mut self, now_ms: f64, report: &mut SnakeTickReport) {
        let in_window = self
            .combo
            .last_eat_ms
            .is_some_and(|last| now_ms - last < COMBO_WINDOW_MS);
        self.combo.count = if in_window { self.combo.count + 1 } else { 1 };
        self.combo.last_eat_ms = Some(now_ms);

        let bonus = self.combo.count - 1;
        if bonus > 0 {
            self.state.score += bonus;
            self.state.level = difficulty_level_for_score(self.state.score);
            report.combo_bonus = bonus;
        }

        if self.combo.count >= FEVER_COMBO {
            report.fever_started = self.combo.fever_ticks == 0;
            self.combo.fever_ticks = self.combo.fever_ticks.max(FEVER_TICKS);
        }
    }

    /// How long to wait before the next tick
    pub fn tick_interval_ms(&self) -> f64 {
        let level = self.state.level.max(1);
        let multiplier = (f64::from(level - 1) * self.settings.growth_rate).exp();
        let level_tick = (self.settings.base_tick_ms / multiplier)
            .round()
            .max(self.settings.min_tick_ms);

        let extra_length = self.state.len().saturating_sub(3) as f64;
        let length_bonus = (extra_length / 3.0).floor().min(MAX_LENGTH_BONUS_MS);

        let mut interval = level_tick - length_bonus;
        if self.state.slow_ticks > 0 {
            interval += SLOW_TICK_PENALTY_MS;
        }
        if self.combo.fever_ticks > 0 {
            interval -= FEVER_TICK_BONUS_MS;
        }
        interval.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::snake::{Cell, Food};

    fn session() -> SnakeSession<MemoryStore> {
        session_with(ProgressionRules::default())
    }

    fn session_with(rules: ProgressionRules) -> SnakeSession<MemoryStore> {
        SnakeSession::new(SnakeSettings::default(), rules, MemoryStore::new(), 7)
    }

    /// Obstacles could land on the cell the tests feed next
    fn no_obstacles() -> SnakeSession<MemoryStore> {
        session_with(ProgressionRules {
            obstacle_every: 0,
            ..ProgressionRules::default()
        })
    }

    /// Put a normal fruit right in front of the head
    fn feed(s: &mut SnakeSession<MemoryStore>) {
        let head = s.state.head().step(s.state.direction);
        s.state.food = Some(Food {
            pos: head,
            kind: FruitKind::Normal,
        });
    }

    #[test]
    fn test_new_session() {
        let s = session();
        assert_eq!(s.state().len(), 3);
        assert_eq!(s.state().cols, 20);
        assert!(s.state().food.is_some());
        assert_eq!(s.best_score(), 0.0);
    }

    #[test]
    fn test_combo_within_window() {
        let mut s = no_obstacles();
        feed(&mut s);
        let first = s.tick(0.0);
        assert_eq!(first.ate, Some(FruitKind::Normal));
        assert_eq!(first.combo, 1);
        assert_eq!(s.state().score, 1);

        feed(&mut s);
        let second = s.tick(1000.0);
        assert_eq!(second.combo, 2);
        assert_eq!(second.combo_bonus, 1);
        assert_eq!(s.state().score, 3);

        feed(&mut s);
        let third = s.tick(5000.0);
        assert_eq!(third.combo, 1);
        assert_eq!(third.combo_bonus, 0);
    }

    #[test]
    fn test_fever_after_four_quick_meals() {
        let mut s = no_obstacles();
        let mut started = false;
        for i in 0..4 {
            feed(&mut s);
            let report = s.tick(f64::from(i) * 100.0);
            started |= report.fever_started;
        }
        assert!(started);
        assert_eq!(s.combo().count, 4);
        // Set to 22 and decayed once on the same tick
        assert_eq!(s.combo().fever_ticks, FEVER_TICKS - 1);
    }

    #[test]
    fn test_progression_applied_on_milestone() {
        let mut s = session();
        s.state.score = 2;
        feed(&mut s);
        let report = s.tick(0.0);
        assert_eq!(report.progress, vec![ProgressEvent::ObstacleAdded { score: 3 }]);
        assert_eq!(s.state().obstacles.len(), 1);
    }

    #[test]
    fn test_best_score_persisted() {
        let mut s = session();
        feed(&mut s);
        s.tick(0.0);
        assert_eq!(s.best_score(), 1.0);
        assert_eq!(s.scores().store().raw("snake_best_score"), Some("1"));
    }

    #[test]
    fn test_game_over_report() {
        let mut s = session();
        s.state.snake = vec![Cell::new(19, 5)];
        s.state.direction = Direction::Right;
        s.state.next_direction = Direction::Right;
        let report = s.tick(0.0);
        assert!(report.game_over);
        assert!(s.state().is_over());

        // Further ticks do nothing
        let again = s.tick(16.0);
        assert!(!again.game_over);
        assert!(s.state().is_over());
    }

    #[test]
    fn test_direction_by_name() {
        let mut s = session();
        s.set_direction_name("up");
        assert_eq!(s.state().next_direction, Direction::Up);
        s.set_direction_name("sideways");
        assert_eq!(s.state().next_direction, Direction::Up);
        s.set_direction_name("left");
        assert_eq!(s.state().next_direction, Direction::Up);
    }

    #[test]
    fn test_tick_interval() {
        let mut s = session();
        assert_eq!(s.tick_interval_ms(), 140.0);

        s.state.level = 2;
        // round(140 / e^0.115) = 125
        assert_eq!(s.tick_interval_ms(), 125.0);

        s.state.slow_ticks = 3;
        assert_eq!(s.tick_interval_ms(), 170.0);

        s.state.snake = vec![Cell::new(0, 0); 9];
        assert_eq!(s.tick_interval_ms(), 168.0);

        s.combo.fever_ticks = 5;
        assert_eq!(s.tick_interval_ms(), 148.0);
    }

    #[test]
    fn test_restart_resets_combo() {
        let mut s = session();
        feed(&mut s);
        s.tick(0.0);
        s.restart();
        assert_eq!(s.state().score, 0);
        assert_eq!(*s.combo(), Combo::default());
        assert_eq!(s.best_score(), 1.0);
    }
}
