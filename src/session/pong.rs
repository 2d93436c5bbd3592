//! Pong loop driver

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, PONG_STEP_MS};
use crate::highscores::{HighScores, ScoreKey};
use crate::persistence::ScoreStore;
use crate::settings::PongSettings;
use crate::sim::pong::{self, PaddleMove, PongState, Side};

/// A Pong match plus everything the loop needs around it
pub struct PongSession<S: ScoreStore> {
    state: PongState,
    settings: PongSettings,
    scores: HighScores<S>,
    best_total: f64,
    accumulator: f32,
}

impl<S: ScoreStore> PongSession<S> {
    pub fn new(settings: PongSettings, store: S) -> Self {
        let scores = HighScores::new(store);
        let best_total = scores.get(ScoreKey::Pong, 0.0);
        log::info!("Pong session ready (best total {})", best_total);
        Self {
            state: PongState::with_settings(&settings),
            settings,
            scores,
            best_total,
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &PongState {
        &self.state
    }

    pub fn best_total(&self) -> f64 {
        self.best_total
    }

    pub fn scores(&self) -> &HighScores<S> {
        &self.scores
    }

    pub fn set_move(&mut self, side: Side, movement: PaddleMove) {
        self.state = pong::set_move(&self.state, side, movement);
    }

    pub fn clear_move(&mut self, side: Side) {
        self.state = pong::clear_move(&self.state, side);
    }

    pub fn toggle_pause(&mut self) {
        self.state = pong::toggle_pause(&self.state);
    }

    /// Fresh match; the best total is kept
    pub fn restart(&mut self) {
        self.state = PongState::with_settings(&self.settings);
        self.accumulator = 0.0;
    }

    /// Account for `elapsed_ms` of wall time and run the fixed steps it pays
    /// for. Returns the number of steps run. A non-finite `elapsed_ms` counts
    /// as no time at all.
    pub fn update(&mut self, elapsed_ms: f32) -> u32 {
        if elapsed_ms.is_finite() {
            self.accumulator += elapsed_ms.clamp(0.0, MAX_FRAME_MS);
        }

        let mut substeps = 0;
        while self.accumulator >= PONG_STEP_MS && substeps < MAX_SUBSTEPS {
            self.tick();
            self.accumulator -= PONG_STEP_MS;
            substeps += 1;
        }
        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(PONG_STEP_MS);
        }
        substeps
    }

    /// One fixed step
    pub fn tick(&mut self) {
        let before = self.state.ticks;
        self.state = pong::step(&self.state);
        if self.state.ticks == before {
            return;
        }

        if let Some(every) = self.settings.extra_ball_every.filter(|n| *n > 0) {
            if self.state.ticks % every == 0 && self.state.balls.len() < self.settings.max_balls {
                self.state = pong::add_ball(&self.state);
                log::debug!("Pong added ball #{}", self.state.balls.len());
            }
        }

        let total = f64::from(self.state.total_score());
        if total > self.best_total {
            self.best_total = self.scores.set_max(ScoreKey::Pong, total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::pong::{Ball, PongStatus};

    fn session() -> PongSession<MemoryStore> {
        PongSession::new(PongSettings::default(), MemoryStore::new())
    }

    #[test]
    fn test_update_runs_fixed_steps() {
        let mut s = session();
        assert_eq!(s.update(10.0), 0);
        assert_eq!(s.update(10.0), 1);
        assert_eq!(s.state().ticks, 1);
        assert_eq!(s.update(32.0), 2);
        assert_eq!(s.state().ticks, 3);
    }

    #[test]
    fn test_update_caps_substeps() {
        let mut s = session();
        assert_eq!(s.update(10_000.0), MAX_SUBSTEPS);
        assert_eq!(s.state().ticks, u64::from(MAX_SUBSTEPS));
        // Leftover backlog is dropped down to one step
        assert_eq!(s.update(0.0), 1);
    }

    #[test]
    fn test_update_ignores_non_finite_elapsed() {
        let mut s = session();
        assert_eq!(s.update(f32::NAN), 0);
        assert_eq!(s.update(f32::INFINITY), 0);
        assert_eq!(s.update(-5.0), 0);
        assert_eq!(s.update(32.0), 2);
        assert_eq!(s.update(1000.0), MAX_SUBSTEPS);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let mut s = session();
        s.toggle_pause();
        assert_eq!(s.state().status, PongStatus::Paused);
        s.update(64.0);
        assert_eq!(s.state().ticks, 0);
    }

    #[test]
    fn test_best_total_recorded() {
        let mut s = session();
        s.state.balls = vec![Ball::new(-20.0, 0.0, -4.0, 0.0)];
        s.tick();
        assert_eq!(s.state().right_score, 1);
        assert_eq!(s.best_total(), 1.0);
        assert_eq!(s.scores().store().raw("pong_best_total"), Some("1"));

        s.restart();
        assert_eq!(s.state().total_score(), 0);
        assert_eq!(s.best_total(), 1.0);
    }

    #[test]
    fn test_best_total_loaded_from_store() {
        let s = PongSession::new(
            PongSettings::default(),
            MemoryStore::new().with_item("pong_best_total", "17"),
        );
        assert_eq!(s.best_total(), 17.0);
    }

    #[test]
    fn test_extra_balls() {
        let settings = PongSettings {
            extra_ball_every: Some(10),
            max_balls: 2,
            ..PongSettings::default()
        };
        let mut s = PongSession::new(settings, MemoryStore::new());
        for _ in 0..30 {
            s.tick();
        }
        assert_eq!(s.state().balls.len(), 2);
    }

    #[test]
    fn test_intent_passthrough() {
        let mut s = session();
        s.set_move(Side::Left, PaddleMove::Down);
        s.tick();
        assert_eq!(s.state().left_y, 134.0);
        s.clear_move(Side::Left);
        s.tick();
        assert_eq!(s.state().left_y, 134.0);
    }
}
