//! Browser bindings
//!
//! Thin handles over the sessions. The page owns the frame loop and input
//! listeners and calls in with plain strings and timestamps.

use wasm_bindgen::prelude::*;

use crate::persistence::{LocalStorage, MemoryStore, ScoreStore};
use crate::rng::SeededSource;
use crate::session::{PongSession, SnakeSession};
use crate::settings::Settings;
use crate::sim::{PaddleMove, Side};

type WebStore = Box<dyn ScoreStore>;

/// LocalStorage when the page allows it, otherwise scores only last the visit
fn open_store() -> WebStore {
    match LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("High scores will not persist: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Arcade Cores loaded");
}

/// Replace the stored settings with a JSON document from the page. Takes
/// effect for games created afterwards.
#[wasm_bindgen]
pub fn save_settings(json: &str) -> Result<(), JsError> {
    Settings::import_json(json, &mut *open_store())?;
    Ok(())
}

/// Stored settings (or defaults) as JSON
#[wasm_bindgen]
pub fn settings_json() -> Result<String, JsError> {
    Ok(Settings::load_from_store(&*open_store()).to_json()?)
}

#[wasm_bindgen]
pub struct WebPong {
    session: PongSession<WebStore>,
}

#[wasm_bindgen]
impl WebPong {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebPong {
        let store = open_store();
        let settings = Settings::load_from_store(&*store);
        WebPong {
            session: PongSession::new(settings.pong, store),
        }
    }

    /// Feed one animation frame's elapsed time; returns steps run
    pub fn update(&mut self, elapsed_ms: f32) -> u32 {
        self.session.update(elapsed_ms)
    }

    /// `side` is "left"/"right", `movement` is "up"/"down"/anything else for still
    pub fn set_move(&mut self, side: &str, movement: &str) {
        if let Some(side) = Side::from_name(side) {
            self.session.set_move(side, PaddleMove::from_name(movement));
        }
    }

    pub fn clear_move(&mut self, side: &str) {
        if let Some(side) = Side::from_name(side) {
            self.session.clear_move(side);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn best_total(&self) -> f64 {
        self.session.best_total()
    }

    pub fn state_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.session.state())?)
    }
}

#[wasm_bindgen]
pub struct WebSnake {
    session: SnakeSession<WebStore>,
}

#[wasm_bindgen]
impl WebSnake {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebSnake {
        let store = open_store();
        let settings = Settings::load_from_store(&*store);
        let seed = SeededSource::from_entropy().seed();
        WebSnake {
            session: SnakeSession::new(settings.snake, settings.progression, store, seed),
        }
    }

    /// Advance one step; `now_ms` is the page clock. Returns the tick report
    /// as JSON.
    pub fn tick(&mut self, now_ms: f64) -> Result<String, JsError> {
        let report = self.session.tick(now_ms);
        Ok(serde_json::to_string(&report)?)
    }

    pub fn tick_interval_ms(&self) -> f64 {
        self.session.tick_interval_ms()
    }

    /// "up"/"down"/"left"/"right"; anything else is ignored
    pub fn set_direction(&mut self, name: &str) {
        self.session.set_direction_name(name);
    }

    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn best_score(&self) -> f64 {
        self.session.best_score()
    }

    pub fn combo_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.session.combo())?)
    }

    pub fn state_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.session.state())?)
    }
}
