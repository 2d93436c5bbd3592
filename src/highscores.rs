//! Best-score records
//!
//! One number per game under a fixed key, stored as a decimal string. Records
//! only ever go up. Storage trouble never reaches the caller: reads fall back
//! to a default and failed writes are logged and dropped.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

/// Which record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKey {
    /// Best Snake score
    Snake,
    /// Best combined Pong score
    Pong,
    /// Longest bullet-hell survival time (seconds)
    Bullet,
}

impl ScoreKey {
    /// Storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreKey::Snake => "snake_best_score",
            ScoreKey::Pong => "pong_best_total",
            ScoreKey::Bullet => "bullet_best_time",
        }
    }
}

/// High-score accessor over a key-value store
#[derive(Debug, Clone, Default)]
pub struct HighScores<S: ScoreStore> {
    store: S,
}

impl<S: ScoreStore> HighScores<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Stored record, or `fallback` when it is missing, unreadable or not a
    /// finite number.
    pub fn get(&self, key: ScoreKey, fallback: f64) -> f64 {
        match self.store.get_item(key.as_str()) {
            Ok(Some(raw)) => match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    log::warn!("Ignoring malformed {} record {:?}", key.as_str(), raw);
                    fallback
                }
            },
            Ok(None) => fallback,
            Err(e) => {
                log::warn!("Could not read {}: {}", key.as_str(), e);
                fallback
            }
        }
    }

    /// Record `value` if it beats the stored one and return the resulting
    /// best. A non-finite `value` is rejected and yields 0.
    pub fn set_max(&mut self, key: ScoreKey, value: f64) -> f64 {
        if !value.is_finite() {
            return 0.0;
        }

        let best = self.get(key, 0.0).max(value);
        match self.store.set_item(key.as_str(), &best.to_string()) {
            Ok(()) => log::debug!("{} = {}", key.as_str(), best),
            Err(e) => log::warn!("Could not save {}: {}", key.as_str(), e),
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_keys() {
        assert_eq!(ScoreKey::Snake.as_str(), "snake_best_score");
        assert_eq!(ScoreKey::Pong.as_str(), "pong_best_total");
        assert_eq!(ScoreKey::Bullet.as_str(), "bullet_best_time");
    }

    #[test]
    fn test_missing_uses_fallback() {
        let scores = HighScores::new(MemoryStore::new());
        assert_eq!(scores.get(ScoreKey::Snake, 7.0), 7.0);
    }

    #[test]
    fn test_malformed_uses_fallback() {
        let store = MemoryStore::new()
            .with_item("snake_best_score", "abc")
            .with_item("pong_best_total", "inf");
        let scores = HighScores::new(store);
        assert_eq!(scores.get(ScoreKey::Snake, 2.0), 2.0);
        assert_eq!(scores.get(ScoreKey::Pong, 0.0), 0.0);
    }

    #[test]
    fn test_set_max_is_monotonic() {
        let mut scores = HighScores::new(MemoryStore::new());
        assert_eq!(scores.set_max(ScoreKey::Snake, 5.0), 5.0);
        assert_eq!(scores.set_max(ScoreKey::Snake, 3.0), 5.0);
        assert_eq!(scores.get(ScoreKey::Snake, 0.0), 5.0);
        assert_eq!(scores.store().raw("snake_best_score"), Some("5"));
    }

    #[test]
    fn test_fractional_values() {
        let mut scores = HighScores::new(MemoryStore::new());
        scores.set_max(ScoreKey::Bullet, 12.5);
        assert_eq!(scores.store().raw("bullet_best_time"), Some("12.5"));
        assert_eq!(scores.get(ScoreKey::Bullet, 0.0), 12.5);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut scores = HighScores::new(MemoryStore::new().with_item("pong_best_total", "4"));
        assert_eq!(scores.set_max(ScoreKey::Pong, f64::NAN), 0.0);
        assert_eq!(scores.store().raw("pong_best_total"), Some("4"));
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let mut scores = HighScores::new(MemoryStore::new().fail_writes(true));
        assert_eq!(scores.set_max(ScoreKey::Snake, 9.0), 9.0);
        assert_eq!(scores.get(ScoreKey::Snake, 1.0), 1.0);

        let scores = HighScores::new(
            MemoryStore::new()
                .with_item("snake_best_score", "40")
                .fail_reads(true),
        );
        assert_eq!(scores.get(ScoreKey::Snake, 3.0), 3.0);
    }

    #[test]
    fn test_into_store_keeps_records() {
        let mut scores = HighScores::new(MemoryStore::new());
        scores.set_max(ScoreKey::Pong, 6.0);
        let store = scores.into_store();
        assert_eq!(store.raw("pong_best_total"), Some("6"));
        assert_eq!(HighScores::new(store).get(ScoreKey::Pong, 0.0), 6.0);
    }
}
