//! High score tracking
//!
//! Two values are kept apart on purpose:
//! - `displayed`: what the label shows. Raised optimistically while scoring.
//! - `stored`: the last value read from (or written to) the store.
//!
//! The store is read when a scene starts and written, then flushed, only when
//! a run ends with a strictly better score.

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    displayed: u32,
    stored: u32,
}

impl HighScore {
    /// Read the stored high score. Store failures show 0.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let stored = match store.get_integer(HIGH_SCORE_KEY) {
            Ok(value) => to_points(value),
            Err(e) => {
                log::warn!("High score unavailable: {e}");
                0
            }
        };
        log::info!("High score: {stored}");
        Self {
            displayed: stored,
            stored,
        }
    }

    pub fn displayed(&self) -> u32 {
        self.displayed
    }

    pub fn stored(&self) -> u32 {
        self.stored
    }

    /// Raise the displayed value if `points` beats it. Does not touch the store.
    pub fn observe(&mut self, points: u32) -> bool {
        if points > self.displayed {
            self.displayed = points;
            true
        } else {
            false
        }
    }

    /// End of run: persist `points` if it strictly beats the stored value,
    /// then refresh the display from the store. Returns whether a new value
    /// was written.
    pub fn record_run_end(&mut self, points: u32, store: &mut dyn KeyValueStore) -> bool {
        let previous = match store.get_integer(HIGH_SCORE_KEY) {
            Ok(value) => to_points(value),
            Err(e) => {
                log::warn!("High score read failed, using cached value: {e}");
                self.stored
            }
        };

        let mut written = false;
        if points > previous {
            match store
                .set_integer(HIGH_SCORE_KEY, i64::from(points))
                .and_then(|_| store.flush())
            {
                Ok(()) => {
                    log::info!("New high score: {points} (was {previous})");
                    written = true;
                }
                Err(e) => log::warn!("Failed to persist high score {points}: {e}"),
            }
        }

        match store.get_integer(HIGH_SCORE_KEY) {
            Ok(value) => {
                self.stored = to_points(value);
                self.displayed = self.stored;
            }
            Err(e) => log::warn!("High score refresh failed, display is stale: {e}"),
        }

        written
    }
}

fn to_points(value: i64) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| {
        log::warn!("Stored high score {value} out of range, treating as 0");
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, UnavailableStore};

    #[test]
    fn test_load_reads_store() {
        let store = MemoryStore::with_value(HIGH_SCORE_KEY, 9);
        let hs = HighScore::load(&store);
        assert_eq!(hs.displayed(), 9);
        assert_eq!(hs.stored(), 9);
    }

    #[test]
    fn test_load_unavailable_is_zero() {
        let hs = HighScore::load(&UnavailableStore);
        assert_eq!(hs.displayed(), 0);
    }

    #[test]
    fn test_load_negative_is_zero() {
        let store = MemoryStore::with_value(HIGH_SCORE_KEY, -4);
        assert_eq!(HighScore::load(&store).stored(), 0);
    }

    #[test]
    fn test_observe_only_touches_display() {
        let mut hs = HighScore::load(&MemoryStore::with_value(HIGH_SCORE_KEY, 3));
        assert!(!hs.observe(3));
        assert!(hs.observe(4));
        assert_eq!(hs.displayed(), 4);
        assert_eq!(hs.stored(), 3);
    }

    #[test]
    fn test_tie_is_not_persisted() {
        let mut store = MemoryStore::with_value(HIGH_SCORE_KEY, 5);
        let mut hs = HighScore::load(&store);
        assert!(!hs.record_run_end(5, &mut store));
        assert_eq!(store.writes, 0);
        assert_eq!(store.flushes, 0);
        assert_eq!(hs.stored(), 5);
        assert_eq!(hs.displayed(), 5);
    }

    #[test]
    fn test_better_score_is_persisted_and_flushed() {
        let mut store = MemoryStore::with_value(HIGH_SCORE_KEY, 5);
        let mut hs = HighScore::load(&store);
        assert!(hs.record_run_end(6, &mut store));
        assert_eq!(store.get_integer(HIGH_SCORE_KEY).unwrap(), 6);
        assert_eq!(store.flushes, 1);
        assert_eq!(hs.stored(), 6);
        assert_eq!(hs.displayed(), 6);
    }

    #[test]
    fn test_refresh_drops_optimistic_display_on_worse_run() {
        let mut store = MemoryStore::with_value(HIGH_SCORE_KEY, 10);
        let mut hs = HighScore::load(&store);
        hs.observe(4);
        assert!(!hs.record_run_end(4, &mut store));
        assert_eq!(hs.displayed(), 10);
    }

    #[test]
    fn test_unavailable_store_is_not_fatal() {
        let mut hs = HighScore::default();
        hs.observe(8);
        assert!(!hs.record_run_end(8, &mut UnavailableStore));
        // Display stays where scoring left it
        assert_eq!(hs.displayed(), 8);
        assert_eq!(hs.stored(), 0);
    }
}
