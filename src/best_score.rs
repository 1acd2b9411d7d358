//! Best flight distance bookkeeping
//!
//! Loaded once when the host starts (default 0), compared at every game
//! over, written back only when beaten.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::ScoreStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub best_distance: u32,
}

impl BestScore {
    pub fn new(best_distance: u32) -> Self {
        Self { best_distance }
    }

    /// Load from a store. Storage failures degrade to 0 with a warning.
    pub fn load(store: &dyn ScoreStore) -> Self {
        match store.load_best() {
            Ok(Some(best)) => {
                log::info!("Best distance: {best}");
                Self::new(best)
            }
            Ok(None) => {
                log::info!("No best distance saved yet");
                Self::default()
            }
            Err(err) => {
                log::warn!("Could not read best distance, starting at 0: {err}");
                Self::default()
            }
        }
    }

    /// Would `score` beat the current best?
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best_distance
    }

    /// Record a finished session's score; returns true on a new best.
    pub fn submit(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best_distance = score;
        true
    }

    pub fn save(&self, store: &mut dyn ScoreStore) -> Result<()> {
        store.save_best(self.best_distance)?;
        log::info!("New best distance saved: {}", self.best_distance);
        Ok(())
    }
}
