//! Browser LocalStorage store (wasm32)

use super::{BEST_SCORE_KEY, ScoreStore};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(Error::StorageUnavailable)
    }
}

impl ScoreStore for LocalStore {
    fn load_best(&self) -> Result<Option<u32>> {
        let storage = Self::storage()?;
        let Ok(Some(raw)) = storage.get_item(BEST_SCORE_KEY) else {
            return Ok(None);
        };
        match raw.trim().parse::<u32>() {
            Ok(best) => Ok(Some(best)),
            Err(_) => {
                log::warn!("Ignoring unreadable best distance '{raw}'");
                Ok(None)
            }
        }
    }

    fn save_best(&mut self, best: u32) -> Result<()> {
        Self::storage()?
            .set_item(BEST_SCORE_KEY, &best.to_string())
            .map_err(|_| Error::StorageUnavailable)
    }
}
