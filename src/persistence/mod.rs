//! Best-score persistence
//!
//! Backends:
//! - `MemoryStore`: process-local, used by tests and as a fallback
//! - `FileStore`: JSON file, written via tmp + rename (native)
//! - `LocalStore`: browser LocalStorage (wasm32)

use std::cell::Cell;
use std::rc::Rc;

use crate::error::Result;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// LocalStorage key the best distance is kept under
pub const BEST_SCORE_KEY: &str = "BestDistance";

/// A place the single best-score integer lives between sessions
pub trait ScoreStore {
    /// Stored best, `None` if nothing has been saved yet
    fn load_best(&self) -> Result<Option<u32>>;
    fn save_best(&mut self, best: u32) -> Result<()>;
}

/// In-memory store. Clones share the same slot, so a test can keep a
/// handle while a session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<Cell<Option<u32>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        let store = Self::default();
        store.slot.set(Some(best));
        store
    }

    pub fn get(&self) -> Option<u32> {
        self.slot.get()
    }
}

impl ScoreStore for MemoryStore {
    fn load_best(&self) -> Result<Option<u32>> {
        Ok(self.slot.get())
    }

    fn save_best(&mut self, best: u32) -> Result<()> {
        self.slot.set(Some(best));
        Ok(())
    }
}
