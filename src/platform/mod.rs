//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger installation
//! - Clock-derived session seeds
//! - Default best-score storage

use crate::persistence::ScoreStore;

/// Install the logger for this target. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Seed a new session from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Where the best score lives by default on this target
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Box<dyn ScoreStore> {
    use crate::persistence::{FileStore, MemoryStore};

    match dirs::data_dir() {
        Some(dir) => Box::new(FileStore::new(dir.join("asteroid-run").join("best_score.json"))),
        None => {
            log::warn!("No data directory on this system; best distance will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn ScoreStore> {
    Box::new(crate::persistence::LocalStore::new())
}
