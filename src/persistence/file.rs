//! JSON file store for native builds

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ScoreStore;
use crate::error::Result;

#[derive(Debug, Serialize, Deserialize)]
struct BestRecord {
    best_distance: u32,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileStore {
    fn load_best(&self) -> Result<Option<u32>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let record: BestRecord = serde_json::from_str(&json)?;
        Ok(Some(record.best_distance))
    }

    fn save_best(&mut self, best: u32) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&BestRecord {
            best_distance: best,
        })?;

        // Write aside then swap, so a crash never leaves a torn file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Best distance {best} written to {}", self.path.display());
        Ok(())
    }
}
