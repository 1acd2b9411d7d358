//! Crate error type
//!
//! The simulation itself never fails (missing assets make a component inert,
//! duplicate events are no-ops). Errors only come from the edges: loading
//! tuning files and reading/writing the best score.

use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Filesystem failure (native file store, tuning file)
    Io(std::io::Error),
    /// Malformed JSON
    Json(serde_json::Error),
    /// No storage backend reachable (e.g. LocalStorage disabled)
    StorageUnavailable,
    /// Tuning values that cannot drive a session
    InvalidTuning(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "i/o error: {err}"),
            Self::Json(err) => write!(f, "invalid json: {err}"),
            Self::StorageUnavailable => write!(f, "storage backend unavailable"),
            Self::InvalidTuning(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
