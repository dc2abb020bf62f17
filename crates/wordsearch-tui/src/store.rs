use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use wordsearch_core::{Puzzle, PuzzleError};

/// Why a puzzle file could not be read or written. Load failures leave the
/// in-memory puzzle untouched; the app reports them as messages.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not a puzzle file: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} holds an inconsistent puzzle: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: PuzzleError,
    },
}

/// Directory for saves and configuration
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordsearch")
}

/// Where the quick-save slot lives
pub fn default_save_path() -> PathBuf {
    data_dir().join("puzzle.json")
}

/// Write a puzzle to `path`, creating the parent directory as needed
pub fn save_puzzle(puzzle: &Puzzle, path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(puzzle).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a puzzle back and re-check its invariants before handing it out
pub fn load_puzzle(path: &Path) -> Result<Puzzle, StoreError> {
    let json = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let puzzle: Puzzle = serde_json::from_str(&json).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    puzzle.validate().map_err(|source| StoreError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(puzzle)
}

/// Small persisted preferences blob
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub theme: String,
}

fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Load preferences, falling back to defaults on any problem
pub fn load_config() -> Config {
    match fs::read_to_string(config_path()) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

/// Persist preferences, best effort
pub fn save_config(config: &Config) {
    let _ = fs::create_dir_all(data_dir());
    if let Ok(json) = serde_json::to_string_pretty(config) {
        let _ = fs::write(config_path(), json);
    }
}
