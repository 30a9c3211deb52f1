//! Journal persistence: the goal and every dog-bird, as one JSON file.
//!
//! The whole file is rewritten on every save. There is no journaling or
//! partial-write recovery beyond that.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use serde::{Deserialize, Serialize};

use dogbird_core::record::DogBirdRecord;

use crate::error::AppError;

/// Everything that survives a restart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub dog_birds: Vec<DogBirdRecord>,
    /// Unix seconds of the last save.
    #[serde(default)]
    pub saved_at: u64,
}

impl Journal {
    pub fn new(goal: Option<String>, dog_birds: Vec<DogBirdRecord>) -> Self {
        Self {
            goal,
            dog_birds,
            saved_at: 0,
        }
    }
}

pub fn save_to_file(path: &Path, journal: &Journal) -> Result<(), AppError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| AppError::Io {
            action: "create journal directory",
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let stamped = Journal {
        saved_at: unix_now(),
        ..journal.clone()
    };
    let json = serde_json::to_string_pretty(&stamped).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| AppError::Io {
        action: "write journal",
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "saved {} dog-bird(s) to {}",
        stamped.dog_birds.len(),
        path.display()
    );
    Ok(())
}

pub fn load_from_file(path: &Path) -> Result<Journal, AppError> {
    let json = fs::read_to_string(path).map_err(|source| AppError::Io {
        action: "read journal",
        path: path.to_path_buf(),
        source,
    })?;
    let journal: Journal = serde_json::from_str(&json).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "loaded {} dog-bird(s) from {}",
        journal.dog_birds.len(),
        path.display()
    );
    Ok(journal)
}

/// A missing journal is an empty one; a corrupt one is still an error.
pub fn load_or_default(path: &Path) -> Result<Journal, AppError> {
    if path.exists() {
        load_from_file(path)
    } else {
        Ok(Journal::default())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
