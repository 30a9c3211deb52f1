//! Application configuration, loaded from an optional JSON file.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "tick_rate": 60, "sim": { "seed": 7, "motion": { "flee_jitter": 1.0 } } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use dogbird_core::constants::TICK_RATE;
use dogbird_sim::engine::SimConfig;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log at debug level.
    pub verbose: bool,
    /// Where the journal is loaded from and saved to. `None` keeps
    /// everything in memory.
    pub journal_path: Option<PathBuf>,
    /// Clock rate in Hz.
    pub tick_rate: u32,
    pub sim: SimConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            journal_path: None,
            tick_rate: TICK_RATE,
            sim: SimConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read a config file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = fs::read_to_string(path).map_err(|source| AppError::Io {
            action: "read config",
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| AppError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a config file if one was given and exists, else use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                log::warn!("config `{}` not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}
