//! Runtime configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. A missing file is not an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use eduscope_logic::constants::timing::{SETTLE_PERIOD_SECS, TICK_INTERVAL_MS};
use eduscope_logic::population::PopulationParams;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoreConfig {
    /// Directory holding one progress file per lesson.
    pub storage_dir: PathBuf,
    pub tick_interval_ms: u64,
    pub settle_period_secs: f32,
    /// Catch-up ticks allowed per `update`; a longer stall drops the rest.
    pub max_catch_up_ticks: u32,
    pub population: PopulationParams,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".eduscope/progress"),
            tick_interval_ms: TICK_INTERVAL_MS,
            settle_period_secs: SETTLE_PERIOD_SECS,
            max_catch_up_ticks: 10,
            population: PopulationParams::default(),
        }
    }
}

impl CoreConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from `path`, or defaults when the file doesn't exist.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}
