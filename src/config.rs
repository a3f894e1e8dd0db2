use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::app_dirs::AppDirs;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file could not be accessed: {0}")]
    Io(#[from] io::Error),
    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Time limits and feedback delays for the games, plus an optional seed
/// that makes every round reproducible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub attention_secs: u32,
    pub memory_secs: u32,
    pub hemispheres_secs: u32,
    pub reading_secs: u32,
    /// Pause before a cleared grid is replaced by the next level's.
    pub regenerate_delay_ms: u32,
    /// How long right/wrong feedback shows in the pattern game.
    pub feedback_delay_ms: u32,
    pub pair_match_delay_ms: u32,
    pub pair_miss_delay_ms: u32,
    /// Pause between the last matched pair and the end of the game.
    pub finish_delay_ms: u32,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attention_secs: 30,
            memory_secs: 60,
            hemispheres_secs: 40,
            reading_secs: 45,
            regenerate_delay_ms: 500,
            feedback_delay_ms: 1000,
            pair_match_delay_ms: 500,
            pair_miss_delay_ms: 1000,
            finish_delay_ms: 1000,
            seed: None,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("mindgym_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<Config, ConfigError> {
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(cfg) => cfg,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "using default config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
