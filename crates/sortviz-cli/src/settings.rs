use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sortviz_engine::{Algorithm, EngineConfig, SpeedSetting};

/// Persisted defaults for `sortviz run`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub algorithm: Algorithm,
    pub engine: EngineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bubble,
            engine: EngineConfig::default(),
        }
    }
}

/// Values given on the command line; each one replaces the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub algorithm: Option<Algorithm>,
    pub size: Option<usize>,
    pub speed: Option<u8>,
    pub seed: Option<u64>,
}

pub fn default_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push("sortviz");
    base.push("settings.json");
    Some(base)
}

impl Settings {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("{} is not a valid settings file", path.display()))?;
        settings
            .engine
            .validate()
            .with_context(|| format!("{} holds invalid settings", path.display()))?;
        Ok(settings)
    }

    /// Loads from an explicit path, or the per-user location when none is
    /// given.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = explicit.map(Path::to_path_buf).or_else(default_path);
        let settings = match &path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok((settings, path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("failed to encode settings")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write settings file {}", path.display()))
    }

    pub fn apply(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(algorithm) = overrides.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(size) = overrides.size {
            self.engine.size = size;
        }
        if let Some(speed) = overrides.speed {
            self.engine.speed = SpeedSetting::new(speed)?;
        }
        if let Some(seed) = overrides.seed {
            self.engine.seed = Some(seed);
        }
        self.engine.validate()?;
        Ok(self)
    }
}
