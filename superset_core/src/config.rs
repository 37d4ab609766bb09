//! Configuration file support for superset.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/superset/config.toml`.

use crate::{Error, ExerciseFilters, MuscleGroup, Result, DEFAULT_INTENSITY_LEVEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Where the exercise catalog comes from
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON catalog file; the built-in catalog is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Request defaults applied when the command line leaves them out
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,

    #[serde(default = "default_intensity_level")]
    pub intensity_level: u8,

    #[serde(default)]
    pub equipment: Vec<String>,

    #[serde(default)]
    pub muscle_groups: Vec<MuscleGroup>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_duration_minutes(),
            intensity_level: default_intensity_level(),
            equipment: Vec::new(),
            muscle_groups: Vec::new(),
        }
    }
}

impl DefaultsConfig {
    /// Filters built from the configured defaults
    pub fn filters(&self) -> ExerciseFilters {
        ExerciseFilters {
            muscle_groups: self.muscle_groups.iter().copied().collect(),
            equipment: self.equipment.iter().cloned().collect(),
            intensity_level: self.intensity_level,
        }
    }
}

// Default value functions
fn default_duration_minutes() -> u32 {
    30
}

fn default_intensity_level() -> u8 {
    DEFAULT_INTENSITY_LEVEL
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("HOME environment variable not set".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("superset").join("config.toml"))
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.defaults.intensity_level) {
            return Err(Error::Config(format!(
                "intensity_level must be between 1 and 5, got {}",
                self.defaults.intensity_level
            )));
        }
        if self.defaults.duration_minutes == 0 {
            return Err(Error::Config("duration_minutes must be positive".into()));
        }
        Ok(())
    }
}
