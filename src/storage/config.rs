//! Application configuration.
//!
//! Loaded from `config.toml` in the platform data directory; a missing file
//! means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::Rating;
use crate::plan::generator::{GeneratorCriteria, GeneratorError, RoiFilter};
use crate::plan::types::DEFAULT_PLAN_NAME;
use crate::search::fuzzy::DEFAULT_THRESHOLD;

/// Storage key used for the plan snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "aum-microcycle-v2";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Search settings
    pub search: SearchSettings,
    /// Plan settings
    pub plan: PlanSettings,
    /// Generator defaults
    pub generator: GeneratorSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            search: SearchSettings::default(),
            plan: PlanSettings::default(),
            generator: GeneratorSettings::default(),
        }
    }
}

impl AppConfig {
    /// Path of the snapshot database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("microcycle.db")
    }
}

/// Fuzzy search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum normalised distance for a match (0.0 exact, 1.0 anything)
    pub threshold: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Plan settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSettings {
    /// Name for new and cleared plans
    pub default_name: String,
    /// Key the plan snapshot is stored under
    pub storage_key: String,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_PLAN_NAME.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Auto-generator defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Target substring
    pub target: String,
    /// "Alto", "Bajo" or "Cualquiera"
    pub roi: String,
    /// Number of picks
    pub count: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            target: "Glúteo Mayor".to_string(),
            roi: Rating::Alto.display_name().to_string(),
            count: 4,
        }
    }
}

impl GeneratorSettings {
    /// Criteria built from these defaults.
    pub fn criteria(&self) -> Result<GeneratorCriteria, GeneratorError> {
        Ok(GeneratorCriteria {
            target_substring: self.target.clone(),
            roi: RoiFilter::parse(&self.roi)?,
            count: self.count,
        })
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "microcycle", "Microcycle")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = load_config_from(&get_config_path())?;
    config.data_dir = get_data_dir();
    Ok(config)
}

/// Load configuration from a file; a missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let data_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if !path.exists() {
        return Ok(AppConfig {
            data_dir,
            ..Default::default()
        });
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = data_dir;

    Ok(config)
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(&get_config_path(), config)
}

/// Save configuration to a file.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
