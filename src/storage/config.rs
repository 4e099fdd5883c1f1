//! Training settings and application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::plates::types::PlateInventory;
use crate::progression::types::{
    PlanExerciseConfig, ProgressionDefaults, DEFAULT_DELOAD_AFTER, DEFAULT_DELOAD_PERCENT,
    DEFAULT_INCREMENT, DEFAULT_TARGET_REPS,
};

/// Seconds of rest between sets when not configured.
pub const DEFAULT_REST_TIMER_SECS: u32 = 90;

/// Weight unit preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Pounds
    #[default]
    Lb,
    /// Kilograms
    Kg,
}

impl WeightUnit {
    /// Short label used in displays and settings.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Lb => "lb",
            WeightUnit::Kg => "kg",
        }
    }

    /// Granularity deload weights are rounded to.
    pub fn deload_rounding(&self) -> f64 {
        match self {
            WeightUnit::Lb => 5.0,
            WeightUnit::Kg => 2.5,
        }
    }

    /// Weight of a standard barbell.
    pub fn default_bar_weight(&self) -> f64 {
        match self {
            WeightUnit::Lb => 45.0,
            WeightUnit::Kg => 20.0,
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lb" | "lbs" => Ok(WeightUnit::Lb),
            "kg" | "kgs" => Ok(WeightUnit::Kg),
            other => Err(format!("Unknown weight unit: {}", other)),
        }
    }
}

/// Settings that drive suggestions, plate math and the rest timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSettings {
    /// Weight unit
    pub unit: WeightUnit,
    /// Bar weight; the unit's standard bar when unset
    pub bar_weight: Option<f64>,
    /// Weight added after a successful session
    pub increment: f64,
    /// Target reps per set
    pub reps: u32,
    /// Percent removed on deload
    pub deload_percent: f64,
    /// Consecutive failed sessions before a deload
    pub deload_after: u32,
    /// Rest between sets in seconds
    pub rest_timer_secs: u32,
    /// Plates owned; the unit's standard inventory when unset
    pub plates: Option<PlateInventory>,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            unit: WeightUnit::Lb,
            bar_weight: None,
            increment: DEFAULT_INCREMENT,
            reps: DEFAULT_TARGET_REPS,
            deload_percent: DEFAULT_DELOAD_PERCENT,
            deload_after: DEFAULT_DELOAD_AFTER,
            rest_timer_secs: DEFAULT_REST_TIMER_SECS,
            plates: None,
        }
    }
}

impl TrainingSettings {
    /// Effective bar weight.
    pub fn bar_weight(&self) -> f64 {
        self.bar_weight
            .filter(|w| *w > 0.0)
            .unwrap_or_else(|| self.unit.default_bar_weight())
    }

    /// Effective plate inventory. A saved inventory is used as is, even
    /// when every count is zero.
    pub fn plate_inventory(&self) -> PlateInventory {
        self.plates
            .clone()
            .unwrap_or_else(|| PlateInventory::standard(self.unit))
    }

    /// Progression defaults for fields a plan leaves unset.
    pub fn progression_defaults(&self) -> ProgressionDefaults {
        ProgressionDefaults {
            increment: self.increment,
            reps: self.reps,
            deload_percent: self.deload_percent,
            deload_after: self.deload_after,
        }
    }

    /// Fill a plan's unset fields from these settings. Plan values win.
    /// `sets` stays unset so the last session's count can apply.
    pub fn resolve(&self, config: &PlanExerciseConfig) -> PlanExerciseConfig {
        config.or(PlanExerciseConfig {
            sets: None,
            reps: Some(self.reps),
            increment: Some(self.increment),
            deload_percent: Some(self.deload_percent),
            deload_after: Some(self.deload_after),
        })
    }
}

/// Source of the user's training settings.
pub trait SettingsSource {
    fn training_settings(&self) -> TrainingSettings;
}

impl<T: SettingsSource + ?Sized> SettingsSource for &T {
    fn training_settings(&self) -> TrainingSettings {
        (**self).training_settings()
    }
}

impl SettingsSource for TrainingSettings {
    fn training_settings(&self) -> TrainingSettings {
        self.clone()
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Database file; `rustlift.db` in the data directory when unset
    pub database_path: Option<PathBuf>,
    /// Training settings
    pub training: TrainingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            database_path: None,
            training: TrainingSettings::default(),
        }
    }
}

impl AppConfig {
    /// Path of the SQLite database.
    pub fn database_file(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("rustlift.db"))
    }
}

impl SettingsSource for AppConfig {
    fn training_settings(&self) -> TrainingSettings {
        self.training.clone()
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "rustlift", "RustLift")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load application configuration from a file. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let data_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(get_data_dir);

    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig {
            data_dir,
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = data_dir;

    Ok(config)
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save application configuration to a file.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
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
