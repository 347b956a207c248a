use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::RunCalcError;
use crate::logging::{LogConfig, LogFormat, LogLevel};
use crate::units::{AltitudeUnit, TemperatureUnit, Units, WindUnit};
use crate::vdot::DisplayMode;

/// Dotted keys accepted by [`AppConfig::get_value`] and [`AppConfig::set_value`]
pub const CONFIG_KEYS: [&str; 8] = [
    "settings.units",
    "settings.temperature_unit",
    "settings.altitude_unit",
    "settings.wind_unit",
    "settings.display_mode",
    "settings.output",
    "logging.level",
    "logging.format",
];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// Defaults applied by the CLI when a flag is omitted
    pub settings: AppSettings,

    /// Logging setup
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// CLI defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Pace display units
    pub units: Units,

    pub temperature_unit: TemperatureUnit,

    pub altitude_unit: AltitudeUnit,

    pub wind_unit: WindUnit,

    /// Which environmental adjustment value to foreground
    pub display_mode: DisplayMode,

    /// Result rendering
    pub output: OutputFormat,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            units: Units::Metric,
            temperature_unit: TemperatureUnit::Fahrenheit,
            altitude_unit: AltitudeUnit::Feet,
            wind_unit: WindUnit::Mph,
            display_mode: DisplayMode::Effect,
            output: OutputFormat::Table,
        }
    }
}

/// How the CLI renders results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            settings: AppSettings::default(),
            logging: LogConfig::default(),
        }
    }
}

/// The name a unit-like enum has in the TOML file
fn serde_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => name,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

fn parse_setting<T: FromStr<Err = String>>(key: &str, value: &str) -> crate::error::Result<T> {
    value
        .parse()
        .map_err(|e: String| RunCalcError::Configuration(format!("{}: {}", key, e)))
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".runcalc")
            .join("config.toml")
    }

    /// Load `path` (or the default location), falling back to defaults when
    /// the file is missing or unreadable
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Ignoring unreadable config {}: {:#}",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Current value of a dotted key, spelled as in the TOML file
    pub fn get_value(&self, key: &str) -> crate::error::Result<String> {
        let value = match key {
            "settings.units" => serde_name(&self.settings.units),
            "settings.temperature_unit" => serde_name(&self.settings.temperature_unit),
            "settings.altitude_unit" => serde_name(&self.settings.altitude_unit),
            "settings.wind_unit" => serde_name(&self.settings.wind_unit),
            "settings.display_mode" => serde_name(&self.settings.display_mode),
            "settings.output" => serde_name(&self.settings.output),
            "logging.level" => serde_name(&self.logging.level),
            "logging.format" => serde_name(&self.logging.format),
            _ => {
                return Err(RunCalcError::Configuration(format!(
                    "unknown key '{}'",
                    key
                )))
            }
        };
        Ok(value)
    }

    /// Parse `value` and store it under a dotted key
    pub fn set_value(&mut self, key: &str, value: &str) -> crate::error::Result<()> {
        match key {
            "settings.units" => self.settings.units = parse_setting(key, value)?,
            "settings.temperature_unit" => {
                self.settings.temperature_unit = parse_setting(key, value)?
            }
            "settings.altitude_unit" => self.settings.altitude_unit = parse_setting(key, value)?,
            "settings.wind_unit" => self.settings.wind_unit = parse_setting(key, value)?,
            "settings.display_mode" => self.settings.display_mode = parse_setting(key, value)?,
            "settings.output" => self.settings.output = parse_setting::<OutputFormat>(key, value)?,
            "logging.level" => self.logging.level = parse_setting::<LogLevel>(key, value)?,
            "logging.format" => self.logging.format = parse_setting::<LogFormat>(key, value)?,
            _ => {
                return Err(RunCalcError::Configuration(format!(
                    "unknown key '{}'",
                    key
                )))
            }
        }
        self.metadata.updated_at = Utc::now();
        Ok(())
    }

    /// Every key with its current value
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get_value(key).ok().map(|value| (*key, value)))
            .collect()
    }
}
