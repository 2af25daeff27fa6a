use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::models::{RepMaxes, Units};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    pub metadata: ConfigMetadata,

    /// The configured athlete
    pub athlete: AthleteSettings,

    /// General application settings
    pub settings: AppSettings,

    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
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

/// Athlete profile: owner identity, display units and current maxes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteSettings {
    /// Owner key scoping every storage read
    pub id: String,

    /// Display name
    pub name: Option<String>,

    /// Display units; generated numbers are never converted
    pub units: Units,

    /// Current one-rep maxes
    pub maxes: MaxSettings,
}

/// Configured one-rep maxes, each optional until tested
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaxSettings {
    pub squat: Option<Decimal>,
    pub bench: Option<Decimal>,
    pub deadlift: Option<Decimal>,
    pub ohp: Option<Decimal>,
}

impl MaxSettings {
    /// The full set of maxes, once all four lifts are configured
    pub fn rep_maxes(&self) -> Option<RepMaxes> {
        Some(RepMaxes {
            squat: self.squat?,
            bench: self.bench?,
            deadlift: self.deadlift?,
            ohp: self.ohp?,
        })
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Data directory path
    pub data_dir: PathBuf,
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
            athlete: AthleteSettings::default(),
            settings: AppSettings::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for AthleteSettings {
    fn default() -> Self {
        AthleteSettings {
            id: "default".to_string(),
            name: None,
            units: Units::default(),
            maxes: MaxSettings::default(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            data_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("liftrs"),
        }
    }
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

        let toml_content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("liftrs")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults when no file exists
    pub fn load_or_default() -> Self {
        match Self::load_from_file(Self::default_config_path()) {
            Ok(config) => config,
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to default location
    pub fn save_default(&mut self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to_file(config_path)
    }

    /// Path of the SQLite database under the data directory
    pub fn database_path(&self) -> PathBuf {
        self.settings.data_dir.join("liftrs.db")
    }

    /// Read one configuration value by dotted key
    pub fn get_value(&self, key: &str) -> Option<String> {
        match key {
            "athlete.id" => Some(self.athlete.id.clone()),
            "athlete.name" => Some(self.athlete.name.clone().unwrap_or_default()),
            "athlete.units" => Some(self.athlete.units.to_string()),
            "athlete.maxes.squat" => Some(decimal_value(self.athlete.maxes.squat)),
            "athlete.maxes.bench" => Some(decimal_value(self.athlete.maxes.bench)),
            "athlete.maxes.deadlift" => Some(decimal_value(self.athlete.maxes.deadlift)),
            "athlete.maxes.ohp" => Some(decimal_value(self.athlete.maxes.ohp)),
            "settings.data_dir" => Some(self.settings.data_dir.display().to_string()),
            "log.level" => Some(self.log.level.to_filter()),
            "log.format" => Some(format!("{:?}", self.log.format).to_lowercase()),
            _ => None,
        }
    }

    /// Set one configuration value by dotted key
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "athlete.id" => self.athlete.id = value.to_string(),
            "athlete.name" => {
                self.athlete.name = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "athlete.units" => {
                self.athlete.units = match value.to_lowercase().as_str() {
                    "lb" | "lbs" => Units::Lb,
                    "kg" | "kgs" => Units::Kg,
                    other => return Err(anyhow::anyhow!("Unknown units: {}", other)),
                }
            }
            "athlete.maxes.squat" => self.athlete.maxes.squat = Some(parse_weight(value)?),
            "athlete.maxes.bench" => self.athlete.maxes.bench = Some(parse_weight(value)?),
            "athlete.maxes.deadlift" => self.athlete.maxes.deadlift = Some(parse_weight(value)?),
            "athlete.maxes.ohp" => self.athlete.maxes.ohp = Some(parse_weight(value)?),
            "settings.data_dir" => self.settings.data_dir = PathBuf::from(value),
            "log.level" => {
                self.log.level = value
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?
            }
            "log.format" => {
                self.log.format = value
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?
            }
            _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
        }
        self.metadata.updated_at = Utc::now();
        Ok(())
    }

    /// All configuration values in display order
    pub fn list_values(&self) -> Vec<(String, String)> {
        const KEYS: &[&str] = &[
            "athlete.id",
            "athlete.name",
            "athlete.units",
            "athlete.maxes.squat",
            "athlete.maxes.bench",
            "athlete.maxes.deadlift",
            "athlete.maxes.ohp",
            "settings.data_dir",
            "log.level",
            "log.format",
        ];
        KEYS.iter()
            .filter_map(|key| self.get_value(key).map(|value| (key.to_string(), value)))
            .collect()
    }
}

fn decimal_value(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

fn parse_weight(value: &str) -> Result<Decimal> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid weight: {}", value))
}
