//! Configuration management for unchin
//!
//! Config stored at: ~/.config/unchin/config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use unchin_types::{ConfigError, OutputFormat, Region, Result, VehicleClass};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// TOML rate table replacing the built-in time tariff
    #[serde(default)]
    pub rate_table: Option<PathBuf>,

    /// CSV of distance-tariff rows merged into the rate table
    #[serde(default)]
    pub distance_fare_csv: Option<PathBuf>,

    /// Region code used when none is given (関東)
    #[serde(default = "default_region")]
    pub default_region: u8,

    /// Vehicle code used when none is given (大型車)
    #[serde(default = "default_vehicle")]
    pub default_vehicle: u8,

    #[serde(default = "default_minutes")]
    pub default_driving_minutes: u32,

    #[serde(default = "default_minutes")]
    pub default_loading_minutes: u32,

    /// Use the fixed 30 km / 50 km allowance for the time tariff
    #[serde(default)]
    pub use_simple_allowance: bool,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
}

fn default_region() -> u8 {
    3
}

fn default_vehicle() -> u8 {
    3
}

fn default_minutes() -> u32 {
    60
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rate_table: None,
            distance_fare_csv: None,
            default_region: default_region(),
            default_vehicle: default_vehicle(),
            default_driving_minutes: default_minutes(),
            default_loading_minutes: default_minutes(),
            use_simple_allowance: false,
            output_format: default_output_format(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("unchin");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path_or = |p: &Option<PathBuf>, fallback: &str| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| fallback.to_string())
        };
        let region = Region::from_code(i64::from(self.default_region))
            .map(|r| r.name())
            .unwrap_or("(invalid)");
        let vehicle = VehicleClass::from_code(i64::from(self.default_vehicle))
            .map(|v| v.name())
            .unwrap_or("(invalid)");

        writeln!(f, "Unchin Configuration")?;
        writeln!(f, "====================")?;
        writeln!(f)?;
        writeln!(f, "Rate table:        {}", path_or(&self.rate_table, "(built-in)"))?;
        writeln!(f, "Distance fare CSV: {}", path_or(&self.distance_fare_csv, "(none)"))?;
        writeln!(f, "Default region:    {} ({})", self.default_region, region)?;
        writeln!(f, "Default vehicle:   {} ({})", self.default_vehicle, vehicle)?;
        writeln!(f, "Driving minutes:   {}", self.default_driving_minutes)?;
        writeln!(f, "Loading minutes:   {}", self.default_loading_minutes)?;
        writeln!(f, "Simple allowance:  {}", self.use_simple_allowance)?;
        writeln!(f, "Output format:     {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:       {}", path.display())?;
        }

        Ok(())
    }
}
