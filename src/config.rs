//! Application configuration.
//!
//! A small TOML file names the three input files, the aggregate artifact
//! path, and the logging setup. Every field has a default matching the
//! standard `data/` layout, so an empty file (or no file at all) runs the
//! service against the checked-in dataset.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

use crate::model::WxError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Station→county reference CSV.
    pub stations_csv: PathBuf,
    /// Raw daily observation CSV (2016–2020 window).
    pub weather_csv: PathBuf,
    /// County boundary GeoJSON.
    pub geometry_geojson: PathBuf,
    /// Where the aggregate artifact is written.
    pub aggregate_csv: PathBuf,
    /// Minimum level: "debug", "info", "warn", "error" or "off".
    pub log_level: String,
    /// Optional log file, appended alongside console output.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            stations_csv: PathBuf::from("data/temp_stations.csv"),
            weather_csv: PathBuf::from("data/2016_2020_ca_wthr.csv"),
            geometry_geojson: PathBuf::from("data/CA_Counties_TIGER2016.geojson"),
            aggregate_csv: PathBuf::from("data/2016_2020_ca_tmax_tmin_mnth.csv"),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<AppConfig, WxError> {
        let text = fs::read_to_string(path).map_err(|source| WxError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses configuration from TOML text.
    pub fn parse(text: &str) -> Result<AppConfig, WxError> {
        let config: AppConfig =
            toml::from_str(text).map_err(|e| WxError::Config(e.to_string()))?;
        // Validate the level up front so a typo fails at startup, not at
        // first log call.
        config.level_filter()?;
        Ok(config)
    }

    /// The configured log level as a `LevelFilter`.
    pub fn level_filter(&self) -> Result<LevelFilter, WxError> {
        LevelFilter::from_str(&self.log_level).map_err(|_| {
            WxError::Config(format!("unknown log_level '{}'", self.log_level))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
