//! Configuration for neo-watch

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::filter::dates::{CLOSE_APPROACH_DATE_FORMAT, ORBIT_DETERMINATION_DATE_FORMAT};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NeoWatchConfig {
    /// Date formats used by the filter
    #[serde(default)]
    pub formats: DateFormats,
    /// Historic orbit-determination date store
    #[serde(default)]
    pub history: HistoryConfig,
    /// Batch scan behaviour
    #[serde(default)]
    pub scan: ScanConfig,
}

impl NeoWatchConfig {
    /// Parse a TOML document; missing sections use defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check formats and the baseline date
    pub fn validate(&self) -> Result<()> {
        if self.formats.orbit_determination_date.trim().is_empty() {
            return Err(Error::config("formats.orbit_determination_date is empty"));
        }
        if self.formats.close_approach_date_full.trim().is_empty() {
            return Err(Error::config("formats.close_approach_date_full is empty"));
        }
        self.formats
            .parse_orbit_date(&self.history.baseline_orbit_determination_date)
            .map_err(|e| Error::config(format!("history.baseline_orbit_determination_date: {}", e)))?;
        Ok(())
    }
}

/// The two fixed timestamp formats (chrono `strftime` syntax)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormats {
    /// Format of `orbital_data.orbit_determination_date`
    #[serde(default = "default_orbit_format")]
    pub orbit_determination_date: String,
    /// Format of `close_approach_date_full`
    #[serde(default = "default_close_approach_format")]
    pub close_approach_date_full: String,
}

fn default_orbit_format() -> String { ORBIT_DETERMINATION_DATE_FORMAT.to_string() }
fn default_close_approach_format() -> String { CLOSE_APPROACH_DATE_FORMAT.to_string() }

impl Default for DateFormats {
    fn default() -> Self {
        Self {
            orbit_determination_date: default_orbit_format(),
            close_approach_date_full: default_close_approach_format(),
        }
    }
}

/// Historic date store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// JSON file mapping asteroid id to last processed orbit-determination date
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
    /// Historic date assumed for asteroids never processed before
    #[serde(default = "default_baseline")]
    pub baseline_orbit_determination_date: String,
}

fn default_history_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("neo-watch")
        .join("history.json")
}

fn default_baseline() -> String { "1900-01-01 00:00:00".to_string() }

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            baseline_orbit_determination_date: default_baseline(),
        }
    }
}

/// Batch scan configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Abort the whole scan on the first malformed asteroid instead of skipping it
    #[serde(default)]
    pub fail_fast: bool,
}
