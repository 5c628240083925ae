//! Configuration Module
//! Paths and analysis parameters, with defaults and optional JSON overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_DATA_PATH: &str = "../data/death_counts_DE_causes_2003-2022_gender_age.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "charts";
pub const DEFAULT_REPORT_YEAR: i32 = 2022;
/// Causes below this share (percent) are folded into "Other".
pub const DEFAULT_SHARE_THRESHOLD_PCT: f64 = 4.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("share_threshold_pct must be within 0..=100, got {0}")]
    Threshold(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Mortality export, relative to the working directory.
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    pub report_year: i32,
    pub share_threshold_pct: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            report_year: DEFAULT_REPORT_YEAR,
            share_threshold_pct: DEFAULT_SHARE_THRESHOLD_PCT,
        }
    }
}

impl AppConfig {
    /// Load a JSON config file; missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.share_threshold_pct) {
            return Err(ConfigError::Threshold(self.share_threshold_pct));
        }
        Ok(())
    }

    pub fn chart_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"report_year": 2021, "output_dir": "out"}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.report_year, 2021);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.share_threshold_pct, DEFAULT_SHARE_THRESHOLD_PCT);
    }

    #[test]
    fn rejects_bad_threshold() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"share_threshold_pct": 140.0}}"#).unwrap();
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Threshold(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
