use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::data::loader::DataSource;
use crate::data::model::TrendWindow;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE_NAME: &str = "salary-dashboard.toml";

/// Errors that may occur while loading the dashboard configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Startup settings. Every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// File path or `http(s)://` URL of the dataset.
    pub data_source: String,
    pub trend_start: i32,
    pub trend_end: i32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let window = TrendWindow::default();
        Self {
            data_source: "myData.json".to_string(),
            trend_start: window.start,
            trend_end: window.end,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from `path`, returning defaults if it is missing.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.data_source)
    }

    pub fn trend_window(&self) -> TrendWindow {
        TrendWindow::new(self.trend_start, self.trend_end)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config =
            DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE_NAME)).expect("load");
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(
            config.data_source(),
            DataSource::File(PathBuf::from("myData.json"))
        );
        assert_eq!(config.trend_window(), TrendWindow::new(2020, 2024));
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "data_source = \"https://example.com/jobs.json\"\ntrend_start = 2018"
        )
        .expect("write");

        let config = DashboardConfig::load_or_default(file.path()).expect("load");
        assert_eq!(
            config.data_source(),
            DataSource::Url("https://example.com/jobs.json".into())
        );
        assert_eq!(config.trend_window(), TrendWindow::new(2018, 2024));
        assert_eq!(config.window_width, 1200.0);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "trend_start = \"soon\"").expect("write");

        let err = DashboardConfig::load_or_default(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
