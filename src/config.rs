// src/config.rs

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use crate::{
    aggregate::views::TOP_FILMS,
    derive::InvalidDatePolicy,
    load::{LoadError, LoadOptions, Source},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Dashboard settings, read from YAML. Every field is optional in the file.
///
/// ```yaml
/// data: cleaned_film_data.csv
/// top_n: 10
/// invalid_dates: fail   # or: skip
/// http_timeout_secs: 30
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Path, URL or `-` for stdin.
    pub data: String,
    /// Length of the top films chart.
    pub top_n: usize,
    pub invalid_dates: InvalidDatePolicy,
    pub http_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data: "cleaned_film_data.csv".to_string(),
            top_n: TOP_FILMS,
            invalid_dates: InvalidDatePolicy::Fail,
            http_timeout_secs: 30,
        }
    }
}

impl DashboardConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".into()));
        }
        if self.data.trim().is_empty() {
            return Err(ConfigError::Invalid("data source is empty".into()));
        }
        Ok(())
    }

    pub fn source(&self) -> Result<Source, LoadError> {
        Source::parse(&self.data)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            http_timeout: Duration::from_secs(self.http_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.data, "cleaned_film_data.csv");
        assert_eq!(config.top_n, 10);
        assert_eq!(config.invalid_dates, InvalidDatePolicy::Fail);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = DashboardConfig::from_yaml_str("top_n: 5\ninvalid_dates: skip\n").unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.invalid_dates, InvalidDatePolicy::Skip);
        assert_eq!(config.data, "cleaned_film_data.csv");
        assert_eq!(config.http_timeout_secs, 30);
    }

    #[test]
    fn test_rejects_unknown_fields_and_zero_top_n() {
        assert!(matches!(
            DashboardConfig::from_yaml_str("colour: red\n"),
            Err(ConfigError::Yaml(_))
        ));
        assert!(matches!(
            DashboardConfig::from_yaml_str("top_n: 0\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_file() -> anyhow::Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "data: https://example.com/films.csv")?;
        writeln!(tmp, "http_timeout_secs: 5")?;

        let config = DashboardConfig::from_yaml_file(tmp.path())?;
        assert!(matches!(config.source()?, Source::Url(_)));
        assert_eq!(config.load_options().http_timeout, Duration::from_secs(5));
        Ok(())
    }
}
