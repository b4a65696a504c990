use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::constants::{DEFAULT_HISTORY_CAPACITY, DEFAULT_HISTORY_FILE};
use crate::config::emission_factors::{EmissionFactors, LevelThresholds, SuggestionThresholds};

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(serde_json::Error),
    InvalidValue(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Config parse error: {}", e),
            ConfigError::InvalidValue(s) => write!(f, "Invalid config value: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub path: PathBuf,
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_HISTORY_FILE),
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalculatorConfig {
    pub factors: EmissionFactors,
    pub levels: LevelThresholds,
    pub suggestions: SuggestionThresholds,
    pub history: HistoryConfig,
    pub remote: Option<RemoteConfig>,
}

impl CalculatorConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: CalculatorConfig = serde_json::from_reader(reader)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded calculator config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.capacity == 0 {
            return Err(ConfigError::InvalidValue("history capacity must be at least 1".to_string()));
        }

        for (name, value) in self.factors.named_values() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue(format!(
                    "factor {} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        let levels = &self.levels;
        if ![levels.low, levels.moderate, levels.high].iter().all(|v| v.is_finite()) {
            return Err(ConfigError::InvalidValue("level thresholds must be finite".to_string()));
        }
        if !(levels.low <= levels.moderate && levels.moderate <= levels.high) {
            return Err(ConfigError::InvalidValue(format!(
                "level thresholds must ascend, got {} / {} / {}",
                levels.low, levels.moderate, levels.high
            )));
        }

        let suggestions = &self.suggestions;
        if ![suggestions.transport, suggestions.electricity, suggestions.diet].iter().all(|v| v.is_finite()) {
            return Err(ConfigError::InvalidValue("suggestion thresholds must be finite".to_string()));
        }

        if let Some(remote) = &self.remote {
            if remote.base_url.trim().is_empty() {
                return Err(ConfigError::InvalidValue("remote base_url is empty".to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::emission_factors::{ElectricityFactors, TransportFactors};
    use std::io::Write;

    #[test]
    fn partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "history": {{ "capacity": 5 }}, "remote": {{ "base_url": "http://localhost:8000" }} }}"#
        )
        .unwrap();

        let config = CalculatorConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.history.capacity, 5);
        assert_eq!(config.history.path, PathBuf::from(DEFAULT_HISTORY_FILE));
        assert_eq!(config.factors, EmissionFactors::default());
        assert_eq!(config.remote.unwrap().api_token, None);
    }

    #[test]
    fn factors_can_be_recalibrated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut factors = EmissionFactors::default();
        factors.electricity.grid_intensity = 0.1;
        factors.transport.flight_speed_kmh = 850.0;
        let json = serde_json::json!({ "factors": factors });
        write!(file, "{}", json).unwrap();

        let config = CalculatorConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.factors.electricity.grid_intensity, 0.1);
        assert_eq!(config.factors.transport.flight_speed_kmh, 850.0);
    }

    #[test]
    fn rejects_zero_capacity() {
        let mut config = CalculatorConfig::default();
        config.history.capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn rejects_descending_thresholds() {
        let mut config = CalculatorConfig::default();
        config.levels.low = 6000.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_factor() {
        let mut config = CalculatorConfig::default();
        config.factors.waste = -0.5;
        match config.validate() {
            Err(ConfigError::InvalidValue(msg)) => assert!(msg.contains("waste")),
            other => panic!("expected invalid value, got {:?}", other),
        }

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "factors": {{ "transport": {{ "flight": -1.0 }} }} }}"#).unwrap();
        assert!(matches!(
            CalculatorConfig::load_from_file(file.path()),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn rejects_non_finite_values() {
        let mut config = CalculatorConfig::default();
        config.factors.electricity.grid_intensity = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = CalculatorConfig::default();
        config.factors.transport.flight_speed_kmh = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = CalculatorConfig::default();
        config.levels.high = f64::INFINITY;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn single_factor_override_keeps_group_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"factors":{{"electricity":{{"grid_intensity":0.3}}}}}}"#).unwrap();

        let config = CalculatorConfig::load_from_file(file.path()).unwrap();
        let defaults = ElectricityFactors::default();
        assert_eq!(config.factors.electricity.grid_intensity, 0.3);
        assert_eq!(config.factors.electricity.renewable_none, defaults.renewable_none);
        assert_eq!(config.factors.electricity.renewable_some, defaults.renewable_some);
        assert_eq!(config.factors.electricity.renewable_most, defaults.renewable_most);
        assert_eq!(config.factors.electricity.renewable_all, defaults.renewable_all);
        assert_eq!(config.factors.transport, TransportFactors::default());
    }

    #[test]
    fn single_threshold_override_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"levels":{{"low":1500.0}}}}"#).unwrap();

        let config = CalculatorConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.levels.low, 1500.0);
        assert_eq!(config.levels.moderate, LevelThresholds::default().moderate);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = CalculatorConfig::load_from_file("/nonexistent/kaboni.json");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
