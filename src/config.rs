//! Configuration management for the risk analyst

use crate::types::prediction::RiskThresholds;
use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub model: ForestConfig,
    pub risk: RiskThresholds,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Synthetic corpus configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Seed for the synthetic data generator
    pub seed: u64,
    /// Number of labeled rows to generate
    pub samples: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            samples: 300,
        }
    }
}

/// Random forest hyperparameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Seed for bootstrap sampling
    pub seed: u64,
    /// Bootstrap sample size as a fraction of the corpus
    pub bootstrap_proportion: f64,
    /// Minimum samples a node needs before it may split
    pub min_samples_split: usize,
    /// Maximum tree depth (0 = unbounded)
    pub max_depth: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            bootstrap_proportion: 1.0,
            min_samples_split: 2,
            max_depth: 0,
        }
    }
}

/// Interactive session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Rows shown from an uploaded file
    pub preview_rows: usize,
    /// Corpus rows shown on the dashboard
    pub dashboard_rows: usize,
    /// Bins in the age histogram
    pub histogram_bins: usize,
    /// File name offered for the latest prediction
    pub latest_export_name: String,
    /// File name offered for the full history
    pub history_export_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preview_rows: 50,
            dashboard_rows: 20,
            histogram_bins: 15,
            latest_export_name: "latest_prediction.csv".to_string(),
            history_export_name: "prediction_history.csv".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path, falling back to defaults
    /// when no file exists there
    pub fn load() -> Result<Self> {
        Self::load_or_default(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from `path` if it exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_path(path)
        } else {
            warn!(path = %path.display(), "Configuration file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path. The file is read as TOML
    /// whatever its extension.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.risk.medium)
            || !(0.0..=1.0).contains(&self.risk.high)
            || self.risk.medium > self.risk.high
        {
            anyhow::bail!(
                "risk thresholds must satisfy 0 <= medium <= high <= 1 (got medium={}, high={})",
                self.risk.medium,
                self.risk.high
            );
        }
        if self.model.n_trees == 0 {
            anyhow::bail!("model.n_trees must be at least 1");
        }
        if !(self.model.bootstrap_proportion > 0.0 && self.model.bootstrap_proportion <= 1.0) {
            anyhow::bail!(
                "model.bootstrap_proportion must be in (0, 1] (got {})",
                self.model.bootstrap_proportion
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data.seed, 42);
        assert_eq!(config.data.samples, 300);
        assert_eq!(config.model.n_trees, 100);
        assert_eq!(config.risk.medium, 0.4);
        assert_eq!(config.risk.high, 0.7);
        assert_eq!(config.session.preview_rows, 50);
        assert_eq!(config.session.latest_export_name, "latest_prediction.csv");
        assert_eq!(config.session.history_export_name, "prediction_history.csv");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[model]\nn_trees = 25\n\n[logging]\nformat = \"json\"").unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.model.n_trees, 25);
        assert_eq!(config.model.min_samples_split, 2);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.data.samples, 300);
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[risk]\nmedium = 0.8\nhigh = 0.3").unwrap();

        assert!(AppConfig::load_from_path(file.path()).is_err());
    }

    #[test]
    fn test_toml_read_regardless_of_extension() {
        let mut file = tempfile::Builder::new().suffix(".conf").tempfile().unwrap();
        writeln!(file, "[risk]\nmedium = 0.3\nhigh = 0.6").unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.risk.medium, 0.3);
        assert_eq!(config.risk.high, 0.6);
    }

    #[test]
    fn test_bootstrap_proportion_out_of_range_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[model]\nbootstrap_proportion = 0.0").unwrap();

        assert!(AppConfig::load_from_path(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.data.seed, 42);
    }
}
