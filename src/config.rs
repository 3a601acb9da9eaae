//! Configuration management for the robocall detection pipeline

use anyhow::{bail, Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

use crate::classifier::{ModelConfig, ThresholdPolicy};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub detection: ThresholdPolicy,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Trained classifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    /// Whether to run the ML step at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Fraction of callers used for training, in (0, 1)
    #[serde(default = "default_train_fraction")]
    pub train_fraction: f64,

    /// Seed for the train/test shuffle and bootstrap resamples
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Trees in the forest
    #[serde(default = "default_num_trees")]
    pub num_trees: usize,

    /// Per-tree depth cap
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_enabled() -> bool {
    true
}

fn default_train_fraction() -> f64 {
    0.75
}

fn default_seed() -> u64 {
    42
}

fn default_num_trees() -> usize {
    100
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            train_fraction: default_train_fraction(),
            seed: default_seed(),
            num_trees: default_num_trees(),
            max_depth: None,
        }
    }
}

impl ModelSettings {
    /// Training parameters for the classifier.
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            train_fraction: self.train_fraction,
            seed: self.seed,
            num_trees: self.num_trees,
            max_depth: self.max_depth,
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Rows shown in the top-callers summary
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Destination for the flagged-callers CSV
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

fn default_top_n() -> usize {
    10
}

fn default_output_path() -> String {
    "detected_robocallers.csv".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            output_path: default_output_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from the default path, falling back to defaults
    /// when no file exists
    pub fn load_or_default() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load()
        } else {
            let config = AppConfig::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        let config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check the loaded values
    pub fn validate(&self) -> Result<()> {
        if self.detection.call_threshold == 0 {
            bail!("detection.call_threshold must be positive");
        }
        if self.detection.duration_threshold <= 0.0 {
            bail!("detection.duration_threshold must be positive");
        }
        if !(self.model.train_fraction > 0.0 && self.model.train_fraction < 1.0) {
            bail!("model.train_fraction must lie in (0, 1)");
        }
        if self.model.num_trees == 0 {
            bail!("model.num_trees must be positive");
        }
        if self.report.top_n == 0 {
            bail!("report.top_n must be positive");
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            detection: ThresholdPolicy::default(),
            model: ModelSettings::default(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
