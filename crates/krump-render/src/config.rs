//! Renderer configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with KRUMP_ prefix)
//! 3. .env files
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::assets::{AssetSlot, AssetSpec, DEFAULT_RETRIES, MAX_RETRIES};
use crate::renderer::{
    DEFAULT_RAW_DATA_LIMIT, DEFAULT_TOP_N, DEFAULT_WIDTH, MIN_WIDTH, RenderOptions,
};
use crate::theme::{Preset, Theme};

/// Complete renderer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Report layout settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Branding assets
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Where reports are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Section preset: "results", "card" or "data-dump"
    #[serde(default)]
    pub preset: Preset,

    /// Colour theme: "light", "dark" or "krump"
    #[serde(default)]
    pub theme: Theme,

    /// Document width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Moves shown in the ranked summary and tips
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Lines shown in the raw-data section
    #[serde(default = "default_raw_data_limit")]
    pub raw_data_limit: usize,
}

/// Branding asset sources and fetch policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Logo URL or path
    #[serde(default)]
    pub logo_url: Option<String>,

    /// Mascot URL or path
    #[serde(default)]
    pub mascot_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_asset_timeout")]
    pub timeout_seconds: u64,

    /// Retries after the first attempt (at most `MAX_RETRIES`)
    #[serde(default = "default_asset_retries")]
    pub retries: u32,
}

/// Output location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for rendered reports (current directory when unset)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "console" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_raw_data_limit() -> usize {
    DEFAULT_RAW_DATA_LIMIT
}

fn default_asset_timeout() -> u64 {
    10
}

fn default_asset_retries() -> u32 {
    DEFAULT_RETRIES
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            preset: Preset::default(),
            theme: Theme::default(),
            width: default_width(),
            top_n: default_top_n(),
            raw_data_limit: default_raw_data_limit(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        AssetsConfig {
            logo_url: None,
            mascot_url: None,
            timeout_seconds: default_asset_timeout(),
            retries: default_asset_retries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl RenderConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        let config: RenderConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load .env file if it exists
    /// 2. Load from file if provided
    /// 3. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => RenderConfig::default(),
        };

        let config = config.merge_env(|key| std::env::var(key).ok())?;

        config.validate()?;
        Ok(config)
    }

    /// Merge `KRUMP_*` variables into this configuration.
    ///
    /// `lookup` returns the value of a variable, or `None` when unset. Only
    /// variables that are set override the current values. A set variable
    /// that does not parse is an error.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Report
        if let Some(v) = lookup("KRUMP_PRESET") {
            self.report.preset = v.parse().map_err(ConfigError::ValidationError)?;
        }
        if let Some(v) = lookup("KRUMP_THEME") {
            self.report.theme = v.parse().map_err(ConfigError::ValidationError)?;
        }
        if let Some(v) = lookup("KRUMP_WIDTH") {
            self.report.width = parse_env("KRUMP_WIDTH", &v)?;
        }
        if let Some(v) = lookup("KRUMP_TOP_N") {
            self.report.top_n = parse_env("KRUMP_TOP_N", &v)?;
        }
        if let Some(v) = lookup("KRUMP_RAW_DATA_LIMIT") {
            self.report.raw_data_limit = parse_env("KRUMP_RAW_DATA_LIMIT", &v)?;
        }

        // Assets
        if let Some(v) = lookup("KRUMP_LOGO_URL") {
            self.assets.logo_url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Some(v) = lookup("KRUMP_MASCOT_URL") {
            self.assets.mascot_url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Some(v) = lookup("KRUMP_ASSET_TIMEOUT") {
            self.assets.timeout_seconds = parse_env("KRUMP_ASSET_TIMEOUT", &v)?;
        }
        if let Some(v) = lookup("KRUMP_ASSET_RETRIES") {
            self.assets.retries = parse_env("KRUMP_ASSET_RETRIES", &v)?;
        }

        // Output
        if let Some(v) = lookup("KRUMP_OUTPUT_DIR") {
            self.output.dir = Some(PathBuf::from(v));
        }

        // Logging
        if let Some(v) = lookup("KRUMP_LOG_LEVEL") {
            self.logging.level = v.to_lowercase();
        }
        if let Some(v) = lookup("KRUMP_LOG_FORMAT") {
            self.logging.format = v.to_lowercase();
        }

        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.width < MIN_WIDTH {
            return Err(ConfigError::ValidationError(format!(
                "width must be at least {MIN_WIDTH}, got {}",
                self.report.width
            )));
        }

        if self.report.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "top_n must be greater than 0".to_string(),
            ));
        }

        if self.report.raw_data_limit == 0 {
            return Err(ConfigError::ValidationError(
                "raw_data_limit must be greater than 0".to_string(),
            ));
        }

        if self.assets.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "assets.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.assets.retries > MAX_RETRIES {
            return Err(ConfigError::ValidationError(format!(
                "assets.retries must be at most {MAX_RETRIES}, got {}",
                self.assets.retries
            )));
        }

        // Validate log level
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        // Validate log format
        match self.logging.format.as_str() {
            "console" | "json" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: {other}"
                )));
            }
        }

        Ok(())
    }

    /// Renderer options for these settings.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            preset: self.report.preset,
            theme: self.report.theme,
            width: self.report.width,
            top_n: self.report.top_n,
            raw_data_limit: self.report.raw_data_limit,
            id: None,
        }
    }

    /// Assets to resolve, logo first.
    pub fn asset_specs(&self) -> Vec<AssetSpec> {
        [
            (AssetSlot::Logo, &self.assets.logo_url),
            (AssetSlot::Mascot, &self.assets.mascot_url),
        ]
        .into_iter()
        .filter_map(|(slot, source)| source.as_ref().map(|s| AssetSpec::new(slot, s.clone())))
        .collect()
    }

    /// Per-request asset timeout.
    pub fn asset_timeout(&self) -> Duration {
        Duration::from_secs(self.assets.timeout_seconds)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("Invalid value for {key}: '{value}'")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.report.width, 800);
        assert_eq!(config.report.top_n, 3);
        assert_eq!(config.report.raw_data_limit, 16);
        assert_eq!(config.assets.timeout_seconds, 10);
        assert_eq!(config.assets.retries, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_file_with_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("krump.yaml");
        std::fs::write(
            &path,
            "report:\n  preset: card\n  theme: krump\nassets:\n  logo_url: https://cdn.test/logo.png\n",
        )
        .unwrap();

        let config = RenderConfig::from_file(&path).unwrap();
        assert_eq!(config.report.preset, Preset::Card);
        assert_eq!(config.report.theme, Theme::Krump);
        assert_eq!(config.report.width, 800);
        assert_eq!(config.asset_specs().len(), 1);
        assert_eq!(config.asset_specs()[0].slot, AssetSlot::Logo);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RenderConfig::from_file("/no/such/krump.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "report: [unclosed").unwrap();
        assert!(matches!(
            RenderConfig::from_file(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let config = RenderConfig::default()
            .merge_env(env(&[
                ("KRUMP_THEME", "dark"),
                ("KRUMP_PRESET", "data-dump"),
                ("KRUMP_WIDTH", "1024"),
                ("KRUMP_MASCOT_URL", "mascot.png"),
                ("KRUMP_LOG_FORMAT", "JSON"),
            ]))
            .unwrap();

        assert_eq!(config.report.theme, Theme::Dark);
        assert_eq!(config.report.preset, Preset::DataDump);
        assert_eq!(config.report.width, 1024);
        assert_eq!(config.logging.format, "json");
        assert_eq!(
            config.asset_specs(),
            vec![AssetSpec::new(AssetSlot::Mascot, "mascot.png")]
        );
    }

    #[test]
    fn test_unset_env_leaves_values() {
        let mut config = RenderConfig::default();
        config.report.top_n = 5;
        let config = config.merge_env(env(&[])).unwrap();
        assert_eq!(config.report.top_n, 5);
    }

    #[test]
    fn test_bad_env_value_is_rejected() {
        let err = RenderConfig::default()
            .merge_env(env(&[("KRUMP_WIDTH", "wide")]))
            .unwrap_err();
        assert!(err.to_string().contains("KRUMP_WIDTH"));
    }

    #[test]
    fn test_validate_limits() {
        let mut config = RenderConfig::default();
        config.report.width = 100;
        assert!(config.validate().is_err());

        let mut config = RenderConfig::default();
        config.report.top_n = 0;
        assert!(config.validate().is_err());

        let mut config = RenderConfig::default();
        config.assets.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = RenderConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_caps_asset_retries() {
        let mut config = RenderConfig::default();
        config.assets.retries = MAX_RETRIES;
        assert!(config.validate().is_ok());

        config.assets.retries = 70;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("assets.retries"));
    }

    #[test]
    fn test_env_retries_above_cap_fail_validation() {
        let config = RenderConfig::default()
            .merge_env(env(&[("KRUMP_ASSET_RETRIES", "64")]))
            .unwrap();
        assert_eq!(config.assets.retries, 64);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_render_options_bridge() {
        let mut config = RenderConfig::default();
        config.report.preset = Preset::Card;
        config.report.top_n = 2;
        let options = config.render_options();
        assert_eq!(options.preset, Preset::Card);
        assert_eq!(options.top_n, 2);
        assert!(options.id.is_none());
    }
}
