use crate::error::{GeodrillError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default REST base URL of the stats backend
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api/v1";

/// Default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Geodrill
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub api_base: ConfigValue<String>,
    pub timeout_ms: ConfigValue<u64>,
    /// Name mapping asset; `None` selects the built-in table
    pub name_map: ConfigValue<Option<PathBuf>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            api_base: ConfigValue::new(DEFAULT_API_BASE.to_string(), ConfigSource::Default),
            timeout_ms: ConfigValue::new(DEFAULT_TIMEOUT_MS, ConfigSource::Default),
            name_map: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeodrillError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeodrillError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(api_base) = file_config.api_base {
            self.api_base.update(normalize_api_base(&api_base)?, ConfigSource::File);
        }

        if let Some(timeout_ms) = file_config.timeout_ms {
            self.timeout_ms.update(validate_timeout(timeout_ms)?, ConfigSource::File);
        }

        if let Some(name_map) = file_config.name_map {
            // Relative asset paths are resolved against the config file's directory
            let resolved = match path.as_ref().parent() {
                Some(dir) if name_map.is_relative() => dir.join(name_map),
                _ => name_map,
            };
            self.name_map.update(Some(resolved), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEODRILL_API_BASE
        if let Ok(api_base) = env::var("GEODRILL_API_BASE") {
            match normalize_api_base(&api_base) {
                Ok(base) => self.api_base.update(base, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEODRILL_API_BASE value '{}': expected an http(s) URL",
                    api_base
                ),
            }
        }

        // GEODRILL_TIMEOUT_MS
        if let Ok(timeout_str) = env::var("GEODRILL_TIMEOUT_MS") {
            match parse_timeout_ms(&timeout_str) {
                Ok(ms) => self.timeout_ms.update(ms, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEODRILL_TIMEOUT_MS value '{}': expected a positive integer",
                    timeout_str
                ),
            }
        }

        // GEODRILL_NAME_MAP
        if let Ok(name_map) = env::var("GEODRILL_NAME_MAP") {
            if !name_map.trim().is_empty() {
                self.name_map.update(Some(PathBuf::from(name_map)), ConfigSource::Environment);
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) -> Result<()> {
        if let Some(api_base) = overrides.api_base {
            self.api_base.update(normalize_api_base(&api_base)?, ConfigSource::Cli);
        }

        if let Some(timeout_ms) = overrides.timeout_ms {
            self.timeout_ms.update(validate_timeout(timeout_ms)?, ConfigSource::Cli);
        }

        if let Some(name_map) = overrides.name_map {
            self.name_map.update(Some(name_map), ConfigSource::Cli);
        }

        Ok(())
    }

    /// Per-request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.value)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert("api_base".to_string(), (self.api_base.value.clone(), self.api_base.source));

        map.insert(
            "timeout_ms".to_string(),
            (self.timeout_ms.value.to_string(), self.timeout_ms.source),
        );

        map.insert(
            "name_map".to_string(),
            (
                self.name_map
                    .value
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(built-in)".to_string()),
                self.name_map.source,
            ),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    api_base: Option<String>,
    timeout_ms: Option<u64>,
    name_map: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub api_base: Option<String>,
    pub timeout_ms: Option<u64>,
    pub name_map: Option<PathBuf>,
}

/// Check that a base URL is http(s) and strip trailing slashes
pub fn normalize_api_base(s: &str) -> Result<String> {
    let trimmed = s.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(GeodrillError::ConfigInvalid {
            key: "api_base".to_string(),
            reason: format!("Invalid API base URL: {}. Use an http:// or https:// URL", s),
        })
    }
}

/// Parse a timeout in milliseconds from string
pub fn parse_timeout_ms(s: &str) -> Result<u64> {
    let ms = s.trim().parse::<u64>().map_err(|e| GeodrillError::ConfigInvalid {
        key: "timeout_ms".to_string(),
        reason: format!("Invalid timeout '{}': {}", s, e),
    })?;
    validate_timeout(ms)
}

fn validate_timeout(ms: u64) -> Result<u64> {
    if ms == 0 {
        return Err(GeodrillError::ConfigInvalid {
            key: "timeout_ms".to_string(),
            reason: "Timeout must be greater than zero".to_string(),
        });
    }
    Ok(ms)
}
