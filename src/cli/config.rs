//! CLI Configuration.
//!
//! Configuration management for the CLI tool. Environment overrides
//! (`NOVACARE_*`) are read by the binary's argument parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::output::OutputFormat;
use crate::storage::profiles::ValidationMode;

// ═══════════════════════════════════════════════════════════════════════════════
// CLI CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Directory holding the profile store
    pub store_dir: PathBuf,
    /// Optional scoring parameters file (JSON)
    pub params_path: Option<PathBuf>,
    /// Output format
    pub format: OutputFormat,
    /// How stored profiles failing validation are handled
    pub validation: ValidationMode,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_dir: default_data_dir(),
            params_path: None,
            format: OutputFormat::Text,
            validation: ValidationMode::Warn,
        }
    }
}

impl CliConfig {
    /// Create configuration for a store directory
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            store_dir: store_dir.into(),
            ..Default::default()
        }
    }

    /// Load from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(e.to_string()))?;

        serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        std::fs::write(path, content)
            .map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        default_data_dir().join("config.json")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("Store directory cannot be empty".into()));
        }

        if let Some(path) = &self.params_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation("Params path cannot be empty".into()));
            }
        }

        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIG ERROR
// ═══════════════════════════════════════════════════════════════════════════════

/// Configuration error
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error
    Io(String),
    /// Parse error
    Parse(String),
    /// Serialization error
    Serialize(String),
    /// Validation error
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            ConfigError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

// ═══════════════════════════════════════════════════════════════════════════════
// HELPER FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Get default data directory
pub fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".novacare");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join("Library/Application Support/NovaCare");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("NovaCare");
        }
    }

    PathBuf::from(".novacare")
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CliConfig::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.validation, ValidationMode::Warn);
        assert!(config.params_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CliConfig::new("/tmp/novacare");
        assert!(config.validate().is_ok());

        config.store_dir = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = CliConfig::new("/tmp/novacare");
        config.params_path = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = CliConfig::new(dir.path().join("store"));
        config.format = OutputFormat::JsonPretty;
        config.save(&path).unwrap();

        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"format":"json"}"#).unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.validation, ValidationMode::Warn);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("bad".into());
        assert!(err.to_string().contains("Validation error"));
    }
}
