//! Configuration module for contract-ask
//!
//! Settings are layered, later sources winning:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the user's config directory
//!    (`~/.config/contract-ask/config.toml` on Linux)
//! 3. `CONTRACT_ASK_*` environment variables (e.g. `CONTRACT_ASK_API_BASE_URL`)
//!
//! Command-line flags are applied on top by the binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::models::Language;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "CONTRACT_ASK";

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AskConfig {
    /// Base URL of the search backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Upper bound on one search call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default answer language
    #[serde(default)]
    pub language: Language,

    /// Directory exports are written to (current directory when unset)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for AskConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            language: Language::default(),
            export_dir: None,
            quiet: false,
        }
    }
}

impl AskConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("contract-ask").join("config.toml"))
    }

    /// Load configuration from the default location plus the environment
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an environment value cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path` plus the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an environment value cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        tracing::debug!(path = %path.display(), api = %config.api_base_url, "loaded configuration");
        Ok(config)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        fs::write(path, self.to_toml()?)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Render the configuration as it would be written to disk
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be serialized.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Search timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Directory exports are written to
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AskConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.language, Language::Ko);
        assert_eq!(config.export_dir(), PathBuf::from("."));
        assert!(!config.quiet);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AskConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_base_url = \"http://search.internal:9000\"\nlanguage = \"en\"\n").unwrap();

        let config = AskConfig::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, "http://search.internal:9000");
        assert_eq!(config.language, Language::En);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AskConfig {
            timeout_secs: 15,
            export_dir: Some(PathBuf::from("/tmp/exports")),
            quiet: true,
            ..AskConfig::default()
        };

        config.save_to(&path).unwrap();
        let loaded = AskConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_to_toml_lists_settings() {
        let config = AskConfig {
            language: Language::En,
            ..AskConfig::default()
        };
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("api_base_url = \"http://localhost:8000\""));
        assert!(rendered.contains("language = \"en\""));
        assert!(rendered.contains("timeout_secs = 60"));
    }

    #[test]
    fn test_invalid_language_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = \"fr\"\n").unwrap();
        assert!(AskConfig::load_from(&path).is_err());
    }
}
