use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use contextdb_core::{ClientConfig, DEFAULT_BASE_URL};

use crate::commands::OutputFormat;

/// Source of a configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
    Flag,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
            ConfigSource::Flag => write!(f, "command line"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Server base URL, including the API prefix
    pub base_url: ConfigValue<String>,
    /// Bearer token; never serialized
    #[serde(skip)]
    pub api_key: Option<ConfigValue<String>>,
    /// Default output format
    pub output: ConfigValue<OutputFormat>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    base_url: Option<String>,
    api_key: Option<String>,
    output: Option<OutputFormat>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut base_url = ConfigValue::new(DEFAULT_BASE_URL.to_string(), ConfigSource::Default);
        let mut api_key = None;
        let mut output = ConfigValue::new(OutputFormat::default(), ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.base_url {
                base_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(key) = file_config.api_key {
                api_key = Some(ConfigValue::new(key, ConfigSource::File));
            }
            if let Some(format) = file_config.output {
                output = ConfigValue::new(format, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("CONTEXTDB_URL") {
            base_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(key) = std::env::var("CONTEXTDB_API_KEY") {
            api_key = Some(ConfigValue::new(key, ConfigSource::Environment));
        }

        Ok(Self {
            base_url,
            api_key,
            output,
            config_file,
        })
    }

    /// Applies `--url` / `--api-key`, which beat every other source.
    pub fn with_overrides(mut self, url: Option<String>, api_key: Option<String>) -> Self {
        if let Some(url) = url {
            self.base_url = ConfigValue::new(url, ConfigSource::Flag);
        }
        if let Some(key) = api_key {
            self.api_key = Some(ConfigValue::new(key, ConfigSource::Flag));
        }
        self
    }

    /// Options for building a `ContextDbClient`.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.value.clone(),
            api_key: self.api_key.as_ref().map(|k| k.value.clone()),
        }
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/contextdb/
    /// - macOS: ~/Library/Application Support/contextdb/
    /// - Windows: %APPDATA%/contextdb/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("contextdb")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.base_url.value, "http://localhost:8080/api/v1");
        assert_eq!(config.output.value, OutputFormat::Text);
        assert_eq!(config.output.source, ConfigSource::Default);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "base_url: https://contextdb.example.com/api/v1").unwrap();
        writeln!(file, "api_key: file-key").unwrap();
        writeln!(file, "output: json").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(
            config.base_url.value,
            "https://contextdb.example.com/api/v1"
        );
        assert_eq!(config.base_url.source, ConfigSource::File);
        assert_eq!(config.output.value, OutputFormat::Json);
        assert_eq!(config.config_file, Some(config_path));

        let client_config = config.client_config();
        assert_eq!(client_config.api_key.as_deref(), Some("file-key"));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "base_url: http://fromfile:8080/api/v1").unwrap();

        std::env::set_var("CONTEXTDB_URL", "http://fromenv:8080/api/v1");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.base_url.value, "http://fromenv:8080/api/v1");
        assert_eq!(config.base_url.source, ConfigSource::Environment);

        std::env::remove_var("CONTEXTDB_URL");
    }

    #[test]
    fn test_flags_override_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "base_url: http://fromfile:8080/api/v1").unwrap();

        let config = Config::load(Some(config_path))
            .unwrap()
            .with_overrides(Some("http://fromflag/api/v1".to_string()), Some("k".to_string()));
        assert_eq!(config.base_url.value, "http://fromflag/api/v1");
        assert_eq!(config.base_url.source, ConfigSource::Flag);
        assert_eq!(config.api_key.unwrap().source, ConfigSource::Flag);
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_partial_file_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "output: json").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.base_url.source, ConfigSource::Default);
        assert_eq!(config.output.source, ConfigSource::File);
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = Config::load(Some(PathBuf::from("/nonexistent/contextdb.yaml")))
            .unwrap()
            .with_overrides(None, Some("secret".to_string()));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
