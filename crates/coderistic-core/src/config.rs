//! Configuration management for Coderistic.
//!
//! Loads configuration from ${`CODERISTIC_HOME`}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::language::{Language, Theme};

/// Returns the default config template with comments.
///
/// This is embedded from `default_config.toml` at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Coderistic configuration and log files.
    //!
    //! `CODERISTIC_HOME` resolution order:
    //! 1. `CODERISTIC_HOME` environment variable (if set)
    //! 2. ~/.config/coderistic (default)

    use std::path::PathBuf;

    /// Returns the Coderistic home directory.
    pub fn coderistic_home() -> PathBuf {
        if let Ok(home) = std::env::var("CODERISTIC_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".coderistic"),
            |h| h.join(".config").join("coderistic"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        coderistic_home().join("config.toml")
    }

    /// Returns the default log file path.
    pub fn log_path() -> PathBuf {
        coderistic_home().join("coderistic.log")
    }
}

/// Wisdom (chat completion) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WisdomConfig {
    /// Chat-completion model identifier
    pub model: String,
    /// OpenAI-compatible base URL
    pub base_url: Option<String>,
    /// API key (takes precedence over environment variables)
    pub api_key: Option<String>,
}

impl WisdomConfig {
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    /// Returns the configured base URL, treating blank values as unset.
    pub fn effective_base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl Default for WisdomConfig {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: None,
            api_key: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Log file path
    pub file: Option<String>,
}

impl LoggingConfig {
    pub const DEFAULT_LEVEL: &str = "info";

    /// Returns the log file path, defaulting to `$CODERISTIC_HOME/coderistic.log`.
    pub fn effective_file(&self) -> PathBuf {
        match self.file.as_deref().map(str::trim) {
            Some(file) if !file.is_empty() => PathBuf::from(file),
            _ => paths::log_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::DEFAULT_LEVEL.to_string(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display language
    pub language: Language,

    /// Color theme
    pub theme: Theme,

    /// Base URL for relative content URLs
    pub content_base_url: Option<String>,

    /// Optional path to a custom catalog
    pub catalog_path: Option<String>,

    /// Wisdom endpoint configuration
    pub wisdom: WisdomConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the file exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Returns the catalog path, treating blank values as unset.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }

    /// Returns the URL that relative content URLs resolve against.
    ///
    /// `content_base_url` wins; otherwise a custom catalog resolves next to
    /// its own file. `None` means relative URLs are served from the bundled
    /// essays.
    ///
    /// # Errors
    /// Returns an error if `content_base_url` is not a valid URL.
    pub fn content_base(&self) -> Result<Option<Url>> {
        if let Some(raw) = self
            .content_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        {
            // Treat the base as a directory so joins keep its last segment.
            let with_slash = if raw.ends_with('/') {
                raw.to_string()
            } else {
                format!("{raw}/")
            };
            let url = Url::parse(&with_slash)
                .with_context(|| format!("Invalid content_base_url: {raw}"))?;
            return Ok(Some(url));
        }

        if let Some(catalog) = self.catalog_path() {
            let absolute = std::path::absolute(&catalog)
                .with_context(|| format!("Failed to resolve {}", catalog.display()))?;
            if let Some(dir) = absolute.parent()
                && let Ok(url) = Url::from_directory_path(dir)
            {
                return Ok(Some(url));
            }
        }

        Ok(None)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
