//! Configuration management for aliash.
//!
//! Handles loading configuration from TOML files. Aliases themselves are
//! session state and are never written here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Alias engine settings
    pub alias: AliasConfig,
}

/// General shell settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Prompt printed before each line in interactive mode
    pub prompt: String,

    /// Shell used to run external commands (defaults to `sh` / `cmd`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    /// Maximum nesting of alias dispatch before giving up
    pub max_alias_depth: usize,
}

/// Alias engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    /// Program name of this shell; an alias may not simply invoke it
    pub host_program: String,

    /// Suffixes also tried when resolving an alias value on the search path
    pub executable_suffixes: Vec<String>,

    /// Extra regular expressions an alias value must not match
    pub blocked_patterns: Vec<String>,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for config in:
    /// 1. `.aliash.toml` in current directory
    /// 2. `~/.config/aliash/config.toml`
    /// 3. Falls back to defaults
    pub fn load() -> anyhow::Result<Self> {
        // Try local config first
        let local_config = PathBuf::from(".aliash.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        // Try global config
        if let Some(config_dir) = Self::config_dir() {
            let global_config = config_dir.join("config.toml");
            if global_config.exists() {
                return Self::load_from_file(&global_config);
            }
        }

        // Return defaults
        Ok(Self::default())
    }

    /// Load from an explicit path when given, otherwise from the default location.
    pub fn load_with(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file {}: {e}", path.display())
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::APP_NAME))
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { prompt: format!("{} > ", crate::APP_NAME), shell: None, max_alias_depth: 16 }
    }
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            host_program: crate::APP_NAME.to_string(),
            executable_suffixes: vec![".exe".to_string()],
            blocked_patterns: Vec::new(),
        }
    }
}
