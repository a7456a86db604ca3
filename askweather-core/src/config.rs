use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const OPENWEATHER_KEY_VAR: &str = "OPENWEATHERMAP_API_KEY";
pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";
pub const GEMINI_MODEL_VAR: &str = "GEMINI_MODEL";

pub const DEFAULT_OPENWEATHER_URL: &str = "http://api.openweathermap.org";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Settings for the OpenWeatherMap endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenWeatherConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self { api_key: None, base_url: DEFAULT_OPENWEATHER_URL.to_string() }
    }
}

/// Settings for the Gemini endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [openweather]
/// api_key = "..."
///
/// [gemini]
/// api_key = "..."
/// model = "gemini-2.5-flash"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub openweather: OpenWeatherConfig,
    pub gemini: GeminiConfig,
}

/// Both API keys, known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub openweather_api_key: String,
    pub gemini_api_key: String,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "askweather", "askweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`. Empty values are ignored.
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(OPENWEATHER_KEY_VAR) {
            self.openweather.api_key = Some(key);
        }
        if let Some(key) = lookup(GEMINI_KEY_VAR) {
            self.gemini.api_key = Some(key);
        }
        if let Some(model) = lookup(GEMINI_MODEL_VAR) {
            self.gemini.model = model;
        }
        self
    }

    /// Replace the stored API keys; `None` keeps the current value.
    pub fn upsert_api_keys(&mut self, openweather: Option<String>, gemini: Option<String>) {
        if let Some(key) = openweather {
            self.openweather.api_key = Some(key);
        }
        if let Some(key) = gemini {
            self.gemini.api_key = Some(key);
        }
    }

    /// Both keys, or the fixed startup error if either is missing.
    pub fn credentials(&self) -> Result<Credentials> {
        let present = |key: &Option<String>| key.clone().filter(|k| !k.trim().is_empty());

        match (present(&self.openweather.api_key), present(&self.gemini.api_key)) {
            (Some(openweather_api_key), Some(gemini_api_key)) => {
                Ok(Credentials { openweather_api_key, gemini_api_key })
            }
            _ => Err(anyhow!(
                "Please set the {OPENWEATHER_KEY_VAR} and {GEMINI_KEY_VAR} environment variables."
            )),
        }
    }
}
