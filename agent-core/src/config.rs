use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Environment variable that supplies (or overrides) the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Agent configuration, stored on disk as TOML with the API key optionally
/// overridden from the environment.
///
/// Every field has a documented default, so a missing or partial config file
/// is always usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Base URL of the local generation endpoint.
    pub ollama_host: String,

    /// Model identifier passed to the generation endpoint.
    pub ollama_model: String,

    /// Sampling temperature; kept low so classification output stays
    /// parseable.
    pub temperature: f64,

    /// Context window requested from the model.
    pub num_ctx: u32,

    /// Minimum reported certainty required to trust an affirmative
    /// classification; applied only when the model supplies a confidence.
    pub confidence_threshold: f64,

    /// Per-request timeout for every network call, in seconds.
    pub request_timeout_secs: u64,

    /// OpenWeather API key; `OPENWEATHER_API_KEY` takes precedence.
    pub openweather_api_key: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            ollama_host: "http://localhost:11434".to_string(),
            ollama_model: "llama3.2:latest".to_string(),
            temperature: 0.3,
            num_ctx: 8192,
            confidence_threshold: 0.8,
            request_timeout_secs: 30,
            openweather_api_key: None,
        }
    }
}

impl AgentConfig {
    /// Load config from disk (defaults if the file doesn't exist yet), then
    /// apply the environment override for the API key.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;

        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        cfg.apply_env_key(std::env::var(API_KEY_ENV).ok());
        Ok(cfg)
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

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-agent", "weather-agent")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// A non-blank environment value replaces the stored key.
    pub fn apply_env_key(&mut self, env_key: Option<String>) {
        if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
            self.openweather_api_key = Some(key);
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
