use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::overlay::CaptionStyle;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Transcription provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Playback config
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Default caption style
    #[serde(default)]
    pub style: CaptionStyle,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Transcription provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Model name
    #[serde(default = "default_gemini_model")]
    pub model: String,

    // @field: Service URL
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
            endpoint: default_gemini_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Playback clock configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaybackConfig {
    /// Frames per second of the playback clock
    #[serde(default = "default_fps")]
    pub fps: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { fps: default_fps() }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Corresponding log crate level filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_fps() -> f64 {
    30.0
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_key.is_empty() {
            return Err(anyhow!(
                "Gemini API key is required (set it in the config file, via --api-key, or GEMINI_API_KEY)"
            ));
        }

        if self.provider.timeout_secs == 0 {
            return Err(anyhow!("Provider timeout must be greater than zero"));
        }

        if !self.playback.fps.is_finite() || self.playback.fps <= 0.0 {
            return Err(anyhow!("Playback fps must be a positive number"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ProviderConfig::default(),
            playback: PlaybackConfig::default(),
            style: CaptionStyle::default(),
            log_level: LogLevel::default(),
        }
    }
}
