use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for a stylecam session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Capture settings
    pub capture: CaptureConfig,

    /// Replay settings
    pub playback: PlaybackConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string(),
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.capture.validate()?;
        self.playback.validate()?;
        Ok(())
    }
}

/// Capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Square frame edge length in pixels
    pub frame_size: u32,

    /// Shutter hold time that turns a photo into a recording (ms)
    pub record_hold_threshold_ms: u64,

    /// Interval between capture frames (ms)
    pub frame_interval_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frame_size: 720,
            record_hold_threshold_ms: 200,
            frame_interval_ms: 50,
        }
    }
}

impl CaptureConfig {
    pub fn record_hold_threshold(&self) -> Duration {
        Duration::from_millis(self.record_hold_threshold_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.frame_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "capture.frame_size".to_string(),
                value: self.frame_size.to_string(),
            }
            .into());
        }

        if self.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "capture.frame_interval_ms".to_string(),
                value: self.frame_interval_ms.to_string(),
            }
            .into());
        }

        if self.record_hold_threshold_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "capture.record_hold_threshold_ms".to_string(),
                value: self.record_hold_threshold_ms.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Replay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Interval between replayed frames (ms)
    pub frame_interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { frame_interval_ms: 50 }
    }
}

impl PlaybackConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "playback.frame_interval_ms".to_string(),
                value: self.frame_interval_ms.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
