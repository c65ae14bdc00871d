//! Game configuration loaded from TOML.

use crate::animator::{AnimationTiming, Easing};
use crate::capture::CaptureTarget;
use crate::compositor::CompositorSettings;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Configuration for a bingo session.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct BingoConfig {
    /// Width of one tile in the composed image, in pixels.
    #[serde(default = "default_tile_width")]
    tile_width: u32,

    /// Height of a row band that holds no images.
    #[serde(default = "default_placeholder_height")]
    placeholder_height: u32,

    /// Largest integer scale for placeholder labels.
    #[serde(default = "default_label_scale")]
    label_scale: u32,

    /// Delay between consecutive tile flips, in milliseconds.
    #[serde(default = "default_stagger_ms")]
    stagger_ms: u64,

    /// Overlay slide-in duration, in milliseconds.
    #[serde(default = "default_reveal_ms")]
    reveal_ms: u64,

    /// Easing curve for the overlay slide.
    #[serde(default)]
    easing: Easing,

    /// Per-image load timeout in milliseconds (`0` waits forever).
    #[serde(default = "default_load_timeout_ms")]
    load_timeout_ms: u64,

    /// Captured photo bounding width.
    #[serde(default = "default_capture_size")]
    capture_width: u32,

    /// Captured photo bounding height.
    #[serde(default = "default_capture_size")]
    capture_height: u32,

    /// JPEG quality for captured photos (1-100).
    #[serde(default = "default_capture_quality")]
    capture_quality: u8,

    /// Hashtag used in the share caption, without `#`.
    #[serde(default = "default_hashtag")]
    hashtag: String,

    /// SQLite database holding tile entries.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Directory receiving shared images.
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,
}

fn default_tile_width() -> u32 {
    200
}

fn default_placeholder_height() -> u32 {
    200
}

fn default_label_scale() -> u32 {
    3
}

fn default_stagger_ms() -> u64 {
    350
}

fn default_reveal_ms() -> u64 {
    2000
}

fn default_load_timeout_ms() -> u64 {
    30_000
}

fn default_capture_size() -> u32 {
    200
}

fn default_capture_quality() -> u8 {
    80
}

fn default_hashtag() -> String {
    "bingo".to_string()
}

fn default_db_path() -> String {
    "selfie_bingo.db".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("shared")
}

impl Default for BingoConfig {
    fn default() -> Self {
        Self {
            tile_width: default_tile_width(),
            placeholder_height: default_placeholder_height(),
            label_scale: default_label_scale(),
            stagger_ms: default_stagger_ms(),
            reveal_ms: default_reveal_ms(),
            easing: Easing::default(),
            load_timeout_ms: default_load_timeout_ms(),
            capture_width: default_capture_size(),
            capture_height: default_capture_size(),
            capture_quality: default_capture_quality(),
            hashtag: default_hashtag(),
            db_path: default_db_path(),
            output_dir: default_output_dir(),
        }
    }
}

impl BingoConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(tile_width = config.tile_width, db_path = %config.db_path, "Config loaded");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_width == 0 || self.placeholder_height == 0 {
            return Err(ConfigError::new(
                "tile_width and placeholder_height must be positive".to_string(),
            ));
        }
        if !(1..=100).contains(&self.capture_quality) {
            return Err(ConfigError::new(format!(
                "capture_quality must be 1-100, got {}",
                self.capture_quality
            )));
        }
        Ok(())
    }

    /// Animation timing derived from this config.
    pub fn animation_timing(&self) -> AnimationTiming {
        AnimationTiming::new(
            Duration::from_millis(self.stagger_ms),
            Duration::from_millis(self.reveal_ms),
            self.easing,
        )
    }

    /// Compositor settings derived from this config.
    pub fn compositor_settings(&self) -> CompositorSettings {
        let load_timeout =
            (self.load_timeout_ms > 0).then(|| Duration::from_millis(self.load_timeout_ms));
        CompositorSettings::new(
            self.tile_width,
            self.placeholder_height,
            self.label_scale.max(1),
            load_timeout,
        )
    }

    /// Capture target derived from this config.
    pub fn capture_target(&self) -> CaptureTarget {
        CaptureTarget::new(self.capture_width, self.capture_height, self.capture_quality)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = BingoConfig::from_toml("").expect("parse");
        assert_eq!(config, BingoConfig::default());
        assert_eq!(*config.stagger_ms(), 350);
        assert_eq!(*config.reveal_ms(), 2000);
    }

    #[test]
    fn test_overrides() {
        let config = BingoConfig::from_toml(
            "tile_width = 120\nhashtag = \"chi2016\"\neasing = \"linear\"\nload_timeout_ms = 0\n",
        )
        .expect("parse");
        assert_eq!(*config.tile_width(), 120);
        assert_eq!(config.hashtag(), "chi2016");
        assert_eq!(*config.easing(), Easing::Linear);
        assert_eq!(config.compositor_settings().load_timeout(), &None);
    }

    #[test]
    fn test_rejects_zero_tile_width() {
        assert!(BingoConfig::from_toml("tile_width = 0").is_err());
    }

    #[test]
    fn test_setters_chain() {
        let config = BingoConfig::default()
            .with_stagger_ms(10)
            .with_hashtag("party".to_string());
        assert_eq!(config.animation_timing().stagger(), &Duration::from_millis(10));
        assert_eq!(config.hashtag(), "party");
    }
}
