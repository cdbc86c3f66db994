//! # Decoupler Configuration
//!
//! Settings for the ambient pieces around the registry: logging, the frame
//! driver and the headless engine's asset lookup. The registry itself has
//! no tunables.
//!
//! All sections default field-by-field, so a file only needs the values it
//! changes:
//!
//! ```toml
//! [frames]
//! target_fps = 30
//!
//! [assets]
//! preload = ["Enemies/Goblin"]
//! ```

use serde::{Serialize, Deserialize};
use std::path::PathBuf;

pub use crate::config::{Config, ConfigError};

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter directives
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// # Frame Driver Configuration
///
/// Controls how [`FrameDriver`](crate::driver::FrameDriver) measures and
/// paces frames.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Sleep between frames to hold this rate (unlimited if unset)
    pub target_fps: Option<u32>,
    /// Report this delta every frame instead of measured wall time
    pub fixed_delta: Option<f32>,
    /// Stop after this many frames (run until told otherwise if unset)
    pub max_frames: Option<u64>,
}

impl FrameConfig {
    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }

    /// Use a fixed simulation step
    pub fn with_fixed_delta(mut self, delta: f32) -> Self {
        self.fixed_delta = Some(delta);
        self
    }

    /// Limit the number of frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_fps == Some(0) {
            return Err(ConfigError::Invalid("target_fps must be at least 1".to_string()));
        }
        if let Some(delta) = self.fixed_delta {
            if !(delta.is_finite() && delta > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "fixed_delta must be a positive number of seconds, got {delta}"
                )));
            }
        }
        Ok(())
    }
}

/// # Asset Configuration
///
/// Where the headless engine finds template files, and which templates the
/// host loads before first use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Base directory for template files
    pub assets_dir: PathBuf,
    /// Extension appended to asset paths
    pub extension: String,
    /// Asset paths to load into the template store at startup
    pub preload: Vec<String>,
}

impl AssetConfig {
    /// Set assets directory
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Add an asset path to preload
    pub fn with_preload(mut self, path: impl Into<String>) -> Self {
        self.preload.push(path.into());
        self
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("resources/templates"),
            extension: "ron".to_string(),
            preload: Vec::new(),
        }
    }
}

/// # Complete Configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecouplerConfig {
    /// Logging setup
    pub logging: LoggingConfig,
    /// Frame driver behaviour
    pub frames: FrameConfig,
    /// Headless asset lookup
    pub assets: AssetConfig,
}

impl DecouplerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.frames.validate()
    }
}

impl Config for DecouplerConfig {}
