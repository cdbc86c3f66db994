//! # Core Module
//!
//! Shared configuration types used by the registry's collaborators.
//!
//! ## Organization
//!
//! - **Config**: Logging, frame driver and asset settings

pub mod config;

pub use config::{
    DecouplerConfig,
    LoggingConfig,
    FrameConfig,
    AssetConfig,
    Config,
    ConfigError,
};
