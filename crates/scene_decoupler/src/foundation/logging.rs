//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

use crate::core::config::LoggingConfig;

/// Initialize the logging system from `RUST_LOG`
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = env_logger::try_init();
}

/// Initialize the logging system with a default filter
///
/// `filter` uses `env_logger` directive syntax (`"info"`,
/// `"scene_decoupler=debug,warn"`). A `RUST_LOG` value takes precedence.
pub fn init_with_filter(filter: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }
    let _ = builder.try_init();
}

/// Initialize the logging system from configuration
pub fn init_from_config(config: &LoggingConfig) {
    init_with_filter(&config.filter);
}
