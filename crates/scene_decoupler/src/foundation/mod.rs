//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Frame timing
//! - Logging utilities

pub mod time;
pub mod logging;
