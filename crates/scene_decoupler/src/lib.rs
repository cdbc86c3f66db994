//! # Scene Decoupler
//!
//! A thin registry that lets game logic create, find and destroy scene
//! objects without talking to the engine's scene queries directly.
//!
//! ## Features
//!
//! - **Templates**: name-deduplicated blueprints, registered by hand or loaded by asset path
//! - **Instances**: caller-named live objects, spawned from templates or linked from the scene
//! - **Frame Broadcast**: ordered per-frame listeners with add/remove by identity
//! - **Injected Engine**: every engine side effect goes through [`EngineBackend`]
//! - **Headless Backend**: an in-memory scene for tools, demos and tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_decoupler::prelude::*;
//!
//! let config = DecouplerConfig::default();
//! let mut engine = HeadlessEngine::new(&config.assets);
//! engine.place("Main Camera");
//!
//! let mut registry = Registry::new(engine);
//! registry.load_template("Enemies/Goblin");
//! let goblin = registry.spawn("Enemies/Goblin", "goblin_1");
//! let camera = registry.link("Main Camera");
//!
//! registry.add_update_listener(|dt| println!("frame took {dt}s"));
//!
//! let mut driver = FrameDriver::new(&config.frames);
//! driver.run_for(&registry.frame_broadcaster(), 60);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod core;
pub mod config;
pub mod foundation;

pub mod engine;
pub mod templates;
pub mod instances;
pub mod frame;
pub mod driver;
pub mod headless;

mod registry;

pub use engine::{EngineBackend, Named};
pub use frame::{FrameBroadcaster, ListenerId};
pub use registry::Registry;

#[cfg(test)]
mod tests;

/// Common imports for registry users
pub mod prelude {
    pub use crate::{
        Registry,
        engine::{EngineBackend, Named},
        frame::{FrameBroadcaster, ListenerId},
        driver::FrameDriver,
        headless::{Blueprint, HeadlessEngine, ObjectHandle, SceneObject},
        config::Config,
        core::config::{DecouplerConfig, FrameConfig, AssetConfig, LoggingConfig},
        foundation::time::Timer,
    };
}
