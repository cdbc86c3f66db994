//! Arena demo application
//!
//! Drives a headless scene for a few seconds: templates are preloaded from
//! `resources/templates`, a wave listener spawns and retires enemies on a
//! timer, and the camera is adopted from the scene by name.

use scene_decoupler::config::ConfigError;
use scene_decoupler::foundation::logging;
use scene_decoupler::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

type ArenaRegistry = Registry<HeadlessEngine>;

const WAVE_INTERVAL: f32 = 1.0;
const MAX_GOBLINS: u32 = 3;
const RUN_SECONDS: f32 = 4.0;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene object '{0}' is missing")]
    MissingObject(String),
}

/// Spawns one goblin per interval, then an orc that replaces the oldest goblin
struct WaveSpawner {
    registry: Rc<RefCell<ArenaRegistry>>,
    since_last_wave: f32,
    spawned: u32,
}

impl WaveSpawner {
    fn new(registry: Rc<RefCell<ArenaRegistry>>) -> Self {
        Self {
            registry,
            since_last_wave: 0.0,
            spawned: 0,
        }
    }

    fn update(&mut self, delta_time: f32) {
        self.since_last_wave += delta_time;
        if self.since_last_wave < WAVE_INTERVAL {
            return;
        }
        self.since_last_wave -= WAVE_INTERVAL;

        let mut registry = self.registry.borrow_mut();
        if self.spawned < MAX_GOBLINS {
            self.spawned += 1;
            let name = format!("goblin_{}", self.spawned);
            if registry.spawn("Enemies/Goblin", &name).is_some() {
                log::info!("Wave {}: spawned {}", self.spawned, name);
            }
        } else if registry.get_instance("boss").is_none() {
            // Not preloaded; first use goes to the asset system
            if registry.load_template("Enemies/Orc").is_some() && registry.spawn("Enemies/Orc", "boss").is_some() {
                registry.remove("goblin_1");
                log::info!("Boss wave: orc replaced goblin_1");
            }
        }
    }
}

/// Read the config, noting whether the file existed
///
/// Runs before logging is set up (the filter lives in the config), so the
/// outcome is returned for the caller to report.
fn load_config(config_path: &str) -> Result<(DecouplerConfig, bool), DemoError> {
    let found = std::path::Path::new(config_path).exists();
    let config = DecouplerConfig::load_or_default(config_path)?;
    Ok((config, found))
}

fn run(config_path: &str) -> Result<(), DemoError> {
    let (config, found) = load_config(config_path)?;
    logging::init_from_config(&config.logging);
    if found {
        log::info!("Loaded config from {}", config_path);
    } else {
        log::info!("No config at {}, using defaults", config_path);
    }
    config.validate()?;

    let mut engine = HeadlessEngine::new(&config.assets);
    engine.place("Main Camera");
    engine.place("Directional Light");

    let registry = Rc::new(RefCell::new(Registry::new(engine)));
    {
        let mut registry = registry.borrow_mut();
        let loaded = registry.preload_templates(&config.assets.preload);
        log::info!("Preloaded {}/{} templates", loaded, config.assets.preload.len());

        if registry.get_template("Enemies/Goblin").is_none() {
            log::warn!("Goblin template asset missing, registering a built-in one");
            registry.add_template(Blueprint::new("Enemies/Goblin").with_tag("Enemy"));
        }

        registry
            .link("Main Camera")
            .ok_or_else(|| DemoError::MissingObject("Main Camera".to_string()))?;
        registry.spawn("Pickups/Coin", "coin_1");
    }

    let frames = registry.borrow().frame_broadcaster();

    let mut waves = WaveSpawner::new(Rc::clone(&registry));
    frames.add_listener(move |dt| waves.update(dt));

    let status = Rc::clone(&registry);
    let mut since_report = 0.0_f32;
    frames.add_listener(move |dt| {
        since_report += dt;
        if since_report >= 1.0 {
            since_report = 0.0;
            let registry = status.borrow();
            log::info!(
                "{} instances tracked, {} objects in scene",
                registry.instance_count(),
                registry.engine().object_count()
            );
        }
    });

    let mut driver = FrameDriver::new(&config.frames);
    driver.run_while(&frames, |timer| timer.total_time() < RUN_SECONDS);

    // Listeners hold registry handles; drop them before tearing down
    frames.clear();

    let mut registry = registry.borrow_mut();
    let removed = registry.clear_instances();
    let stats = registry.engine().stats();
    log::info!(
        "Cleared {} instances ({} instantiated, {} destroyed, {} asset loads)",
        removed,
        stats.instantiated,
        stats.destroyed,
        stats.asset_loads
    );
    Ok(())
}

fn main() {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "arena.toml".to_string());

    if let Err(e) = run(&config_path) {
        // No-op when the config already initialised logging
        logging::init();
        log::error!("Arena demo failed: {}", e);
        eprintln!("Arena demo failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_reports_defaults() {
        let (config, found) = load_config("does/not/exist/arena.toml").unwrap();
        assert!(!found);
        assert_eq!(config, DecouplerConfig::default());
    }

    #[test]
    fn test_workspace_config_is_found() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../arena.toml");
        let (config, found) = load_config(path).unwrap();
        assert!(found);
        assert_eq!(config.frames.target_fps, Some(60));
        assert_eq!(config.logging.filter, "info,scene_decoupler=debug");
    }
}
