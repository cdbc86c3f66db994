//! Headless engine backend
//!
//! An in-memory scene that implements [`EngineBackend`] without a renderer.
//! Templates are [`Blueprint`]s read from RON files under the configured
//! assets directory; live objects are [`SceneObject`]s addressed by
//! [`ObjectHandle`].
//!
//! ```ron
//! // resources/templates/Enemies/Goblin.ron
//! (
//!     name: "Goblin",
//!     tag: Some("Enemy"),
//!     properties: { "hp": "12" },
//! )
//! ```

use crate::core::config::AssetConfig;
use crate::engine::{EngineBackend, Named};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

new_key_type! {
    /// Handle to an object in a [`HeadlessEngine`] scene
    pub struct ObjectHandle;
}

/// Template loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// No file at the resolved path
    #[error("Asset not found: {0}")]
    NotFound(PathBuf),

    /// File exists but could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File contents are not a valid blueprint
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Offending file
        path: PathBuf,
        /// Parser message
        message: String,
    },
}

/// Object blueprint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Blueprint {
    /// Template name; falls back to the file stem when loaded without one
    pub name: String,
    /// Optional grouping tag
    pub tag: Option<String>,
    /// Free-form properties copied onto each instance
    pub properties: BTreeMap<String, String>,
}

impl Blueprint {
    /// Create a blueprint with no tag or properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add a property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl Named for Blueprint {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Live object in a headless scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneObject {
    /// Scene name, searched by `find_by_name`
    pub name: String,
    /// Grouping tag
    pub tag: Option<String>,
    /// Properties copied from the blueprint
    pub properties: BTreeMap<String, String>,
    /// Name of the blueprint this was instantiated from, if any
    pub blueprint: Option<String>,
}

/// Collaborator call counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Objects created from blueprints
    pub instantiated: u64,
    /// Objects destroyed
    pub destroyed: u64,
    /// Asset load attempts, successful or not
    pub asset_loads: u64,
}

/// In-memory scene backend
pub struct HeadlessEngine {
    objects: SlotMap<ObjectHandle, SceneObject>,
    assets_dir: PathBuf,
    extension: String,
    stats: EngineStats,
}

impl HeadlessEngine {
    /// Create an empty scene reading templates per `config`
    pub fn new(config: &AssetConfig) -> Self {
        log::info!("Creating headless engine (assets: {})", config.assets_dir.display());
        Self {
            objects: SlotMap::with_key(),
            assets_dir: config.assets_dir.clone(),
            extension: config.extension.clone(),
            stats: EngineStats::default(),
        }
    }

    /// Put a pre-existing object into the scene
    ///
    /// Stands in for objects the level already contains, such as a camera,
    /// which game logic later adopts with `Registry::link`.
    pub fn place(&mut self, name: impl Into<String>) -> ObjectHandle {
        self.objects.insert(SceneObject {
            name: name.into(),
            tag: None,
            properties: BTreeMap::new(),
            blueprint: None,
        })
    }

    /// Look up a live object
    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(handle)
    }

    /// Mutable access to a live object
    pub fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        self.objects.get_mut(handle)
    }

    /// Whether `handle` still refers to a live object
    pub fn is_alive(&self, handle: ObjectHandle) -> bool {
        self.objects.contains_key(handle)
    }

    /// Number of live objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Collaborator call counters
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// File a given asset path resolves to
    ///
    /// Paths must be relative and stay inside the assets directory; empty,
    /// absolute and `..` paths resolve to nothing.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, AssetError> {
        let relative = Path::new(path);
        let confined = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if path.is_empty() || relative.is_absolute() || !confined {
            return Err(AssetError::NotFound(relative.to_path_buf()));
        }

        let mut file = self.assets_dir.join(relative);
        let with_ext = match file.extension() {
            Some(ext) => format!("{}.{}", ext.to_string_lossy(), self.extension),
            None => self.extension.clone(),
        };
        file.set_extension(with_ext);
        Ok(file)
    }

    /// Read and parse the blueprint at an asset path
    pub fn read_blueprint(&self, path: &str) -> Result<Blueprint, AssetError> {
        let file = self.resolve(path)?;
        if !file.is_file() {
            return Err(AssetError::NotFound(file));
        }

        let contents = std::fs::read_to_string(&file)?;
        let mut blueprint: Blueprint = ron::from_str(&contents).map_err(|e| AssetError::Parse {
            path: file.clone(),
            message: e.to_string(),
        })?;

        if blueprint.name.is_empty() {
            blueprint.name = file_stem(&file);
        }
        Ok(blueprint)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl EngineBackend for HeadlessEngine {
    type Template = Blueprint;
    type Instance = ObjectHandle;

    fn instantiate(&mut self, template: &Blueprint) -> ObjectHandle {
        self.stats.instantiated += 1;
        self.objects.insert(SceneObject {
            name: format!("{}(Clone)", template.name),
            tag: template.tag.clone(),
            properties: template.properties.clone(),
            blueprint: Some(template.name.clone()),
        })
    }

    fn destroy(&mut self, instance: ObjectHandle) {
        self.stats.destroyed += 1;
        if self.objects.remove(instance).is_none() {
            log::debug!("Destroy requested for stale handle {:?}", instance);
        }
    }

    fn find_by_name(&self, name: &str) -> Option<ObjectHandle> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(handle, _)| handle)
    }

    fn load_asset(&mut self, path: &str) -> Option<Blueprint> {
        self.stats.asset_loads += 1;
        match self.read_blueprint(path) {
            Ok(blueprint) => Some(blueprint),
            Err(AssetError::NotFound(file)) => {
                log::trace!("No template asset at {}", file.display());
                None
            }
            Err(e) => {
                log::warn!("Failed to load template '{}': {}", path, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("scene_decoupler_tests")
            .join(format!("{}_{}", test, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn engine_in(dir: &Path) -> HeadlessEngine {
        HeadlessEngine::new(&AssetConfig::default().with_assets_dir(dir))
    }

    #[test]
    fn test_instantiate_names_clone() {
        let mut engine = engine_in(Path::new("."));
        let template = Blueprint::new("Goblin").with_tag("Enemy").with_property("hp", "12");

        let handle = engine.instantiate(&template);
        let object = engine.object(handle).unwrap();

        assert_eq!(object.name, "Goblin(Clone)");
        assert_eq!(object.tag.as_deref(), Some("Enemy"));
        assert_eq!(object.properties.get("hp").map(String::as_str), Some("12"));
        assert_eq!(object.blueprint.as_deref(), Some("Goblin"));
        assert_eq!(engine.stats().instantiated, 1);
    }

    #[test]
    fn test_find_and_destroy() {
        let mut engine = engine_in(Path::new("."));
        let camera = engine.place("Main Camera");

        assert_eq!(engine.find_by_name("Main Camera"), Some(camera));
        assert_eq!(engine.find_by_name("Sun"), None);

        engine.destroy(camera);
        assert!(!engine.is_alive(camera));
        assert_eq!(engine.find_by_name("Main Camera"), None);

        // Stale handle is tolerated
        engine.destroy(camera);
        assert_eq!(engine.stats().destroyed, 2);
    }

    #[test]
    fn test_load_asset_from_ron() {
        let dir = scratch_dir("load_asset_from_ron");
        std::fs::create_dir_all(dir.join("Enemies")).unwrap();
        std::fs::write(
            dir.join("Enemies/Goblin.ron"),
            r#"(name: "Goblin", tag: Some("Enemy"), properties: {"hp": "12"})"#,
        )
        .unwrap();
        std::fs::write(dir.join("Coin.ron"), r#"(properties: {"value": "5"})"#).unwrap();

        let mut engine = engine_in(&dir);

        let goblin = engine.load_asset("Enemies/Goblin").unwrap();
        assert_eq!(goblin.name, "Goblin");
        assert_eq!(goblin.tag.as_deref(), Some("Enemy"));

        let coin = engine.load_asset("Coin").unwrap();
        assert_eq!(coin.name, "Coin");

        assert!(engine.load_asset("Enemies/Troll").is_none());
        assert_eq!(engine.stats().asset_loads, 3);
    }

    #[test]
    fn test_malformed_asset_is_absent() {
        let dir = scratch_dir("malformed_asset_is_absent");
        std::fs::write(dir.join("Broken.ron"), "(name: ").unwrap();

        let mut engine = engine_in(&dir);
        assert!(matches!(
            engine.read_blueprint("Broken"),
            Err(AssetError::Parse { .. })
        ));
        assert!(engine.load_asset("Broken").is_none());
    }

    #[test]
    fn test_resolve_keeps_dotted_names() {
        let engine = engine_in(Path::new("assets"));
        assert_eq!(engine.resolve("Enemies/Goblin").unwrap(), Path::new("assets/Enemies/Goblin.ron"));
        assert_eq!(engine.resolve("fx/spark.v2").unwrap(), Path::new("assets/fx/spark.v2.ron"));
    }

    #[test]
    fn test_resolve_stays_inside_assets_dir() {
        let engine = engine_in(Path::new("assets/templates"));
        for path in ["", "/etc/passwd", "../secret", "Enemies/../../secret"] {
            assert!(
                matches!(engine.resolve(path), Err(AssetError::NotFound(_))),
                "{path:?} should not resolve"
            );
        }
        assert!(engine.resolve("./Enemies/Goblin").is_ok());
    }

    #[test]
    fn test_escaping_path_is_absent() {
        let dir = scratch_dir("escaping_path_is_absent");
        std::fs::write(dir.join("Outside.ron"), r#"(name: "Outside")"#).unwrap();
        let inner = dir.join("templates");
        std::fs::create_dir_all(&inner).unwrap();

        let mut engine = engine_in(&inner);
        assert!(engine.load_asset("../Outside").is_none());
        assert!(engine.load_asset("").is_none());
    }
}
