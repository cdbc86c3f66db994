//! Registry - name-keyed front door to the engine's object lifecycle
//!
//! The registry owns three things:
//! - a [`TemplateStore`] of blueprints keyed by name or asset path
//! - an [`InstanceRegistry`] of live handles keyed by caller-chosen names
//! - a [`FrameBroadcaster`] ticked once per frame by the host
//!
//! Every engine side effect goes through the injected [`EngineBackend`].
//! Lookups report "not found" as `None`; nothing here returns an error,
//! and misses are left for the caller to report.
//!
//! **Ownership**: one registry per scene or session, passed by reference to
//! whichever systems need it. Not a global.

use crate::engine::{EngineBackend, Named};
use crate::frame::{FrameBroadcaster, ListenerId};
use crate::instances::InstanceRegistry;
use crate::templates::TemplateStore;

/// Template and instance registry over an engine backend
pub struct Registry<E: EngineBackend> {
    engine: E,
    templates: TemplateStore<E::Template>,
    instances: InstanceRegistry<E::Instance>,
    frames: FrameBroadcaster,
}

impl<E: EngineBackend> Registry<E> {
    /// Create an empty registry over `engine`
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            templates: TemplateStore::new(),
            instances: InstanceRegistry::new(),
            frames: FrameBroadcaster::new(),
        }
    }

    /// Create a registry with a host-supplied initial template list
    ///
    /// Duplicate names in `templates` keep the first occurrence.
    pub fn with_templates<I>(engine: E, templates: I) -> Self
    where
        I: IntoIterator<Item = E::Template>,
    {
        Self {
            templates: templates.into_iter().collect(),
            ..Self::new(engine)
        }
    }

    // ---- frame updates ----

    /// Register a per-frame listener receiving delta time in seconds
    pub fn add_update_listener<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(f32) + 'static,
    {
        self.frames.add_listener(listener)
    }

    /// Unregister a per-frame listener; unknown ids are ignored
    pub fn remove_update_listener(&self, id: ListenerId) -> bool {
        self.frames.remove_listener(id)
    }

    /// Invoke every update listener once with `delta_time`
    ///
    /// Listener panics propagate to the caller.
    pub fn on_frame_tick(&self, delta_time: f32) {
        self.frames.broadcast(delta_time);
    }

    /// Shared handle to the update listeners
    ///
    /// Drive frames through this handle when listeners need to borrow the
    /// registry themselves.
    pub fn frame_broadcaster(&self) -> FrameBroadcaster {
        self.frames.clone()
    }

    // ---- templates ----

    /// Register a template under its own name
    ///
    /// Returns `false` and leaves the store unchanged if the name is taken.
    pub fn add_template(&mut self, template: E::Template) -> bool {
        let name = template.name().to_owned();
        let added = self.templates.add(template);
        if added {
            log::debug!("Registered template '{}'", name);
        }
        added
    }

    /// Template stored under `name`
    pub fn get_template(&self, name: &str) -> Option<&E::Template> {
        self.templates.get(name)
    }

    /// Template for an asset path, loading it through the engine on first use
    ///
    /// The path doubles as the store key, so later loads of the same path and
    /// `get_template(path)` are served from the store without touching the
    /// engine. A failed load is not cached.
    pub fn load_template(&mut self, path: &str) -> Option<&E::Template> {
        if !self.templates.contains(path) {
            let template = self.engine.load_asset(path)?;
            log::debug!("Loaded template '{}' from '{}'", template.name(), path);
            self.templates.insert_as(path, template);
        }
        self.templates.get(path)
    }

    /// Load every path in `paths`, returning how many are now available
    pub fn preload_templates<I, S>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .filter(|path| self.load_template(path.as_ref()).is_some())
            .count()
    }

    /// Number of stored templates
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    /// Template keys in registration order
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys()
    }

    // ---- instances ----

    /// Adopt an existing scene object under `name`
    ///
    /// An already registered name is returned without searching the scene.
    /// Otherwise the engine's scene search runs; a miss leaves the registry
    /// untouched and returns `None`.
    pub fn link(&mut self, name: &str) -> Option<E::Instance> {
        if let Some(existing) = self.instances.get(name) {
            return Some(existing.clone());
        }

        let found = self.engine.find_by_name(name)?;
        self.instances.insert(name, found.clone());
        log::debug!("Linked scene object '{}'", name);
        Some(found)
    }

    /// Create an instance of `template_name` registered as `instance_name`
    ///
    /// An occupied `instance_name` is returned as-is and nothing is
    /// instantiated, whatever the template. Otherwise a missing template
    /// yields `None`.
    pub fn spawn(&mut self, template_name: &str, instance_name: &str) -> Option<E::Instance> {
        if let Some(existing) = self.instances.get(instance_name) {
            return Some(existing.clone());
        }

        let template = self.templates.get(template_name)?;
        let instance = self.engine.instantiate(template);
        self.instances.insert(instance_name, instance.clone());
        log::debug!("Spawned '{}' from template '{}'", instance_name, template_name);
        Some(instance)
    }

    /// Instance registered under `name`
    pub fn get_instance(&self, name: &str) -> Option<E::Instance> {
        self.instances.get(name).cloned()
    }

    /// Destroy and unregister the instance under `name`
    ///
    /// Unknown names are a no-op. Returns whether anything was destroyed.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(instance) = self.instances.remove(name) else {
            return false;
        };
        self.engine.destroy(instance);
        log::debug!("Removed instance '{}'", name);
        true
    }

    /// Destroy and unregister every instance, returning how many were removed
    pub fn clear_instances(&mut self) -> usize {
        let mut removed = 0;
        for (_, instance) in self.instances.drain() {
            self.engine.destroy(instance);
            removed += 1;
        }
        if removed > 0 {
            log::debug!("Cleared {} instances", removed);
        }
        removed
    }

    /// Number of registered instances
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Registered instance names, in no particular order
    pub fn instance_names(&self) -> impl Iterator<Item = &str> {
        self.instances.names()
    }

    // ---- engine access ----

    /// The engine backend
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the engine backend
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Tear down the registry, returning the engine
    ///
    /// Registered instances are left alive in the engine.
    pub fn into_engine(self) -> E {
        self.engine
    }
}
