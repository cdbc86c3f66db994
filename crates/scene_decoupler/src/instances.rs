//! Instance registry
//!
//! Authoritative index from caller-chosen instance names to live handles.

use std::collections::HashMap;

/// Name → live handle map, one handle per name
pub struct InstanceRegistry<H> {
    instances: HashMap<String, H>,
}

impl<H> InstanceRegistry<H> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }

    /// Register a handle under `name`
    ///
    /// An occupied name is never overwritten; returns `false` in that case.
    pub fn insert(&mut self, name: impl Into<String>, handle: H) -> bool {
        use std::collections::hash_map::Entry;

        match self.instances.entry(name.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(handle);
                true
            }
        }
    }

    /// Handle registered under `name`
    pub fn get(&self, name: &str) -> Option<&H> {
        self.instances.get(name)
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    /// Unregister `name`, returning its handle
    pub fn remove(&mut self, name: &str) -> Option<H> {
        self.instances.remove(name)
    }

    /// Number of registered instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Registered names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    /// Remove every entry, yielding `(name, handle)` pairs
    pub fn drain(&mut self) -> impl Iterator<Item = (String, H)> + '_ {
        self.instances.drain()
    }
}

impl<H> Default for InstanceRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
