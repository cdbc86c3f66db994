//! Template store
//!
//! Ordered collection of blueprints keyed by string. A key is either the
//! template's own name (manual registration) or the asset path it was
//! loaded from; both share one namespace.

use crate::engine::Named;

struct TemplateEntry<T> {
    key: String,
    template: T,
}

/// Ordered, key-deduplicated template collection
pub struct TemplateStore<T> {
    entries: Vec<TemplateEntry<T>>,
}

impl<T> TemplateStore<T> {
    /// Create an empty store
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register a template under an explicit key
    ///
    /// Returns `false` and leaves the store unchanged if the key is taken.
    pub fn insert_as(&mut self, key: impl Into<String>, template: T) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.entries.push(TemplateEntry { key, template });
        true
    }

    /// Find the template stored under `key`
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.template)
    }

    /// Whether a template is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    /// Number of stored templates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// `(key, template)` pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|entry| (entry.key.as_str(), &entry.template))
    }
}

impl<T: Named> TemplateStore<T> {
    /// Register a template under its own name
    pub fn add(&mut self, template: T) -> bool {
        let key = template.name().to_owned();
        self.insert_as(key, template)
    }
}

impl<T> Default for TemplateStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Named> FromIterator<T> for TemplateStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut store = Self::new();
        for template in iter {
            store.add(template);
        }
        store
    }
}
