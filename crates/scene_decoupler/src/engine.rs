//! Engine collaborator contract
//!
//! The registry owns naming policy (deduplication, caching) and nothing else.
//! Object creation, destruction, scene search and asset loading all belong
//! to the host engine and are reached through [`EngineBackend`].

/// Anything that carries its own name, used to key templates
pub trait Named {
    /// The object's name
    fn name(&self) -> &str;
}

/// Host engine capabilities consumed by the [`Registry`](crate::Registry)
///
/// Implementations decide what a template and an instance handle are. Handles
/// should be cheap to clone (an id or a reference-counted pointer), since the
/// registry hands out copies to callers.
pub trait EngineBackend {
    /// Blueprint from which live objects are created
    type Template: Named;

    /// Handle to a live scene object
    type Instance: Clone;

    /// Create a live object from a blueprint
    fn instantiate(&mut self, template: &Self::Template) -> Self::Instance;

    /// Release a live object and its engine-side resources
    fn destroy(&mut self, instance: Self::Instance);

    /// Scene-wide search by object name
    fn find_by_name(&self, name: &str) -> Option<Self::Instance>;

    /// Load a blueprint from an asset path
    ///
    /// Returns `None` when nothing loadable lives at `path`.
    fn load_asset(&mut self, path: &str) -> Option<Self::Template>;
}
