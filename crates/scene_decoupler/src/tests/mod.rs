//! Registry tests against a recording engine fake
//!
//! `RecordingEngine` counts every collaborator call so the tests can assert
//! how often the registry reaches the engine, not only what it returns.


use crate::engine::{EngineBackend, Named};
use log::{Level, Log, Metadata, Record};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Once;

/// Blueprint stand-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FakeTemplate {
    pub name: String,
}

impl FakeTemplate {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Named for FakeTemplate {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Handle stand-in: a monotonically increasing object id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FakeHandle(pub u32);

#[derive(Default)]
pub(crate) struct RecordingEngine {
    next_id: u32,
    pub scene: HashMap<String, FakeHandle>,
    pub assets: HashMap<String, FakeTemplate>,
    pub instantiated: Vec<(String, FakeHandle)>,
    pub destroyed: Vec<FakeHandle>,
    pub searches: RefCell<Vec<String>>,
    pub asset_loads: Vec<String>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&mut self) -> FakeHandle {
        self.next_id += 1;
        FakeHandle(self.next_id)
    }

    /// Put a named object in the scene
    pub fn with_scene_object(mut self, name: &str) -> Self {
        let handle = self.next_handle();
        self.scene.insert(name.to_string(), handle);
        self
    }

    /// Make `path` loadable as a template named `name`
    pub fn with_asset(mut self, path: &str, name: &str) -> Self {
        self.assets.insert(path.to_string(), FakeTemplate::new(name));
        self
    }
}

impl EngineBackend for RecordingEngine {
    type Template = FakeTemplate;
    type Instance = FakeHandle;

    fn instantiate(&mut self, template: &FakeTemplate) -> FakeHandle {
        let handle = self.next_handle();
        self.instantiated.push((template.name.clone(), handle));
        handle
    }

    fn destroy(&mut self, instance: FakeHandle) {
        self.destroyed.push(instance);
    }

    fn find_by_name(&self, name: &str) -> Option<FakeHandle> {
        self.searches.borrow_mut().push(name.to_string());
        self.scene.get(name).copied()
    }

    fn load_asset(&mut self, path: &str) -> Option<FakeTemplate> {
        self.asset_loads.push(path.to_string());
        self.assets.get(path).cloned()
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

/// Logger that keeps records per test thread
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().starts_with("scene_decoupler") {
            CAPTURED.with(|captured| {
                captured.borrow_mut().push((record.level(), record.args().to_string()));
            });
        }
    }

    fn flush(&self) {}
}

static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Run `body` and return the crate's log records it produced on this thread
pub(crate) fn capture_logs(body: impl FnOnce()) -> Vec<(Level, String)> {
    INSTALL.call_once(|| {
        if log::set_logger(&CAPTURE_LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    CAPTURED.with(|captured| captured.borrow_mut().clear());
    body();
    CAPTURED.with(|captured| std::mem::take(&mut *captured.borrow_mut()))
}
