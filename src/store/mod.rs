//! Namespaced key-value persistence.
//!
//! Storage availability is probed once when the store is built. Without
//! storage, `set` does nothing and `get` always answers `None`; backend
//! failures are logged and never surface to callers.

pub mod backend;

pub use backend::{FileStorage, MemoryStorage, StorageBackend, UnavailableStorage};

use log::{info, warn};

pub const DEFAULT_NAMESPACE: &str = "modalpad";
const KEY_SEPARATOR: char = ':';

pub struct KeyValueStore<B> {
    backend: B,
    available: bool,
    namespace: String,
}

impl<B: StorageBackend> KeyValueStore<B> {
    pub fn new(backend: B, namespace: impl Into<String>) -> Self {
        let available = backend.is_available();
        let namespace = namespace.into();
        if available {
            info!("key-value store {namespace:?} backed by {}", backend.describe());
        } else {
            info!("key-value store {namespace:?} has no storage; writes are dropped");
        }
        Self {
            backend,
            available,
            namespace,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `namespace:part:part…`, e.g. `modalpad:c1:e2`.
    pub fn key(&self, parts: &[&str]) -> String {
        let mut key = self.namespace.clone();
        for part in parts {
            key.push(KEY_SEPARATOR);
            key.push_str(part);
        }
        key
    }

    pub fn set(&mut self, parts: &[&str], value: &str) {
        if !self.available {
            return;
        }
        let key = self.key(parts);
        if let Err(err) = self.backend.set(&key, value) {
            warn!("failed to store {key}: {err}");
        }
    }

    pub fn get(&self, parts: &[&str]) -> Option<String> {
        if !self.available {
            return None;
        }
        let key = self.key(parts);
        self.backend.get(&key).unwrap_or_else(|err| {
            warn!("failed to load {key}: {err}");
            None
        })
    }

    pub fn save_exercise(&mut self, chapter: u32, exercise: u32, data: &str) {
        self.set(&exercise_parts(chapter, exercise).each_ref().map(String::as_str), data);
    }

    pub fn load_exercise(&self, chapter: u32, exercise: u32) -> Option<String> {
        self.get(&exercise_parts(chapter, exercise).each_ref().map(String::as_str))
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

fn exercise_parts(chapter: u32, exercise: u32) -> [String; 2] {
    [format!("chapter{chapter}"), format!("exercise{exercise}")]
}
