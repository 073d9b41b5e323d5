use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use directories_next::ProjectDirs;
use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::StoreError;

const STORE_FILE_NAME: &str = "store.json";

pub trait StorageBackend {
    /// Called once when a store is built; `false` turns the store into a no-op.
    fn is_available(&self) -> bool;
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn describe(&self) -> String {
        "storage".to_string()
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: IndexMap<String, String>,
    probes: AtomicUsize,
}

impl MemoryStorage {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::Relaxed)
    }
}

impl StorageBackend for MemoryStorage {
    fn is_available(&self) -> bool {
        self.probes.fetch_add(1, Ordering::Relaxed);
        true
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Stands in when no storage can be found.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl StorageBackend for UnavailableStorage {
    fn is_available(&self) -> bool {
        false
    }

    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn describe(&self) -> String {
        "unavailable".to_string()
    }
}

/// A flat JSON object on disk, rewritten whole on every `set`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Option<PathBuf> {
        ProjectDirs::from("", "", "modalpad").map(|dirs| dirs.data_dir().join(STORE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<IndexMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(IndexMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(IndexMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_entries(&self, entries: &IndexMap<String, String>) -> Result<(), StoreError> {
        let payload = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(payload.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        debug!("wrote {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn is_available(&self) -> bool {
        let Some(parent) = self.path.parent() else {
            return false;
        };
        if !parent.as_os_str().is_empty() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!("store directory {} unusable: {err}", parent.display());
                return false;
            }
        }
        if self.path.is_dir() {
            warn!("store path {} is a directory", self.path.display());
            return false;
        }
        true
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
