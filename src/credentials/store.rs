use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Persistent string slots, in the manner of browser local storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-process store; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots().remove(key);
        Ok(())
    }
}

/// JSON object on disk, one entry per slot. A missing file is an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading settings from {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("parsing settings in {}", self.path.display()))
    }

    fn save(&self, slots: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating settings directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(slots)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing settings to {}", self.path.display()))?;
        debug!("Saved {} settings to {}", slots.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut slots = self.load()?;
        slots.insert(key.to_string(), value.to_string());
        self.save(&slots)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut slots = self.load()?;
        if slots.remove(key).is_some() {
            self.save(&slots)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("locale-scout-{}-{}", name, std::process::id()))
            .join("settings.json")
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let path = temp_path("persist");
        let _ = fs::remove_file(&path);

        FileStore::new(&path).set("rapidapi_key", "abc").unwrap();
        FileStore::new(&path).set("other", "x").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("rapidapi_key").unwrap().as_deref(), Some("abc"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));

        reopened.remove("rapidapi_key").unwrap();
        assert_eq!(FileStore::new(&path).get("rapidapi_key").unwrap(), None);
        assert_eq!(FileStore::new(&path).get("other").unwrap().as_deref(), Some("x"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn file_store_reports_its_path() {
        let path = temp_path("path");
        assert_eq!(FileStore::new(&path).path(), path.as_path());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.get("rapidapi_key").unwrap(), None);
        store.remove("rapidapi_key").unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        assert!(FileStore::new(&path).get("rapidapi_key").is_err());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
