//! API key storage.
//!
//! The key lives in a single named slot of a [`KeyValueStore`]; the
//! [`CredentialStore`] keeps a read-through copy in memory.

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use anyhow::Result;
use std::sync::RwLock;
use tracing::{info, warn};

/// Slot name the RapidAPI key is stored under
pub const CREDENTIAL_KEY: &str = "rapidapi_key";

pub struct CredentialStore {
    store: Box<dyn KeyValueStore>,
    cached: RwLock<Option<String>>,
}

impl CredentialStore {
    /// Wrap a store, loading any key already saved in it
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        let initial = match store.get(CREDENTIAL_KEY) {
            Ok(value) => value,
            Err(err) => {
                warn!("Could not read saved API key: {:#}", err);
                None
            }
        };

        Self {
            store: Box::new(store),
            cached: RwLock::new(initial),
        }
    }

    /// Current key, falling back to the persistent slot when the cache is empty
    pub fn get(&self) -> Option<String> {
        if let Some(key) = self.read_cache() {
            return Some(key);
        }

        match self.store.get(CREDENTIAL_KEY) {
            Ok(Some(key)) => {
                self.write_cache(Some(key.clone()));
                Some(key)
            }
            Ok(None) => None,
            Err(err) => {
                warn!("Could not read saved API key: {:#}", err);
                None
            }
        }
    }

    /// Save a key. Blank input is rejected.
    pub fn set(&self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("API key must not be empty");
        }

        self.store.set(CREDENTIAL_KEY, key)?;
        self.write_cache(Some(key.to_string()));
        info!("🔑 API key saved");
        Ok(())
    }

    /// Forget the key, both in memory and in the persistent slot
    pub fn clear(&self) -> Result<()> {
        self.write_cache(None);
        self.store.remove(CREDENTIAL_KEY)?;
        info!("🔑 API key removed");
        Ok(())
    }

    fn read_cache(&self) -> Option<String> {
        match self.cached.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn write_cache(&self, value: Option<String>) {
        match self.cached.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}
