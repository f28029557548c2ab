use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

const STORE_FILE: &str = "store.json";

/// Process-wide key-value store backed by a single JSON file, the server-side
/// stand-in for the browser's local storage. Values are plain JSON; readers
/// are expected to tolerate missing fields and merge with their defaults.
#[derive(Clone)]
pub struct KvStore {
    path: PathBuf,
    entries: Arc<Mutex<HashMap<String, JsonValue>>>,
}

impl KvStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(STORE_FILE);

        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, JsonValue>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!("Store file {:?} is corrupt, starting empty: {}", path, e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    pub fn get(&self, key: &str) -> Option<JsonValue> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned()
    }

    /// Typed read. A stored value that no longer deserializes is treated the
    /// same as an absent one, so schema drift never crashes a reader.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Discarding unreadable stored value for {:?}: {}", key, e);
                None
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .contains_key(key)
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        let snapshot = {
            let mut entries = self.entries.lock().expect("store mutex poisoned");
            entries.insert(key.to_string(), value);
            serde_json::to_string_pretty(&*entries)?
        };
        std::fs::write(&self.path, snapshot)?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let snapshot = {
            let mut entries = self.entries.lock().expect("store mutex poisoned");
            entries.remove(key);
            serde_json::to_string_pretty(&*entries)?
        };
        std::fs::write(&self.path, snapshot)?;
        Ok(())
    }
}
