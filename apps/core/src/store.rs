//! JSON values persisted under string keys.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;

/// Raw string storage, e.g. `localStorage` or a SQLite table.
pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Stores `value` as JSON text under `key`.
pub fn save<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_string(value)?;
    store.set_raw(key, &encoded)
}

/// Reads `key` back. A missing key is `Null`; text that is not JSON is
/// returned as a string rather than failing.
pub fn load<S>(store: &S, key: &str) -> Result<Value, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(store.get_raw(key)?.map_or(Value::Null, decode_stored))
}

pub fn decode_stored(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

pub fn clear_keys<S, K>(store: &mut S, keys: impl IntoIterator<Item = K>) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
    K: AsRef<str>,
{
    for key in keys {
        store.remove(key.as_ref())?;
    }
    Ok(())
}

/// In-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
