use crate::core::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Client-local key/value storage - allows pluggable backends
///
/// Values are JSON documents, one per key.
pub trait KeyValueStore: Send + Sync {
    /// Raw JSON stored under `key`, if any
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    fn set_raw(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn delete(&self, key: &str) -> Result<()>;

    /// All stored keys, sorted
    fn keys(&self) -> Result<Vec<String>>;
}

/// Typed access on top of [`KeyValueStore`].
pub trait KeyValueStoreExt: KeyValueStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Stored value, or `default` when the key is absent.
    fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
