use super::KeyValueStore;
use crate::core::Result;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Process-local store; contents live as long as the value.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read()?;
        Ok(entries.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write()?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write()?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.read()?;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStoreExt;

    #[test]
    fn test_typed_set_and_get() {
        let store = MemoryStore::new();
        store.set("numbers", &vec![1, 2, 3]).unwrap();

        let numbers: Vec<i32> = store.get("numbers").unwrap().unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(store.keys().unwrap(), vec!["numbers".to_string()]);
    }

    #[test]
    fn test_missing_key_and_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get::<String>("nope").unwrap(), None);
        assert_eq!(store.get_or("nope", 5u32).unwrap(), 5);

        store.set("k", "v").unwrap();
        store.delete("k").unwrap();
        store.delete("k").unwrap();
        assert!(store.get_raw("k").unwrap().is_none());
    }
}
