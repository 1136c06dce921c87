//! On-disk key/value persistence for reviveboard

use super::KeyValueStore;
use crate::core::{AppError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

const EXTENSION: &str = "json";

// ============================================================================
// File Store
// ============================================================================

/// One JSON file per key inside `data_dir`.
///
/// Writes go to a temp file in the same directory which is then renamed
/// over the target, so readers never observe a half-written value.
pub struct FileStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)
            .map_err(|e| AppError::Storage(format!("Failed to create data directory '{}': {}", data_dir.display(), e)))?;
        Ok(Self {
            data_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.data_dir.join(format!("{}.{}", key, EXTENSION)))
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!("invalid storage key '{}'", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .map_err(|e| AppError::Storage(format!("Failed to read '{}': {}", path.display(), e)))?;
        Ok(Some(raw))
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock()?;

        let mut temp = NamedTempFile::new_in(&self.data_dir)
            .map_err(|e| AppError::Storage(format!("Failed to create temp file: {}", e)))?;
        temp.write_all(value.as_bytes())
            .map_err(|e| AppError::Storage(format!("Failed to write '{}': {}", key, e)))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| AppError::Storage(format!("Failed to sync '{}': {}", key, e)))?;
        temp.persist(&path)
            .map_err(|e| AppError::Storage(format!("Failed to rename into '{}': {}", path.display(), e)))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock()?;
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| AppError::Storage(format!("Failed to delete '{}': {}", path.display(), e)))?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}
