//! Storage backend implementations.
//!
//! Backends model the browser key-value store the profile-setup flow writes
//! to: string keys mapped to string values.
//! - InMemoryStore: Fast, ephemeral storage for testing
//! - FileStore: JSON file-based persistent storage

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::{Error, Result};
use crate::utils::constants::STORE_FILE_NAME;

// ═══════════════════════════════════════════════════════════════════════════════
// STORAGE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Trait for string key-value storage backends
pub trait StorageBackend: Send + Sync {
    /// Get a value by key
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value for a key
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key, returning whether it existed
    fn delete(&self, key: &str) -> Result<bool>;

    /// Flush any pending writes to persistent storage
    fn flush(&self) -> Result<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Arc<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        (**self).delete(key)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}

fn lock_error<E>(_: E) -> Error {
    Error::Lock
}

// ═══════════════════════════════════════════════════════════════════════════════
// IN-MEMORY STORE
// ═══════════════════════════════════════════════════════════════════════════════

/// In-memory storage backend (for testing and ephemeral use)
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<BTreeMap<String, String>>,
}

impl InMemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.data.read().map(|d| d.len()).unwrap_or(0)
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(key).is_some())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FILE-BASED STORE
// ═══════════════════════════════════════════════════════════════════════════════

/// File-based storage backend: one JSON object of string values
#[derive(Debug)]
pub struct FileStore {
    /// Base directory for storage
    base_path: PathBuf,
    /// In-memory cache
    cache: RwLock<BTreeMap<String, String>>,
    /// Whether cache is dirty and needs flushing
    dirty: RwLock<bool>,
}

impl FileStore {
    /// Open (or create) a file store in the given directory
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                Error::Storage(format!("Failed to create storage directory: {}", e))
            })?;
        }

        let store = Self {
            base_path,
            cache: RwLock::new(BTreeMap::new()),
            dirty: RwLock::new(false),
        };

        store.load_from_disk()?;

        Ok(store)
    }

    /// Path of the backing file
    pub fn data_file_path(&self) -> PathBuf {
        self.base_path.join(STORE_FILE_NAME)
    }

    fn load_from_disk(&self) -> Result<()> {
        let path = self.data_file_path();

        if !path.exists() {
            return Ok(());
        }

        let file = File::open(&path)
            .map_err(|e| Error::Storage(format!("Failed to open data file: {}", e)))?;

        let data: BTreeMap<String, String> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Deserialization(format!("Failed to parse data file: {}", e)))?;

        let mut cache = self.cache.write().map_err(lock_error)?;
        *cache = data;

        tracing::debug!(path = %path.display(), entries = cache.len(), "Loaded file store");
        Ok(())
    }

    fn save_to_disk(&self) -> Result<()> {
        let cache = self.cache.read().map_err(lock_error)?;

        let path = self.data_file_path();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| Error::Storage(format!("Failed to open data file for writing: {}", e)))?;

        serde_json::to_writer_pretty(BufWriter::new(file), &*cache)
            .map_err(|e| Error::Storage(format!("Failed to write data file: {}", e)))?;

        let mut dirty = self.dirty.write().map_err(lock_error)?;
        *dirty = false;

        Ok(())
    }

    fn mark_dirty(&self) -> Result<()> {
        let mut dirty = self.dirty.write().map_err(lock_error)?;
        *dirty = true;
        Ok(())
    }
}

impl StorageBackend for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let cache = self.cache.read().map_err(lock_error)?;
        Ok(cache.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        {
            let mut cache = self.cache.write().map_err(lock_error)?;
            cache.insert(key.to_string(), value.to_string());
        }
        self.mark_dirty()
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let existed = {
            let mut cache = self.cache.write().map_err(lock_error)?;
            cache.remove(key).is_some()
        };

        if existed {
            self.mark_dirty()?;
        }

        Ok(existed)
    }

    fn flush(&self) -> Result<()> {
        let dirty = *self.dirty.read().map_err(lock_error)?;
        if dirty {
            self.save_to_disk()?;
        }
        Ok(())
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        // Attempt to flush on drop
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());

        store.set("key1", "value1").unwrap();
        assert_eq!(store.get("key1").unwrap(), Some("value1".to_string()));
        assert_eq!(store.get("nonexistent").unwrap(), None);
        assert_eq!(store.len(), 1);

        assert!(store.delete("key1").unwrap());
        assert!(!store.delete("key1").unwrap());
        assert_eq!(store.get("key1").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_shared_store_through_arc() {
        let store = Arc::new(InMemoryStore::new());
        let handle = Arc::clone(&store);
        handle.set("k", "v").unwrap();
        assert_eq!(StorageBackend::get(&store, "k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_file_store() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();

        store.set("key1", "value1").unwrap();
        assert_eq!(store.get("key1").unwrap(), Some("value1".to_string()));

        store.flush().unwrap();
        assert!(temp_dir.path().join(STORE_FILE_NAME).exists());
    }

    #[test]
    fn test_file_store_persistence() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().to_path_buf();

        {
            let store = FileStore::new(&path).unwrap();
            store.set("persistent", "[]").unwrap();
            store.flush().unwrap();
        }

        {
            let store = FileStore::new(&path).unwrap();
            assert_eq!(store.get("persistent").unwrap(), Some("[]".to_string()));
        }
    }

    #[test]
    fn test_file_store_delete_persists() {
        let temp_dir = tempfile::tempdir().unwrap();

        {
            let store = FileStore::new(temp_dir.path()).unwrap();
            store.set("gone", "1").unwrap();
            store.set("kept", "2").unwrap();
            store.flush().unwrap();
            assert!(store.delete("gone").unwrap());
            store.flush().unwrap();
        }

        let store = FileStore::new(temp_dir.path()).unwrap();
        assert_eq!(store.get("gone").unwrap(), None);
        assert_eq!(store.get("kept").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_file_store_flushes_on_drop() {
        let temp_dir = tempfile::tempdir().unwrap();

        {
            let store = FileStore::new(temp_dir.path()).unwrap();
            store.set("k", "v").unwrap();
        }

        let store = FileStore::new(temp_dir.path()).unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(STORE_FILE_NAME), "{not json").unwrap();

        assert!(matches!(
            FileStore::new(temp_dir.path()),
            Err(Error::Deserialization(_))
        ));
    }
}
