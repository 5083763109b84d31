//! Key-value cache stores.
//!
//! The fetcher only needs `read`, `write` and `delete` on string keys.
//! Stores are responsible for their own thread safety.

use anyhow::{anyhow, Context};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::{ConsumerError, Result};

/// A string key-value store.
pub trait CacheStore: Send + Sync {
    /// Read the value under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Returns whether a value was removed.
    fn delete(&self, key: &str) -> Result<bool>;
}

/// In-process store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| ConsumerError::Other(anyhow!("memory cache store lock poisoned")))
    }

    /// All keys currently stored, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    /// Number of stored keys.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }
}

impl CacheStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.remove(key).is_some())
    }
}

/// Store keeping one file per key under a root directory.
///
/// File names are derived from a hash of the key, so arbitrary URLs are
/// safe to use as keys.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let hash = Sha256::digest(key.as_bytes());
        self.root.join(hex::encode(&hash[..16]))
    }

    /// Number of entries on disk.
    pub fn len(&self) -> Result<usize> {
        if !self.root.exists() {
            return Ok(0);
        }

        let mut count = 0;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let hidden = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with('.'));
            if path.is_file() && !hidden && path.extension().is_none() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// True when no entry is on disk.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl CacheStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConsumerError::Other(
                anyhow::Error::new(e).context(format!("Failed to read cache entry {:?}", path)),
            )),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create cache directory {:?}", self.root))?;

        let path = self.path_for(key);

        // Each writer gets its own temp file so concurrent writes never share one.
        let mut temp = tempfile::Builder::new()
            .prefix(".")
            .suffix(".tmp")
            .tempfile_in(&self.root)
            .with_context(|| format!("Failed to create temp file in {:?}", self.root))?;
        temp.write_all(value.as_bytes())
            .with_context(|| format!("Failed to write cache entry {:?}", temp.path()))?;
        temp.persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to move cache entry into place at {:?}", path))?;

        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key);

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn memory_store_write_read_delete() {
        let store = MemoryStore::new();

        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap(), Some("v".to_string()));

        assert!(store.delete("k").unwrap());
        assert_eq!(store.read("k").unwrap(), None);
        assert!(!store.delete("k").unwrap());
    }

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryStore::new();
        store.write("k", "one").unwrap();
        store.write("k", "two").unwrap();

        assert_eq!(store.read("k").unwrap(), Some("two".to_string()));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn memory_store_keys_are_sorted() {
        let store = MemoryStore::new();
        store.write("b", "2").unwrap();
        store.write("a", "1").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
        assert!(!store.is_empty().unwrap());
    }

    #[test]
    fn memory_store_shared_across_threads() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.write(&format!("k{}", i), "v").unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len().unwrap(), 4);
    }

    #[test]
    fn file_store_write_read_delete() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("cache"));

        store
            .write("cms_consumer/http://example.com/page/home", "<h1>Home</h1>")
            .unwrap();
        assert_eq!(
            store
                .read("cms_consumer/http://example.com/page/home")
                .unwrap(),
            Some("<h1>Home</h1>".to_string())
        );
        assert_eq!(store.len().unwrap(), 1);

        assert!(store
            .delete("cms_consumer/http://example.com/page/home")
            .unwrap());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn file_store_missing_key_reads_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        assert_eq!(store.read("absent").unwrap(), None);
        assert!(!store.delete("absent").unwrap());
    }

    #[test]
    fn file_store_len_of_missing_root_is_zero() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("never-created"));
        assert_eq!(store.len().unwrap(), 0);
    }

    #[test]
    fn file_store_paths_are_deterministic_and_distinct() {
        let store = FileStore::new("/tmp/cache");

        assert_eq!(store.path_for("a"), store.path_for("a"));
        assert_ne!(store.path_for("a"), store.path_for("b"));
        assert!(store.path_for("a").starts_with("/tmp/cache"));
    }

    #[test]
    fn file_store_concurrent_writes_to_one_key() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(FileStore::new(temp.path()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let value = format!("writer-{}", i).repeat(64);
                    for _ in 0..200 {
                        store.write("shared", &value).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = store.read("shared").unwrap().unwrap();
        let writer = &content[..content.find('-').unwrap() + 2];
        assert_eq!(content, writer.repeat(64));
        assert_eq!(store.len().unwrap(), 1);
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn file_store_len_skips_temp_files() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        store.write("a", "1").unwrap();
        fs::write(temp.path().join(".leftover.tmp"), "partial").unwrap();

        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn file_store_preserves_empty_values() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        store.write("empty", "").unwrap();
        assert_eq!(store.read("empty").unwrap(), Some(String::new()));
    }
}
