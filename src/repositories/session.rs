use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ApiError, Result};

/// A string key-value store that outlives a single page.
///
/// This is where the session token and user live between runs.
pub trait SessionStorage: Send + Sync {
    /// Reads the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| ApiError::Storage("storage lock poisoned".to_string()))
}

/// In-memory storage. Cloning shares the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.items)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.items)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        lock(&self.items)?.remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object in a file.
///
/// A missing file reads as empty. The file is read once, on first access,
/// and later reads are served from memory, so the token lookup on every
/// request never touches the disk. Writes only happen when a session starts
/// or ends; they rewrite the whole (small) file through a temporary sibling
/// and a rename, creating parent directories as needed.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<Option<BTreeMap<String, String>>>,
}

impl FileStorage {
    /// Creates a `FileStorage` at the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - The JSON file holding the stored items.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            items: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(sonic_rs::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// The cached items, reading the file if this is the first access.
    fn loaded<'a>(
        &self,
        cached: &'a mut Option<BTreeMap<String, String>>,
    ) -> Result<&'a mut BTreeMap<String, String>> {
        if cached.is_none() {
            *cached = Some(self.load()?);
        }
        Ok(cached.get_or_insert_with(BTreeMap::new))
    }

    fn store(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = sonic_rs::to_string(items)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Applies `change` and persists the result. The cache is only updated
    /// once the file write succeeded.
    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>) -> bool) -> Result<()> {
        let mut cached = lock(&self.items)?;
        let items = self.loaded(&mut cached)?;

        let mut next = items.clone();
        if change(&mut next) {
            self.store(&next)?;
            *items = next;
        }
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut cached = lock(&self.items)?;
        Ok(self.loaded(&mut cached)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|items| {
            items.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.update(|items| items.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_clones_share_items() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set_item("authToken", "u1").unwrap();
        assert_eq!(other.get_item("authToken").unwrap().as_deref(), Some("u1"));

        other.remove_item("authToken").unwrap();
        assert_eq!(storage.get_item("authToken").unwrap(), None);
        other.remove_item("authToken").unwrap();
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get_item("authToken").unwrap(), None);
        storage.set_item("authToken", "u1").unwrap();
        storage.set_item("user", r#"{"id":"u1"}"#).unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("authToken").unwrap().as_deref(), Some("u1"));
        assert_eq!(reopened.get_item("user").unwrap().as_deref(), Some(r#"{"id":"u1"}"#));

        reopened.remove_item("authToken").unwrap();
        let third = FileStorage::new(&path);
        assert_eq!(third.get_item("authToken").unwrap(), None);
        assert!(third.get_item("user").unwrap().is_some());
    }

    #[test]
    fn file_storage_reads_the_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"authToken":"u1"}"#).unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get_item("authToken").unwrap().as_deref(), Some("u1"));

        std::fs::remove_file(&path).unwrap();
        assert_eq!(storage.get_item("authToken").unwrap().as_deref(), Some("u1"));

        storage.remove_item("authToken").unwrap();
        assert_eq!(storage.get_item("authToken").unwrap(), None);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get_item("authToken"), Err(ApiError::Decode(_))));
    }
}
