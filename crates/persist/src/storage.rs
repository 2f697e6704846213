//! Key-value storage backends.
//!
//! Layout of a file-backed store:
//! ```text
//! <root>/
//!   globalState.json            - one record per key, the raw stored text
//!   .globalState.XXXXXX.tmp     - in-flight write, renamed over the record
//! ```

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Errors from a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("record `{key}` is not valid UTF-8")]
    Corrupt { key: String },
}

/// Durable string-to-string storage, one value per key.
///
/// Absence is not an error: `get_item` returns `Ok(None)` and removing a
/// missing key succeeds. A record that exists but cannot be read as text is
/// [`StorageError::Corrupt`].
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage. Contents live as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one record.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.items.insert(key.into(), value.into());
        storage
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// File-backed storage: one file per key under a root directory.
///
/// Writes go to a temporary sibling and are renamed into place, so a record
/// is either the previous text or the new text, never a partial write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open or create a store rooted at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Get the path to the store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| StorageError::Corrupt { key: key.to_owned() }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{key}."))
            .suffix(".tmp")
            .tempfile_in(&self.root)?;
        tmp.write_all(value.as_bytes())?;
        // A failed rename drops the temp file, which deletes it.
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keys become file names: non-empty, `[A-Za-z0-9_.-]`, no leading dot.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
