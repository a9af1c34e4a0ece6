//! Raw key-value stores holding named blobs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::CacheError;

/// A store of named byte blobs.
///
/// Mirrors the browser's local storage: reads and writes are synchronous
/// and operate on whole values. Methods take `&self` so a store can be
/// shared between the cart and the auth session.
pub trait KeyValueStore {
    /// Read a value. Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Delete a value. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// List all keys, sorted.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        (**self).keys()
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a single value.
    pub fn with_entry(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(key.into(), value.into());
        }
        store
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CacheError::StoreError(e.to_string()))?;
        Ok(entries.keys().cloned().collect())
    }
}

/// File-backed store: one file per key inside a directory.
///
/// Key characters outside `[A-Za-z0-9_-]` are percent-encoded in the file
/// name. Writes go to a temporary file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// The directory backing this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(encode_key(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key).is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.ends_with(".tmp") {
                continue;
            }
            if let Some(key) = decode_key(&name) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' => out.push(byte as char),
            // includes '.', so no encoded key ends in ".tmp"
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
