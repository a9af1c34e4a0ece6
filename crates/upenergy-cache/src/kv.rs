//! Typed wrapper over a key-value store with automatic serialization.

use crate::{CacheError, KeyValueStore};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over any [`KeyValueStore`].
///
/// Values are stored as JSON. A value that exists but fails to decode is
/// reported as [`CacheError::SerializeError`]; callers decide whether that
/// is fatal.
#[derive(Debug, Clone)]
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a store.
    ///
    /// # Example
    ///
    /// ```
    /// use upenergy_cache::{Cache, MemoryStore};
    ///
    /// let cache = Cache::new(MemoryStore::new());
    /// cache.set("answer", &42u32).unwrap();
    /// assert_eq!(cache.get::<u32>("answer").unwrap(), Some(42));
    /// ```
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the cache and return the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```
/// use upenergy_cache::cache_key;
///
/// let key = cache_key!("cart", "user123");
/// assert_eq!(key, "cart:user123");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        token_id: String,
        quantity: u32,
    }

    #[test]
    fn test_get_missing_returns_none() {
        let cache = Cache::new(MemoryStore::new());
        let value: Option<Entry> = cache.get("missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::new(MemoryStore::new());
        let entries = vec![Entry {
            token_id: "0.0.1".to_string(),
            quantity: 2,
        }];
        cache.set("cart", &entries).unwrap();

        let loaded: Vec<Entry> = cache.get("cart").unwrap().unwrap();
        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_corrupt_value_is_decode_error() {
        let cache = Cache::new(MemoryStore::with_entry("cart", "{not json"));
        let err = cache.get::<Vec<Entry>>("cart").unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("session", "abc"), "session:abc");
        assert_eq!(cache_key!("cart", "user", 7), "cart:user:7");
    }
}
