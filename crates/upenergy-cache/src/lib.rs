//! Key-value persistence port for the UpEnergy marketplace.
//!
//! The storefront keeps its cart and its (stub) login record in browser
//! local storage. This crate models that as an injected [`KeyValueStore`]
//! so state owners can be tested against an in-memory store and run
//! against a directory of files.
//!
//! # Example
//!
//! ```
//! use upenergy_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("upenergy-cart", &Vec::<String>::new()).unwrap();
//! assert!(cache.exists("upenergy-cart").unwrap());
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
