//! Auralis library management
//!
//! In-memory book collection, the seed catalog, and best-effort persistence
//! through an injected key-value store.

pub mod error;
pub mod import;
pub mod manager;
pub mod persistence;
pub mod seed;
pub mod store;

pub use error::{LibraryError, LibraryResult, StoreError, StoreResult};
pub use import::{title_from_file_name, AudioSource, LocalAudioFile, SessionHandles, UNKNOWN_AUTHOR};
pub use manager::LibraryStore;
pub use persistence::{LibraryPersistence, LAST_PLAYED_KEY, LIBRARY_KEY};
pub use seed::seed_catalog;
pub use store::{FileStore, KeyValueStore, MemoryStore};
