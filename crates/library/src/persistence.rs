//! Best-effort persistence of the library and the last played book
//!
//! Reads fail soft to the seed catalog and writes never report failure to
//! the caller: every problem is logged and swallowed.

use crate::error::LibraryResult;
use crate::seed::seed_catalog;
use crate::store::KeyValueStore;
use auralis_core::{Book, BookId, Timestamp};

/// Key of the serialized library. A new format needs a new key.
pub const LIBRARY_KEY: &str = "auralis_library_v1";

/// Key of the last played book id
pub const LAST_PLAYED_KEY: &str = "auralis_last_id";

/// Persistence adapter over an injected key-value store
pub struct LibraryPersistence<S: KeyValueStore> {
    store: S,
    seeds: Vec<Book>,
}

impl<S: KeyValueStore> LibraryPersistence<S> {
    /// Creates an adapter using the built-in seed catalog
    pub fn new(store: S) -> Self {
        Self::with_seeds(store, seed_catalog(Timestamp::now()))
    }

    /// Creates an adapter with an explicit seed catalog
    pub fn with_seeds(store: S, seeds: Vec<Book>) -> Self {
        Self { store, seeds }
    }

    /// The seed catalog used as fallback and merge source
    pub fn seeds(&self) -> &[Book] {
        &self.seeds
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Loads the stored library, or the seed catalog if nothing usable is stored
    ///
    /// Seed entries keep their static fields and take only `current_time`
    /// and `last_played` from the stored record. Local entries are dropped
    /// because their handles died with the previous session.
    pub fn load_library(&self) -> Vec<Book> {
        match self.try_load_library() {
            Ok(Some(books)) => books,
            Ok(None) => {
                log::info!("No stored library, starting from the seed catalog");
                self.seeds.clone()
            }
            Err(e) => {
                log::error!("Failed to load library: {}", e);
                self.seeds.clone()
            }
        }
    }

    fn try_load_library(&self) -> LibraryResult<Option<Vec<Book>>> {
        let Some(raw) = self.store.get(LIBRARY_KEY)? else {
            return Ok(None);
        };

        let stored: Vec<Book> = serde_json::from_str(&raw)?;
        let books = stored
            .into_iter()
            .map(|book| self.merge_with_seed(book))
            .filter(|book| !book.is_local)
            .collect();

        Ok(Some(books))
    }

    fn merge_with_seed(&self, stored: Book) -> Book {
        match self.seeds.iter().find(|seed| seed.id == stored.id) {
            Some(seed) => Book {
                current_time: stored.current_time,
                last_played: stored.last_played,
                ..seed.clone()
            },
            None => stored,
        }
    }

    /// Writes every entry except those holding an ephemeral handle
    pub fn save_library(&mut self, books: &[Book]) {
        if let Err(e) = self.try_save_library(books) {
            log::error!("Failed to save library: {}", e);
        }
    }

    fn try_save_library(&mut self, books: &[Book]) -> LibraryResult<()> {
        let persistent: Vec<&Book> = books
            .iter()
            .filter(|book| !book.has_ephemeral_handle())
            .collect();
        let json = serde_json::to_string(&persistent)?;
        self.store.set(LIBRARY_KEY, &json)?;
        log::debug!("Saved {} of {} books", persistent.len(), books.len());
        Ok(())
    }

    /// Records the book to reselect on the next start
    pub fn save_last_played_id(&mut self, id: &BookId) {
        if let Err(e) = self.store.set(LAST_PLAYED_KEY, id.as_str()) {
            log::error!("Failed to save last played id: {}", e);
        }
    }

    /// Returns the book to reselect on start, if any
    pub fn load_last_played_id(&self) -> Option<BookId> {
        match self.store.get(LAST_PLAYED_KEY) {
            Ok(Some(id)) if !id.trim().is_empty() => Some(BookId::from_string(id.trim())),
            Ok(_) => None,
            Err(e) => {
                log::error!("Failed to load last played id: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};
    use crate::store::MemoryStore;

    /// Store whose writes always fail
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("quota exceeded".to_string()))
        }
    }

    fn seeds() -> Vec<Book> {
        seed_catalog(Timestamp::from_millis(1_000_000))
    }

    fn local_book(title: &str) -> Book {
        Book::new_local(
            title.to_string(),
            "Unknown Author".to_string(),
            "blob:abc".to_string(),
        )
    }

    #[test]
    fn test_empty_store_yields_seed_catalog_in_order() {
        let persistence = LibraryPersistence::with_seeds(MemoryStore::new(), seeds());
        assert_eq!(persistence.load_library(), seeds());
    }

    #[test]
    fn test_corrupt_record_yields_seed_catalog() {
        let mut store = MemoryStore::new();
        store.set(LIBRARY_KEY, "{not json").unwrap();

        let persistence = LibraryPersistence::with_seeds(store, seeds());
        assert_eq!(persistence.load_library(), seeds());
    }

    #[test]
    fn test_stored_empty_list_stays_empty() {
        let mut store = MemoryStore::new();
        store.set(LIBRARY_KEY, "[]").unwrap();

        let persistence = LibraryPersistence::with_seeds(store, seeds());
        assert!(persistence.load_library().is_empty());
    }

    #[test]
    fn test_seed_static_fields_win_over_stored() {
        let mut stale = seeds()[0].clone();
        stale.title = "Old Title".to_string();
        stale.file_url = "https://old.example/broken.mp3".to_string();
        stale.duration = 10.0;
        stale.current_time = 321.5;
        stale.last_played = Timestamp::from_millis(42);

        let mut store = MemoryStore::new();
        store
            .set(LIBRARY_KEY, &serde_json::to_string(&vec![stale]).unwrap())
            .unwrap();

        let loaded = LibraryPersistence::with_seeds(store, seeds()).load_library();
        assert_eq!(loaded.len(), 1);
        let book = &loaded[0];
        assert_eq!(book.title, seeds()[0].title);
        assert_eq!(book.file_url, seeds()[0].file_url);
        assert_eq!(book.duration, 1450.0);
        assert_eq!(book.current_time, 321.5);
        assert_eq!(book.last_played, Timestamp::from_millis(42));
    }

    #[test]
    fn test_local_entries_absent_after_reload() {
        let mut library = seeds();
        library.push(local_book("Ephemeral"));

        let mut persistence = LibraryPersistence::with_seeds(MemoryStore::new(), seeds());
        persistence.save_library(&library);

        let reloaded = persistence.load_library();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.iter().all(|b| !b.is_local));
    }

    #[test]
    fn test_local_entry_with_durable_url_saved_but_dropped_on_load() {
        let mut durable = local_book("Durable");
        durable.file_url = "file:///music/durable.mp3".to_string();

        let mut persistence = LibraryPersistence::with_seeds(MemoryStore::new(), seeds());
        persistence.save_library(&[durable]);

        let raw = persistence.store().get(LIBRARY_KEY).unwrap().unwrap();
        assert!(raw.contains("Durable"));
        assert!(persistence.load_library().is_empty());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut persistence = LibraryPersistence::with_seeds(ReadOnlyStore(MemoryStore::new()), seeds());
        persistence.save_library(&seeds());
        persistence.save_last_played_id(&BookId::from("sample-1"));
        assert!(persistence.load_last_played_id().is_none());
    }

    #[test]
    fn test_last_played_roundtrip() {
        let mut persistence = LibraryPersistence::with_seeds(MemoryStore::new(), seeds());
        assert!(persistence.load_last_played_id().is_none());

        persistence.save_last_played_id(&BookId::from("sample-2"));
        assert_eq!(
            persistence.load_last_played_id(),
            Some(BookId::from("sample-2"))
        );
    }
}
