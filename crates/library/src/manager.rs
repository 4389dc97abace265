// FILE: crates/library/src/manager.rs

use crate::error::{LibraryError, LibraryResult};
use crate::import::{title_from_file_name, AudioSource, UNKNOWN_AUTHOR};
use crate::persistence::LibraryPersistence;
use crate::store::KeyValueStore;
use auralis_core::{Book, BookId, Timestamp};
use log::{debug, info};

/// In-memory library, written through to the persistence adapter
///
/// Every mutating operation ends with an explicit [`LibraryStore::persist`]
/// call. Growth and progress writes skip an empty collection; removal
/// forces the write so deleting the last book is not lost.
pub struct LibraryStore<S: KeyValueStore> {
    books: Vec<Book>,
    persistence: LibraryPersistence<S>,
}

impl<S: KeyValueStore> LibraryStore<S> {
    /// Loads the library through `persistence`
    pub fn open(persistence: LibraryPersistence<S>) -> Self {
        let books = persistence.load_library();
        info!("Library loaded with {} books", books.len());
        Self { books, persistence }
    }

    /// Books in display (insertion) order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BookId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Books ordered by most recently played first
    pub fn recent(&self) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.books.iter().collect();
        books.sort_by(|a, b| b.last_played.cmp(&a.last_played));
        books
    }

    /// Appends one local book per source and returns their ids
    pub fn add<A: AudioSource>(&mut self, sources: &[A]) -> Vec<BookId> {
        let now = Timestamp::now();
        let ids = sources
            .iter()
            .map(|source| {
                let mut book = Book::new_local(
                    title_from_file_name(&source.file_name()),
                    UNKNOWN_AUTHOR.to_string(),
                    source.handle(),
                );
                book.last_played = now;
                debug!("Adding '{}' as {}", book.title, book.id);
                let id = book.id.clone();
                self.books.push(book);
                id
            })
            .collect();

        self.persist(false);
        ids
    }

    /// Deletes a book and writes the collection even if it is now empty
    pub fn remove(&mut self, id: &BookId) -> LibraryResult<Book> {
        let index = self
            .books
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| LibraryError::BookNotFound(id.to_string()))?;

        let removed = self.books.remove(index);
        info!("Removed '{}' from the library", removed.title);
        self.persist(true);
        Ok(removed)
    }

    /// Stores a resume point and refreshes the recency stamp
    pub fn update_progress(&mut self, id: &BookId, time: f64) -> LibraryResult<()> {
        self.book_mut(id)?.record_progress(time, Timestamp::now());
        self.persist(false);
        Ok(())
    }

    /// Records the duration reported by the player
    pub fn set_duration(&mut self, id: &BookId, duration: f64) -> LibraryResult<()> {
        let book = self.book_mut(id)?;
        if book.duration == duration {
            return Ok(());
        }
        book.set_duration(duration);
        self.persist(false);
        Ok(())
    }

    /// Writes the collection; an empty one only when `force` is set
    pub fn persist(&mut self, force: bool) {
        if self.books.is_empty() && !force {
            debug!("Skipping persistence of an empty library");
            return;
        }
        self.persistence.save_library(&self.books);
    }

    pub fn save_last_played(&mut self, id: &BookId) {
        self.persistence.save_last_played_id(id);
    }

    pub fn load_last_played(&self) -> Option<BookId> {
        self.persistence.load_last_played_id()
    }

    pub fn persistence(&self) -> &LibraryPersistence<S> {
        &self.persistence
    }

    fn book_mut(&mut self, id: &BookId) -> LibraryResult<&mut Book> {
        self.books
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| LibraryError::BookNotFound(id.to_string()))
    }
}
