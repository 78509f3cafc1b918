//! The book collection and its persistence.
//!
//! `Shelf` holds the ordered in-memory collection, `ShelfStore` reads and
//! writes the flat file, and `Library` ties the two together: every
//! mutation is mirrored to disk before it returns.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.libris/
//! └── library.json    # the whole collection, one pretty-printed JSON array
//! ```

use thiserror::Error;
use tracing::warn;

use crate::domain::{Book, SearchField};

pub mod shelf;
pub mod store;

pub use shelf::Shelf;
pub use store::{ShelfStore, StoreError};

/// Errors from catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("book title must not be empty")]
    EmptyTitle,

    #[error("book author must not be empty")]
    EmptyAuthor,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The catalog: an in-memory shelf mirrored to its store after every
/// mutation.
///
/// Save failures are returned to the caller but never roll back the
/// in-memory change; for the rest of the session the memory copy is
/// authoritative.
pub struct Library {
    shelf: Shelf,
    store: ShelfStore,
}

impl Library {
    /// Open the library backed by `store`.
    ///
    /// A missing shelf file starts empty. An unreadable or malformed file
    /// is reported and also starts empty rather than failing.
    pub async fn open(store: ShelfStore) -> Self {
        let shelf = match store.load().await {
            Ok(shelf) => shelf,
            Err(err) => {
                warn!(error = %err, "could not load shelf, starting with an empty library");
                Shelf::new()
            }
        };

        Self { shelf, store }
    }

    /// All records in insertion order
    pub fn books(&self) -> &[Book] {
        self.shelf.books()
    }

    /// The underlying shelf
    pub fn shelf(&self) -> &Shelf {
        &self.shelf
    }

    /// Add a book to the end of the collection and persist.
    ///
    /// Title and author must be non-empty; the year is accepted as given.
    pub async fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
        genre: Option<String>,
        read_status: bool,
    ) -> Result<(), CatalogError> {
        let title = title.into();
        let author = author.into();

        if title.is_empty() {
            return Err(CatalogError::EmptyTitle);
        }
        if author.is_empty() {
            return Err(CatalogError::EmptyAuthor);
        }

        self.shelf
            .add(Book::new(title, author, publication_year, genre, read_status));
        self.store.save(&self.shelf).await?;

        Ok(())
    }

    /// Remove the record at `index` and persist.
    ///
    /// Out-of-range indices are a no-op reported as `Ok(None)`; nothing is
    /// written in that case.
    pub async fn remove(&mut self, index: usize) -> Result<Option<Book>, CatalogError> {
        match self.shelf.remove(index) {
            Some(book) => {
                self.store.save(&self.shelf).await?;
                Ok(Some(book))
            }
            None => Ok(None),
        }
    }

    /// Flip the read status of the record at `index` and persist, returning
    /// the new status. Out-of-range indices are a no-op reported as
    /// `Ok(None)`.
    pub async fn toggle_read(&mut self, index: usize) -> Result<Option<bool>, CatalogError> {
        match self.shelf.toggle_read(index) {
            Some(status) => {
                self.store.save(&self.shelf).await?;
                Ok(Some(status))
            }
            None => Ok(None),
        }
    }

    /// Search records by case-insensitive substring match against `field`
    pub fn search(&self, term: &str, field: SearchField) -> Vec<&Book> {
        self.shelf.search(term, field)
    }

    /// Compute aggregate statistics over the current collection
    pub fn stats(&self) -> crate::stats::LibraryStats {
        crate::stats::compute(self.shelf.books())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_temp_library() -> (Library, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = ShelfStore::new(temp.path().join("library.json"));
        (Library::open(store).await, temp)
    }

    #[tokio::test]
    async fn test_add_rejects_empty_fields() {
        let (mut library, _temp) = open_temp_library().await;

        let err = library.add("", "Herbert", 1965, None, false).await;
        assert!(matches!(err, Err(CatalogError::EmptyTitle)));

        let err = library.add("Dune", "", 1965, None, false).await;
        assert!(matches!(err, Err(CatalogError::EmptyAuthor)));

        assert!(library.books().is_empty());
    }

    #[tokio::test]
    async fn test_add_appends_and_persists() {
        let (mut library, temp) = open_temp_library().await;

        library
            .add("Dune", "Herbert", 1965, Some("Science".to_string()), true)
            .await
            .unwrap();

        assert_eq!(library.books().len(), 1);
        let book = library.books().last().unwrap();
        assert_eq!(book.title, "Dune");
        assert!(book.read_status);

        // The mutation is on disk, not just in memory
        let reopened = ShelfStore::new(temp.path().join("library.json"))
            .load()
            .await
            .unwrap();
        assert_eq!(reopened.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_invalid_index_writes_nothing() {
        let (mut library, temp) = open_temp_library().await;
        library.add("Only", "A", 1990, None, false).await.unwrap();

        let removed = library.remove(5).await.unwrap();
        assert!(removed.is_none());
        assert_eq!(library.books().len(), 1);

        let reopened = ShelfStore::new(temp.path().join("library.json"))
            .load()
            .await
            .unwrap();
        assert_eq!(reopened.len(), 1);
    }

    #[tokio::test]
    async fn test_open_with_malformed_file_starts_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("library.json");
        std::fs::write(&path, "not json at all").unwrap();

        let library = Library::open(ShelfStore::new(&path)).await;
        assert!(library.books().is_empty());
    }
}
