use std::collections::HashMap;
use std::sync::RwLock;

use crate::book::Book;
use crate::error::{CatalogError, CatalogResult};

/// In-memory book table, immutable after load except for review maps.
///
/// Books are held in a `Vec` behind a `RwLock` so `all()` preserves dataset
/// order. The ISBN index is built once at construction and never changes,
/// since books are neither added nor deleted at runtime. Books are cloned
/// on read; mutation happens in place under the write lock.
pub struct CatalogStore {
    books: RwLock<Vec<Book>>,
    index: HashMap<String, usize>,
}

impl CatalogStore {
    /// Create a store from an ordered, already-normalized record sequence.
    ///
    /// If the same ISBN appears more than once, the first occurrence wins
    /// for lookups, matching find-first semantics over the load order.
    pub fn new(books: Vec<Book>) -> Self {
        let mut index = HashMap::with_capacity(books.len());
        for (pos, book) in books.iter().enumerate() {
            index.entry(book.isbn.clone()).or_insert(pos);
        }
        Self {
            books: RwLock::new(books),
            index,
        }
    }

    /// Number of books in the catalog.
    pub fn len(&self) -> usize {
        self.books.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.books.read().expect("lock poisoned").is_empty()
    }

    /// The full catalog in load order.
    pub fn all(&self) -> Vec<Book> {
        self.books.read().expect("lock poisoned").clone()
    }

    /// Exact-match lookup by ISBN.
    pub fn find_by_isbn(&self, isbn: &str) -> Option<Book> {
        let pos = *self.index.get(isbn)?;
        let books = self.books.read().expect("lock poisoned");
        Some(books[pos].clone())
    }

    /// Upsert `reviews[username] = text` on the given book.
    ///
    /// Idempotent: repeating the call with the same text leaves the same
    /// observable state. Returns the book after mutation.
    pub fn set_review(&self, isbn: &str, username: &str, text: &str) -> CatalogResult<Book> {
        let pos = *self
            .index
            .get(isbn)
            .ok_or_else(|| CatalogError::BookNotFound(isbn.to_string()))?;
        let mut books = self.books.write().expect("lock poisoned");
        books[pos]
            .reviews
            .insert(username.to_string(), text.to_string());
        Ok(books[pos].clone())
    }

    /// Remove the user's review from the given book.
    ///
    /// Fails with [`CatalogError::BookNotFound`] for an unknown ISBN and
    /// [`CatalogError::ReviewNotFound`] when the user never reviewed it.
    pub fn delete_review(&self, isbn: &str, username: &str) -> CatalogResult<Book> {
        let pos = *self
            .index
            .get(isbn)
            .ok_or_else(|| CatalogError::BookNotFound(isbn.to_string()))?;
        let mut books = self.books.write().expect("lock poisoned");
        if books[pos].reviews.remove(username).is_none() {
            return Err(CatalogError::ReviewNotFound {
                isbn: isbn.to_string(),
                username: username.to_string(),
            });
        }
        Ok(books[pos].clone())
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("book_count", &self.len())
            .finish()
    }
}
