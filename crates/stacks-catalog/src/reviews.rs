use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::CatalogResult;
use crate::store::CatalogStore;

/// Mediates review writes against the catalog.
///
/// Callers must pass a username that has already been verified by the
/// identity layer; the manager trusts it. Keeping the authorization
/// precondition here leaves the store itself authorization-agnostic and
/// independently testable.
pub struct ReviewManager {
    store: Arc<CatalogStore>,
}

impl ReviewManager {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Create or replace the user's review on a book.
    ///
    /// One review per user per book: a second call overwrites, it never
    /// appends. Returns the book's full reviews map after the mutation.
    pub fn add_or_modify(
        &self,
        isbn: &str,
        username: &str,
        text: &str,
    ) -> CatalogResult<BTreeMap<String, String>> {
        let book = self.store.set_review(isbn, username, text)?;
        tracing::debug!(isbn, username, "review upserted");
        Ok(book.reviews)
    }

    /// Remove the user's review from a book.
    pub fn delete(&self, isbn: &str, username: &str) -> CatalogResult<BTreeMap<String, String>> {
        let book = self.store.delete_review(isbn, username)?;
        tracing::debug!(isbn, username, "review deleted");
        Ok(book.reviews)
    }
}

impl std::fmt::Debug for ReviewManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewManager").finish_non_exhaustive()
    }
}
