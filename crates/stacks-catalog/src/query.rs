use std::collections::BTreeMap;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::book::Book;
use crate::error::{CatalogError, CatalogResult};
use crate::store::CatalogStore;

/// Sentinel text returned for books that nobody has reviewed.
pub const NO_REVIEWS_YET: &str = "No reviews yet";

/// Read-only lookups over a shared [`CatalogStore`].
///
/// The three search operations are deliberately asymmetric: ISBN is an
/// exact match, author is a case-insensitive exact match on the full
/// string, and title is a case-insensitive substring match. Do not unify
/// them. All operations are pure reads.
pub struct QueryEngine {
    store: Arc<CatalogStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Exact ISBN match; zero or one element.
    pub fn by_isbn(&self, isbn: &str) -> Vec<Book> {
        self.store.find_by_isbn(isbn).into_iter().collect()
    }

    /// Case-insensitive exact match on the full author string.
    pub fn by_author(&self, author: &str) -> Vec<Book> {
        let needle = author.to_lowercase();
        self.store
            .all()
            .into_iter()
            .filter(|b| b.author.to_lowercase() == needle)
            .collect()
    }

    /// Case-insensitive substring match on the title.
    pub fn by_title(&self, fragment: &str) -> Vec<Book> {
        let needle = fragment.to_lowercase();
        self.store
            .all()
            .into_iter()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Reviews for one book, or the no-reviews sentinel.
    pub fn reviews_for(&self, isbn: &str) -> CatalogResult<ReviewsFor> {
        let book = self
            .store
            .find_by_isbn(isbn)
            .ok_or_else(|| CatalogError::BookNotFound(isbn.to_string()))?;
        if book.has_no_reviews() {
            return Ok(ReviewsFor::NoneYet);
        }
        Ok(ReviewsFor::Reviews {
            title: book.title,
            reviews: book.reviews,
        })
    }
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("books", &self.store.len())
            .finish()
    }
}

/// Result of [`QueryEngine::reviews_for`].
///
/// An unreviewed book is reported with a sentinel rather than an empty map.
/// The distinction is observable on the wire (`{"reviews": "No reviews
/// yet"}` versus `{"title": ..., "reviews": {...}}`) and is preserved
/// verbatim from the reference behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReviewsFor {
    NoneYet,
    Reviews {
        title: String,
        reviews: BTreeMap<String, String>,
    },
}

impl Serialize for ReviewsFor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NoneYet => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("reviews", NO_REVIEWS_YET)?;
                map.end()
            }
            Self::Reviews { title, reviews } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("title", title)?;
                map.serialize_entry("reviews", reviews)?;
                map.end()
            }
        }
    }
}
