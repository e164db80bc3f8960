use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single catalog entry.
///
/// The `isbn` is the unique identifier and, together with `title` and
/// `author`, is immutable after load. `reviews` maps a username to that
/// user's review text and is the only field mutated at runtime. A
/// `BTreeMap` keeps serialized snapshots deterministic; ordering is
/// otherwise irrelevant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub reviews: BTreeMap<String, String>,
}

impl Book {
    /// Create a book with no reviews.
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            reviews: BTreeMap::new(),
        }
    }

    /// Returns `true` if no user has reviewed this book.
    pub fn has_no_reviews(&self) -> bool {
        self.reviews.is_empty()
    }
}
