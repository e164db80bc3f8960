//! Dataset normalization.
//!
//! The startup dataset arrives as parsed JSON in one of three shapes:
//!
//! 1. an array of `{isbn, title, author, reviews?}` records,
//! 2. an object with a `books` array of the same records,
//! 3. an object mapping ISBN strings to `{title, author, reviews?}`.
//!
//! All three normalize to the same ordered record sequence; for shape 3 the
//! ISBN is stamped from the mapping key. Anything else is rejected with
//! [`CatalogError::InvalidDataset`], which callers treat as fatal at
//! startup.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::book::Book;
use crate::error::{CatalogError, CatalogResult};
use crate::store::CatalogStore;

#[derive(Deserialize)]
struct RawRecord {
    isbn: Option<String>,
    title: Option<String>,
    author: Option<String>,
    #[serde(default)]
    reviews: BTreeMap<String, String>,
}

impl RawRecord {
    /// Finalize a record, taking the ISBN from the record itself or, for
    /// mapping-shaped datasets, from the supplied key.
    fn into_book(self, key_isbn: Option<&str>) -> CatalogResult<Book> {
        let isbn = self
            .isbn
            .or_else(|| key_isbn.map(str::to_string))
            .ok_or_else(|| CatalogError::InvalidDataset("record is missing isbn".into()))?;
        let title = self
            .title
            .ok_or_else(|| CatalogError::InvalidDataset(format!("book {isbn} has no title")))?;
        let author = self
            .author
            .ok_or_else(|| CatalogError::InvalidDataset(format!("book {isbn} has no author")))?;
        Ok(Book {
            isbn,
            title,
            author,
            reviews: self.reviews,
        })
    }
}

fn record_from_value(value: Value, key_isbn: Option<&str>) -> CatalogResult<Book> {
    let raw: RawRecord = serde_json::from_value(value)
        .map_err(|e| CatalogError::InvalidDataset(e.to_string()))?;
    raw.into_book(key_isbn)
}

/// Normalize a parsed JSON dataset into an ordered book sequence.
pub fn normalize(value: Value) -> CatalogResult<Vec<Book>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| record_from_value(item, None))
            .collect(),
        Value::Object(mut map) => {
            if let Some(books) = map.remove("books") {
                let Value::Array(items) = books else {
                    return Err(CatalogError::InvalidDataset(
                        "\"books\" field is not an array".into(),
                    ));
                };
                return items
                    .into_iter()
                    .map(|item| record_from_value(item, None))
                    .collect();
            }
            // Mapping shape: keys are ISBNs. serde_json's map iterates in
            // sorted key order, so the load order is deterministic.
            map.into_iter()
                .map(|(isbn, record)| record_from_value(record, Some(&isbn)))
                .collect()
        }
        other => Err(CatalogError::InvalidDataset(format!(
            "expected an array or object, got {other}"
        ))),
    }
}

/// Read, parse, and normalize a dataset file into a ready [`CatalogStore`].
pub fn load_file(path: impl AsRef<Path>) -> CatalogResult<CatalogStore> {
    let raw = fs::read_to_string(path.as_ref())?;
    let value: Value =
        serde_json::from_str(&raw).map_err(|e| CatalogError::InvalidDataset(e.to_string()))?;
    let books = normalize(value)?;
    tracing::info!(books = books.len(), path = %path.as_ref().display(), "catalog loaded");
    Ok(CatalogStore::new(books))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn array_shape() {
        let books = normalize(json!([
            {"isbn": "1111", "title": "A", "author": "X"},
            {"isbn": "2222", "title": "B", "author": "Y"},
        ]))
        .unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].isbn, "1111");
        assert_eq!(books[1].author, "Y");
    }

    #[test]
    fn wrapped_books_shape() {
        let books = normalize(json!({
            "books": [{"isbn": "1111", "title": "A", "author": "X"}]
        }))
        .unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "A");
    }

    #[test]
    fn isbn_keyed_shape_stamps_isbn_from_key() {
        let books = normalize(json!({
            "1111": {"title": "A", "author": "X"},
            "2222": {"title": "B", "author": "Y"},
        }))
        .unwrap();
        assert_eq!(books.len(), 2);
        assert!(books.iter().any(|b| b.isbn == "1111" && b.title == "A"));
        assert!(books.iter().any(|b| b.isbn == "2222" && b.title == "B"));
    }

    #[test]
    fn record_isbn_beats_mapping_key() {
        // A record that carries its own isbn keeps it even under shape 3.
        let books = normalize(json!({
            "key-isbn": {"isbn": "real-isbn", "title": "A", "author": "X"},
        }))
        .unwrap();
        assert_eq!(books[0].isbn, "real-isbn");
    }

    #[test]
    fn preexisting_reviews_survive_normalization() {
        let books = normalize(json!([
            {"isbn": "1111", "title": "A", "author": "X",
             "reviews": {"alice": "great"}},
        ]))
        .unwrap();
        assert_eq!(
            books[0].reviews.get("alice").map(String::as_str),
            Some("great")
        );
    }

    #[test]
    fn scalar_dataset_rejected() {
        let err = normalize(json!(42)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDataset(_)));
    }

    #[test]
    fn non_array_books_field_rejected() {
        let err = normalize(json!({"books": "not a list"})).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDataset(_)));
    }

    #[test]
    fn record_missing_title_rejected() {
        let err = normalize(json!([{"isbn": "1111", "author": "X"}])).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDataset(_)));
    }

    #[test]
    fn record_missing_isbn_rejected_in_array_shape() {
        let err = normalize(json!([{"title": "A", "author": "X"}])).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDataset(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file("/nonexistent/books.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
