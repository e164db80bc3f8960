//! In-memory book catalog for the stacks service.
//!
//! The catalog is loaded once at startup from a JSON dataset and is
//! immutable afterwards, with one exception: each book carries a map of
//! per-user reviews that may be created, replaced, or removed at runtime.
//!
//! # Components
//!
//! - [`CatalogStore`] -- owns the book table; the only type that mutates it
//! - [`QueryEngine`] -- read-only lookups by ISBN, author, and title
//! - [`ReviewManager`] -- mediates review writes for authenticated users
//! - [`loader`] -- normalizes the three accepted dataset shapes
//!
//! # Design Rules
//!
//! 1. Books are never added or deleted after load.
//! 2. At most one review per username per book; a second write replaces.
//! 3. All mutation goes through the store's write lock; queries never block
//!    writers longer than a read lock.
//! 4. Errors are typed and propagated; nothing is retried internally.

pub mod book;
pub mod error;
pub mod loader;
pub mod query;
pub mod reviews;
pub mod store;

// Re-export primary types at crate root for ergonomic imports.
pub use book::Book;
pub use error::{CatalogError, CatalogResult};
pub use query::{QueryEngine, ReviewsFor, NO_REVIEWS_YET};
pub use reviews::ReviewManager;
pub use store::CatalogStore;
