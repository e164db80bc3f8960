//! HTTP layer for the stacks book-catalog service.
//!
//! This crate is plumbing: it parses requests, extracts bearer tokens from
//! the `Authorization` header, and translates core errors into HTTP status
//! codes. All catalog and identity semantics live in `stacks-catalog` and
//! `stacks-auth`; nothing in this crate mutates state directly.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types at crate root for ergonomic imports.
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::StacksServer;
pub use state::AppState;
